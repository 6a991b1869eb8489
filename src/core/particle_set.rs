use bevy::prelude::Vec3;

use crate::core::particle::{Particle, ParticlePhase};
use crate::math::{Point, Vector, zero_vector};

/// Floats per grain in the position buffer (x, y, z).
pub const POSITION_STRIDE: usize = 3;

/// Fixed-size grain storage.
///
/// Positions live in one interleaved `x, y, z` buffer so renderers can upload
/// them in bulk; velocities and phases are kept per grain alongside.
#[derive(Clone, Debug)]
pub struct SandParticles {
    positions: Vec<f32>,
    velocities: Vec<Vector>,
    phases: Vec<ParticlePhase>,
    dirty: bool,
}

impl SandParticles {
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * POSITION_STRIDE],
            velocities: vec![zero_vector(); count],
            phases: vec![ParticlePhase::Falling; count],
            dirty: true,
        }
    }

    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Interleaved positions, `3 * len()` floats in fixed grain order.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Positions as `[x, y, z]` triples, the vertex layout a point mesh takes.
    pub fn points(&self) -> Vec<[f32; POSITION_STRIDE]> {
        self.positions
            .chunks_exact(POSITION_STRIDE)
            .map(|p| [p[0], p[1], p[2]])
            .collect()
    }

    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    pub fn phases(&self) -> &[ParticlePhase] {
        &self.phases
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        let start = index.checked_mul(POSITION_STRIDE)?;
        let end = start.checked_add(POSITION_STRIDE)?;
        self.positions
            .get(start..end)
            .map(Vec3::from_slice)
    }

    pub fn get(&self, index: usize) -> Option<Particle> {
        Some(Particle {
            position: self.position(index)?,
            velocity: *self.velocities.get(index)?,
            phase: *self.phases.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        self.positions
            .chunks_exact(POSITION_STRIDE)
            .zip(&self.velocities)
            .zip(&self.phases)
            .map(|((position, &velocity), &phase)| Particle {
                position: Vec3::from_slice(position),
                velocity,
                phase,
            })
    }

    /// Overwrite one grain. Returns `false` for an out-of-range index.
    pub fn set(&mut self, index: usize, particle: Particle) -> bool {
        if index >= self.len() {
            return false;
        }
        let start = index * POSITION_STRIDE;
        particle
            .position
            .write_to_slice(&mut self.positions[start..start + POSITION_STRIDE]);
        self.velocities[index] = particle.velocity;
        self.phases[index] = particle.phase;
        true
    }

    /// Visit every grain mutably, writing positions back into the shared buffer.
    ///
    /// Does not touch the dirty flag; callers mark the buffer once per pass.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Point, &mut Vector, &mut ParticlePhase),
    {
        for ((chunk, velocity), phase) in self
            .positions
            .chunks_exact_mut(POSITION_STRIDE)
            .zip(self.velocities.iter_mut())
            .zip(self.phases.iter_mut())
        {
            let mut position = Vec3::from_slice(chunk);
            f(&mut position, velocity, phase);
            position.write_to_slice(chunk);
        }
    }

    pub fn settled_count(&self) -> usize {
        self.phases.iter().filter(|phase| phase.is_settled()).count()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the change signal; returns whether positions changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_are_sized_per_grain() {
        let particles = SandParticles::new(7);
        assert_eq!(particles.len(), 7);
        assert_eq!(particles.positions().len(), 21);
        assert_eq!(particles.velocities().len(), 7);
        assert_eq!(particles.settled_count(), 0);
    }

    #[test]
    fn set_writes_interleaved_position() {
        let mut particles = SandParticles::new(3);
        let grain = Particle {
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::new(0.0, -1.0, 0.0),
            phase: ParticlePhase::Settled,
        };
        assert!(particles.set(1, grain));
        assert_eq!(&particles.positions()[3..6], &[1.0, 2.0, 3.0]);
        assert_eq!(particles.get(1), Some(grain));
        assert_eq!(particles.settled_count(), 1);
    }

    #[test]
    fn points_follow_buffer_order() {
        let mut particles = SandParticles::new(2);
        particles.for_each_mut(|position, _, _| position.x += 1.0);
        particles.set(
            1,
            Particle {
                position: Vec3::new(4.0, 5.0, 6.0),
                velocity: Vec3::ZERO,
                phase: ParticlePhase::Falling,
            },
        );
        assert_eq!(particles.points(), vec![[1.0, 0.0, 0.0], [4.0, 5.0, 6.0]]);
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut particles = SandParticles::new(2);
        assert!(particles.get(2).is_none());
        assert!(particles.position(usize::MAX).is_none());
        assert!(!particles.set(
            5,
            Particle {
                position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                phase: ParticlePhase::Falling,
            }
        ));
    }

    #[test]
    fn dirty_flag_is_consumed_once() {
        let mut particles = SandParticles::new(1);
        assert!(particles.take_dirty());
        assert!(!particles.take_dirty());
        particles.mark_dirty();
        assert!(particles.is_dirty());
        assert!(particles.take_dirty());
        assert!(!particles.is_dirty());
    }

    #[test]
    fn for_each_mut_writes_back_positions() {
        let mut particles = SandParticles::new(2);
        particles.for_each_mut(|position, velocity, _| {
            position.y += 1.0;
            velocity.x = 2.0;
        });
        assert_eq!(particles.positions(), &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
        assert!(particles.iter().all(|p| p.velocity.x == 2.0));
    }
}
