use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SimParams;
use crate::geometry::ContainerProfile;
use crate::math::{Point, Real, Vector, zero_vector};
use crate::solver::{scatter_particle, step_particle};

use super::flip::FlipState;
use super::particle::{Particle, ParticlePhase};
use super::particle_set::SandParticles;

/// Aggregate simulation state: grains, container, flip and random source.
#[derive(Resource)]
pub struct SandSimulation {
    particles: SandParticles,
    params: SimParams,
    flip: FlipState,
    rng: StdRng,
}

impl SandSimulation {
    /// New simulation seeded from the operating system.
    pub fn new(params: SimParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// New simulation with a reproducible random sequence.
    pub fn with_seed(params: SimParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut params: SimParams, rng: StdRng) -> Self {
        params.particle_count = params.particle_count.max(1);
        let mut simulation = Self {
            particles: SandParticles::new(params.particle_count),
            params,
            flip: FlipState::default(),
            rng,
        };
        simulation.reset();
        simulation
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn container(&self) -> &ContainerProfile {
        &self.params.container
    }

    pub fn particles(&self) -> &SandParticles {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn settled_count(&self) -> usize {
        self.particles.settled_count()
    }

    /// Interleaved `x, y, z` positions for every grain.
    pub fn positions(&self) -> &[f32] {
        self.particles.positions()
    }

    pub fn particle(&self, index: usize) -> Option<Particle> {
        self.particles.get(index)
    }

    pub fn particle_position(&self, index: usize) -> Option<Point> {
        self.particles.position(index)
    }

    pub fn particle_velocity(&self, index: usize) -> Option<Vector> {
        self.particles.velocities().get(index).copied()
    }

    pub fn particle_phase(&self, index: usize) -> Option<ParticlePhase> {
        self.particles.phases().get(index).copied()
    }

    /// Put one grain at a given state; it starts out falling.
    pub fn place_particle(&mut self, index: usize, position: Point, velocity: Vector) -> bool {
        let placed = self.particles.set(
            index,
            Particle {
                position,
                velocity,
                phase: ParticlePhase::Falling,
            },
        );
        if placed {
            self.particles.mark_dirty();
        }
        placed
    }

    /// Whether positions changed since the last call. Clears the signal.
    pub fn take_dirty(&mut self) -> bool {
        self.particles.take_dirty()
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_active()
    }

    pub fn flip_progress(&self) -> Real {
        self.flip.progress()
    }

    pub fn container_angle(&self) -> Real {
        self.flip.angle()
    }

    /// Start turning the container over. No-op while a flip is running.
    pub fn begin_flip(&mut self) -> bool {
        let started = self.flip.begin();
        if started {
            info!("hourglass flip started");
        }
        started
    }

    /// Scatter every grain back into the upper bulb at rest.
    pub fn reset(&mut self) {
        let params = &self.params;
        let rng = &mut self.rng;
        self.particles.for_each_mut(|position, velocity, phase| {
            *position = scatter_particle(params, rng);
            *velocity = zero_vector();
            *phase = ParticlePhase::Falling;
        });
        self.particles.mark_dirty();
        info!("sand reset: {} grains", self.particles.len());
    }

    /// One frame: move every grain, then run the flip clock.
    pub fn advance(&mut self, dt: Real) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.step_particles(dt);

        let flipped = self
            .flip
            .advance(dt, self.params.flip_speed, self.params.flip_threshold);
        if flipped {
            info!("hourglass flip complete");
            self.reset();
        }
    }

    /// Grain update only, without the flip clock.
    pub fn step_particles(&mut self, dt: Real) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let params = &self.params;
        let rng = &mut self.rng;
        self.particles.for_each_mut(|position, velocity, phase| {
            step_particle(position, velocity, phase, params, dt, rng);
        });
        self.particles.mark_dirty();
        debug!("sand step: {} settled", self.particles.settled_count());
    }
}
