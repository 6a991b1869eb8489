//! Per-grain time step
//!
//! Explicit Euler under gravity, then wall projection, then pile contact.
//! Grains never interact, so each step only sees its own state.

use rand::Rng;

use crate::config::SimParams;
use crate::core::ParticlePhase;
use crate::geometry::ContainerProfile;
use crate::math::{Point, Real, Vector, horizontal_distance, zero_vector};

/// Apply gravity to the velocity, then move the grain by it.
#[inline(always)]
pub fn integrate_gravity(position: &mut Point, velocity: &mut Vector, gravity: Real, dt: Real) {
    velocity.y -= gravity * dt;
    *position += *velocity * dt;
}

/// Project a grain that left the glass back onto the wall.
///
/// Horizontal velocity is reversed and scaled by `restitution`. A grain on the
/// axis is never outside the wall, so zero distance is skipped.
#[inline]
pub fn resolve_wall_contact(
    position: &mut Point,
    velocity: &mut Vector,
    container: &ContainerProfile,
    restitution: Real,
) -> bool {
    let radius = container.radius_at(position.y);
    let distance = horizontal_distance(position.x, position.z);

    if distance <= radius || distance == 0.0 {
        return false;
    }

    let factor = radius / distance;
    position.x *= factor;
    position.z *= factor;
    velocity.x *= -restitution;
    velocity.z *= -restitution;
    true
}

/// Land a grain that reached the pile surface.
///
/// The height is pinned to the surface plus a random offset below `jitter`
/// so the pile stays uneven, and the grain stops.
#[inline]
pub fn resolve_pile_contact<R: Rng + ?Sized>(
    position: &mut Point,
    velocity: &mut Vector,
    phase: &mut ParticlePhase,
    container: &ContainerProfile,
    epsilon: Real,
    jitter: Real,
    rng: &mut R,
) -> bool {
    let ground = container.pile_height_at(position.x, position.z);
    if position.y > ground + epsilon {
        return false;
    }

    position.y = ground + rng.random::<Real>() * jitter;
    *velocity = zero_vector();
    *phase = ParticlePhase::Settled;
    true
}

/// Full step for one grain.
#[inline]
pub fn step_particle<R: Rng + ?Sized>(
    position: &mut Point,
    velocity: &mut Vector,
    phase: &mut ParticlePhase,
    params: &SimParams,
    dt: Real,
    rng: &mut R,
) {
    integrate_gravity(position, velocity, params.gravity, dt);
    resolve_wall_contact(position, velocity, &params.container, params.wall_restitution);
    resolve_pile_contact(
        position,
        velocity,
        phase,
        &params.container,
        params.settle_epsilon,
        params.settle_jitter,
        rng,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn gravity_uses_updated_velocity() {
        let mut position = Vec3::new(0.0, 1.0, 0.0);
        let mut velocity = Vec3::ZERO;
        integrate_gravity(&mut position, &mut velocity, 0.5, 0.1);

        assert!((velocity.y + 0.05).abs() < 1e-6);
        assert!((position.y - 0.995).abs() < 1e-6);
    }

    #[test]
    fn wall_contact_projects_and_damps() {
        let container = ContainerProfile::default();
        let mut position = Vec3::new(0.5, 0.0, 0.0);
        let mut velocity = Vec3::new(1.0, -0.3, -0.5);

        assert!(resolve_wall_contact(&mut position, &mut velocity, &container, 0.2));
        assert!((position.x - container.radius_at(0.0)).abs() < 1e-6);
        assert!((velocity.x + 0.2).abs() < 1e-6);
        assert!((velocity.z - 0.1).abs() < 1e-6);
        assert_eq!(velocity.y, -0.3);
    }

    #[test]
    fn wall_contact_skips_grains_inside_or_on_axis() {
        let container = ContainerProfile::default();
        let mut velocity = Vec3::new(0.3, 0.0, 0.0);

        let mut inside = Vec3::new(0.05, 0.0, 0.0);
        assert!(!resolve_wall_contact(&mut inside, &mut velocity, &container, 0.2));

        let mut axis = Vec3::new(0.0, 0.0, 0.0);
        assert!(!resolve_wall_contact(&mut axis, &mut velocity, &container, 0.2));
        assert_eq!(velocity.x, 0.3);
    }

    #[test]
    fn pile_contact_settles_within_jitter_band() {
        let container = ContainerProfile::default();
        let mut rng = StdRng::seed_from_u64(9);
        let ground = container.pile_height_at(0.1, 0.1);

        let mut position = Vec3::new(0.1, ground + 0.005, 0.1);
        let mut velocity = Vec3::new(0.0, -1.0, 0.0);
        let mut phase = ParticlePhase::Falling;

        assert!(resolve_pile_contact(
            &mut position,
            &mut velocity,
            &mut phase,
            &container,
            0.01,
            0.02,
            &mut rng,
        ));
        assert_eq!(velocity, Vec3::ZERO);
        assert_eq!(phase, ParticlePhase::Settled);
        assert!(position.y >= ground && position.y <= ground + 0.02);
    }

    #[test]
    fn pile_contact_ignores_unsupported_region() {
        let container = ContainerProfile::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut position = Vec3::new(0.65, -3.0, 0.0);
        let mut velocity = Vec3::new(0.0, -1.0, 0.0);
        let mut phase = ParticlePhase::Falling;

        assert!(!resolve_pile_contact(
            &mut position,
            &mut velocity,
            &mut phase,
            &container,
            0.01,
            0.02,
            &mut rng,
        ));
        assert_eq!(phase, ParticlePhase::Falling);
    }
}
