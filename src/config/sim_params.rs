use bevy::prelude::*;

use super::constants::*;
use crate::geometry::ContainerProfile;

/// Runtime parameters for the sand simulation
#[derive(Resource, Clone, Debug)]
pub struct SimParams {
    /// Number of sand grains, fixed for the lifetime of a simulation
    pub particle_count: usize,

    /// Downward acceleration applied to every grain
    pub gravity: f32,

    /// Fraction of horizontal speed kept (and reversed) on wall contact
    pub wall_restitution: f32,

    /// Height above the pile surface at which a grain counts as landed
    pub settle_epsilon: f32,

    /// Upper bound of the random offset added to a landed grain's height
    pub settle_jitter: f32,

    /// Vertical band grains are scattered into on reset
    pub spawn_min_y: f32,
    pub spawn_max_y: f32,

    /// Fraction of the wall radius usable when scattering grains
    pub spawn_radius_scale: f32,

    /// Container rotation speed during a flip (rad/s)
    pub flip_speed: f32,

    /// Accumulated rotation that completes a flip (rad)
    pub flip_threshold: f32,

    pub container: ContainerProfile,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            gravity: GRAVITY,
            wall_restitution: WALL_RESTITUTION,
            settle_epsilon: SETTLE_EPSILON,
            settle_jitter: SETTLE_JITTER,
            spawn_min_y: SPAWN_MIN_Y,
            spawn_max_y: SPAWN_MAX_Y,
            spawn_radius_scale: SPAWN_RADIUS_SCALE,
            flip_speed: FLIP_SPEED,
            flip_threshold: FLIP_THRESHOLD,
            container: ContainerProfile::default(),
        }
    }
}

impl SimParams {
    /// Set the number of grains (at least one)
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count.max(1);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set wall restitution (0.0 to 1.0)
    pub fn with_wall_restitution(mut self, restitution: f32) -> Self {
        self.wall_restitution = restitution.clamp(0.0, 1.0);
        self
    }

    pub fn with_container(mut self, container: ContainerProfile) -> Self {
        self.container = container;
        self
    }
}
