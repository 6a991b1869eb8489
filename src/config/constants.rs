// Default constants for the hourglass sand simulation
use std::f32::consts::PI;

// Particles
pub const PARTICLE_COUNT: usize = 10_000;

// Global physics
pub const GRAVITY: f32 = 0.5;
pub const WALL_RESTITUTION: f32 = 0.2;

// Pile contact
pub const SETTLE_EPSILON: f32 = 0.01;
pub const SETTLE_JITTER: f32 = 0.02;

// Reset scatter (upper bulb)
pub const SPAWN_MIN_Y: f32 = 0.3;
pub const SPAWN_MAX_Y: f32 = 1.8;
pub const SPAWN_RADIUS_SCALE: f32 = 0.95;

// Flip rotation, radians per second and radians
pub const FLIP_SPEED: f32 = PI;
pub const FLIP_THRESHOLD: f32 = PI;

// Container shape
pub const CONTAINER_Y_MIN: f32 = -1.25;
pub const CONTAINER_Y_MAX: f32 = 1.25;
pub const BULB_AMPLITUDE: f32 = 0.6;
pub const NECK_RADIUS: f32 = 0.1;
pub const PILE_RADIUS: f32 = 0.6;
pub const PILE_PEAK: f32 = 0.05;
