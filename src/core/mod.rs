pub mod flip;
pub mod particle;
pub mod particle_set;
pub mod sand_state;

pub use flip::FlipState;
pub use particle::{Particle, ParticlePhase};
pub use particle_set::{POSITION_STRIDE, SandParticles};
pub use sand_state::SandSimulation;
