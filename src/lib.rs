use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod geometry;
pub mod math;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{GRAVITY, PARTICLE_COUNT, SimParams};
pub use crate::core::{FlipState, Particle, ParticlePhase, SandParticles, SandSimulation};
pub use crate::geometry::{ContainerProfile, pile_height_at, radius_at};

/// Request to turn the hourglass over. Ignored while a flip is running.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct FlipRequest;

/// Runs the sand simulation once per frame.
///
/// Uses the `SimParams` resource when one was inserted before the plugin.
pub struct HourglassPlugin;

impl Plugin for HourglassPlugin {
    fn build(&self, app: &mut App) {
        let params = app
            .world()
            .get_resource::<SimParams>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(SandSimulation::new(params))
            .add_message::<FlipRequest>()
            .add_systems(Update, (handle_flip_requests, advance_sand).chain());
    }
}

pub fn handle_flip_requests(
    mut requests: MessageReader<FlipRequest>,
    mut simulation: ResMut<SandSimulation>,
) {
    for _ in requests.read() {
        simulation.begin_flip();
    }
}

pub fn advance_sand(time: Res<Time>, mut simulation: ResMut<SandSimulation>) {
    simulation.advance(time.delta_secs());
}
