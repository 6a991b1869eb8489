//! Configuration and parameters
//!
//! Default constants and runtime simulation settings.

pub mod constants;
pub mod sim_params;

pub use constants::*;
pub use sim_params::*;
