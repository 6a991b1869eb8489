// src/solver/mod.rs
pub mod integrate;
pub mod scatter;

pub use integrate::*;
pub use scatter::*;
