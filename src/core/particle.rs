//! Sand grain state
//!
//! Grains carry a position, a velocity and a landing phase.

use crate::math::{Point, Vector};

/// Landing phase of a grain.
///
/// A grain only moves from `Settled` back to `Falling` through a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParticlePhase {
    #[default]
    Falling,
    Settled,
}

impl ParticlePhase {
    #[inline(always)]
    pub fn is_settled(self) -> bool {
        self == Self::Settled
    }
}

/// Copy of one grain's state, for inspection outside the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    pub velocity: Vector,
    pub phase: ParticlePhase,
}

impl Particle {
    #[inline(always)]
    pub fn is_settled(&self) -> bool {
        self.phase.is_settled()
    }
}
