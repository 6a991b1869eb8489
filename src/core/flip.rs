use std::f32::consts::TAU;

use crate::math::Real;

/// Progress of a container flip.
///
/// Rotation accumulates while a flip is active; the flip completes once the
/// accumulated progress reaches the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlipState {
    active: bool,
    progress: Real,
    angle: Real,
}

impl FlipState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> Real {
        self.progress
    }

    /// Container rotation about the Z axis, in `[0, 2π)`.
    pub fn angle(&self) -> Real {
        self.angle
    }

    /// Start a flip. Ignored (returns `false`) while one is in progress.
    pub fn begin(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.progress = 0.0;
        true
    }

    /// Rotate by `speed * dt`. Returns `true` on the frame the flip completes.
    pub fn advance(&mut self, dt: Real, speed: Real, threshold: Real) -> bool {
        if !self.active {
            return false;
        }

        let step = speed * dt;
        self.angle = (self.angle + step).rem_euclid(TAU);
        self.progress += step;

        if self.progress >= threshold {
            self.active = false;
            self.progress = 0.0;
            return true;
        }
        false
    }
}
