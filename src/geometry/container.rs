//! Hourglass container geometry
//!
//! Wall radius as a function of height and the resting surface of the sand
//! pile in the lower bulb. Both are pure queries.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::config::constants::{
    BULB_AMPLITUDE, CONTAINER_Y_MAX, CONTAINER_Y_MIN, NECK_RADIUS, PILE_PEAK, PILE_RADIUS,
};
use crate::math::{Real, horizontal_distance};

/// Shape of the hourglass and its settled pile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerProfile {
    pub y_min: Real,
    pub y_max: Real,
    /// Extra radius at the bulb ends on top of the neck radius
    pub bulb_amplitude: Real,
    pub neck_radius: Real,
    /// Radius of the pile disk; no resting surface beyond it
    pub pile_radius: Real,
    /// Extra pile height at the centre, falling linearly to zero at the rim
    pub pile_peak: Real,
}

impl Default for ContainerProfile {
    fn default() -> Self {
        Self {
            y_min: CONTAINER_Y_MIN,
            y_max: CONTAINER_Y_MAX,
            bulb_amplitude: BULB_AMPLITUDE,
            neck_radius: NECK_RADIUS,
            pile_radius: PILE_RADIUS,
            pile_peak: PILE_PEAK,
        }
    }
}

impl ContainerProfile {
    pub fn height(&self) -> Real {
        self.y_max - self.y_min
    }

    /// Wall radius at height `y`.
    ///
    /// One cosine profile spans the whole container, so both bulbs come from
    /// the same curve: widest at `y_min`/`y_max`, narrowest at the neck.
    /// Heights outside the container are clamped to its extent.
    #[inline]
    pub fn radius_at(&self, y: Real) -> Real {
        let y = y.clamp(self.y_min, self.y_max);
        let normalized = (y - self.y_min) / self.height();
        (normalized * PI).cos().abs() * self.bulb_amplitude + self.neck_radius
    }

    /// Top of the settled pile below `(x, z)`, or `NEG_INFINITY` when the
    /// point is outside the pile disk and nothing supports a grain there.
    #[inline]
    pub fn pile_height_at(&self, x: Real, z: Real) -> Real {
        let distance = horizontal_distance(x, z);
        if distance > self.pile_radius {
            return Real::NEG_INFINITY;
        }
        self.y_min + (1.0 - distance / self.pile_radius) * self.pile_peak
    }

    /// Lathe profile of the glass as `(radius, y)` pairs from bottom to top.
    pub fn outline(&self, samples: usize) -> Vec<Vec2> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| {
                let y = self.y_min + self.height() * i as Real / samples as Real;
                Vec2::new(self.radius_at(y), y)
            })
            .collect()
    }
}

/// Wall radius of the default container.
#[inline]
pub fn radius_at(y: Real) -> Real {
    ContainerProfile::default().radius_at(y)
}

/// Pile surface of the default container.
#[inline]
pub fn pile_height_at(x: Real, z: Real) -> Real {
    ContainerProfile::default().pile_height_at(x, z)
}
