use bevy::math::Vec3;

pub type Real = f32;

pub type Vector = Vec3;
pub type Point = Vec3;

#[inline(always)]
pub fn zero_vector() -> Vector {
    Vec3::ZERO
}

/// Distance from the vertical (Y) axis.
#[inline(always)]
pub fn horizontal_distance(x: Real, z: Real) -> Real {
    (x * x + z * z).sqrt()
}

/// Point on a circle of `radius` around the vertical axis at `height`.
#[inline(always)]
pub fn point_on_circle(angle: Real, radius: Real, height: Real) -> Point {
    Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_distance_ignores_height() {
        assert_eq!(horizontal_distance(3.0, 4.0), 5.0);
    }

    #[test]
    fn point_on_circle_keeps_radius() {
        let p = point_on_circle(1.3, 0.4, -0.2);
        assert!((horizontal_distance(p.x, p.z) - 0.4).abs() < 1e-6);
        assert_eq!(p.y, -0.2);
    }
}
