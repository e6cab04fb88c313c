use glam::Vec2;

/// Player view-point on the map.
///
/// * `pos` is in cell units (cell `(x, y)` spans `[x, x+1) × [y, y+1)`).
/// * `angle` is in **degrees**, 0 = +X, growing towards +Y. Never
///   normalised: every consumer goes through `sin`/`cos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            angle,
        }
    }

    /// Unit vector the player is facing.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        let (s, c) = self.angle.to_radians().sin_cos();
        Vec2::new(c, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_follows_angle() {
        assert_eq!(Pose::new(0.0, 0.0, 0.0).forward(), Vec2::X);
        let f = Pose::new(0.0, 0.0, 90.0).forward();
        assert!((f - Vec2::Y).length() < 1e-6);
        let f = Pose::new(0.0, 0.0, -270.0).forward();
        assert!((f - Vec2::Y).length() < 1e-5);
    }
}
