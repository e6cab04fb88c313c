use crate::renderer::Rgba;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: i32, // horizon row; odd heights round down
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_h: (h / 2) as i32,
        }
    }
}

/// Ray-casting constants shared by every column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub fov: f32,             // degrees
    pub half_fov: f32,        // pre-derived for speed
    pub increment_angle: f32, // degrees between neighbouring columns
    pub precision: f32,       // march steps per map unit
    pub edge_threshold: i32,  // px of half-height jump that marks an edge
}

impl Projection {
    pub fn new(fov: f32, screen_w: usize, precision: f32, edge_threshold: i32) -> Self {
        Self {
            fov,
            half_fov: fov * 0.5,
            increment_angle: fov / screen_w as f32,
            precision,
            edge_threshold,
        }
    }

    /// Direction of the ray through screen column `x`, in degrees.
    #[inline]
    pub fn ray_angle(&self, view_angle: f32, x: usize) -> f32 {
        view_angle - self.half_fov + x as f32 * self.increment_angle
    }
}

/// Flat colours for the four bands of a column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub sky: Rgba,
    pub floor: Rgba,
    pub wall: Rgba,
    pub border: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: 0x00_6495ED,    // cornflowerblue
            floor: 0x00_A0522D,  // sienna
            wall: 0x00_808080,   // gray
            border: 0x00_696969, // dimgray
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_column_starts_half_fov_left() {
        let p = Projection::new(60.0, 640, 64.0, 8);
        assert_eq!(p.increment_angle, 0.09375);
        assert_eq!(p.ray_angle(90.0, 0), 60.0);
        assert_eq!(p.ray_angle(90.0, 320), 90.0);
        assert_eq!(p.ray_angle(90.0, 640), 120.0);
    }

    #[test]
    fn odd_heights_round_horizon_down() {
        assert_eq!(Screen::new(640, 480).half_h, 240);
        assert_eq!(Screen::new(640, 481).half_h, 240);
    }
}
