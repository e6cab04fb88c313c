use crate::engine::types::{Palette, Screen};
use crate::renderer::Segment;

/// One projected screen column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSlice {
    pub distance: f32,
    pub wall_half_height: i32,
    pub is_edge: bool,
}

/// True when two neighbouring half-heights differ by more than `threshold`.
#[inline]
pub fn is_edge(a: i32, b: i32, threshold: i32) -> bool {
    (a - b).abs() > threshold
}

/// Wall half-height for a ray of length `distance` (> 0).
#[inline]
pub fn wall_half_height(half_h: i32, distance: f32) -> i32 {
    (half_h as f32 / distance).floor() as i32
}

/// Project one column given the half-height of the column drawn before it.
pub fn project(distance: f32, half_h: i32, prev_half_height: i32, threshold: i32) -> ColumnSlice {
    let wall_half_height = wall_half_height(half_h, distance);
    ColumnSlice {
        distance,
        wall_half_height,
        is_edge: is_edge(wall_half_height, prev_half_height, threshold),
    }
}

impl ColumnSlice {
    /// The five segments of column `x`, in draw order:
    /// sky, wall body, top border, bottom border, floor.
    ///
    /// The borders are drawn after the body so their single pixel stays
    /// visible; edge columns paint the body in the border colour.
    pub fn segments(&self, x: usize, screen: &Screen, palette: &Palette) -> [Segment; 5] {
        let top = screen.half_h - self.wall_half_height;
        let bottom = screen.half_h + self.wall_half_height;
        let body = if self.is_edge {
            palette.border
        } else {
            palette.wall
        };
        let seg = |y_start, y_end, colour| Segment {
            x,
            y_start,
            y_end,
            colour,
        };
        [
            seg(0, top, palette.sky),
            seg(top, bottom, body),
            seg(top, top + 1, palette.border),
            seg(bottom - 1, bottom, palette.border),
            seg(bottom, screen.h as i32, palette.floor),
        ]
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
