//! ---------------------------------------------------------------------------
//! Software (CPU) column renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * Segments are clipped to the screen, so callers may hand in wall
//!   slices taller than the viewport.
//! ---------------------------------------------------------------------------

use crate::renderer::{Region, Renderer, Rgba};

/// What `clear` leaves behind: transparent black.
pub const CLEAR_COLOUR: Rgba = 0x00_000000;

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.scratch[y * self.width + x]
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.clear();
            self.scratch.resize(w * h, CLEAR_COLOUR);
        }
    }

    fn clear(&mut self, r: Region) {
        let x_end = (r.x + r.w).min(self.width);
        let y_end = (r.y + r.h).min(self.height);
        if r.x >= x_end {
            return;
        }
        for y in r.y..y_end {
            let row = y * self.width;
            self.scratch[row + r.x..row + x_end].fill(CLEAR_COLOUR);
        }
    }

    fn draw_vertical_segment(&mut self, x: usize, y_start: i32, y_end: i32, colour: Rgba) {
        if x >= self.width {
            return;
        }
        /* clip to integer pixel rows */
        let y0 = y_start.max(0) as usize;
        let y1 = y_end.clamp(0, self.height as i32) as usize;

        let mut idx = y0 * self.width + x;
        for _ in y0..y1 {
            self.scratch[idx] = colour;
            idx += self.width;
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
