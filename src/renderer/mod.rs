//! Rendering abstraction layer.
//!
//! *The rest of the engine never touches a pixel buffer directly.*
//! A frame is a `clear` followed by a stream of vertical segments, handed
//! to a type that implements [`Renderer`].
//!
//! * [`Software`] rasterises into a CPU frame-buffer for a window.
//! * [`CommandList`] only records the calls (tests, tooling).
//! * A blanket‐impl [`RendererExt`] replays a recorded list on any back-end.

mod record;
mod software;

pub use record::CommandList;
pub use software::Software;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Axis-aligned screen rectangle, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Region {
    /// The whole `w × h` screen.
    pub fn full(w: usize, h: usize) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// One screen-column slice: rows `y_start .. y_end` (half-open) of column
/// `x`. Rows may lie off-screen; back-ends clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: usize,
    pub y_start: i32,
    pub y_end: i32,
    pub colour: Rgba,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawCall {
    Clear(Region),
    Segment(Segment),
}

/// A line-drawing surface that owns its scratch for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Erase everything previously drawn inside `region`.
    fn clear(&mut self, region: Region);

    /// Draw rows `y_start .. y_end` of column `x` in `colour`.
    fn draw_vertical_segment(&mut self, x: usize, y_start: i32, y_end: i32, colour: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * Back-ends without pixels pass an empty slice.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl: replay recorded calls.
pub trait RendererExt: Renderer {
    fn replay(&mut self, calls: &[DrawCall]) {
        for c in calls {
            match *c {
                DrawCall::Clear(r) => self.clear(r),
                DrawCall::Segment(s) => {
                    self.draw_vertical_segment(s.x, s.y_start, s.y_end, s.colour)
                }
            }
        }
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
