use crate::renderer::{DrawCall, Region, Renderer, Rgba, Segment};

/// Back-end that keeps the calls instead of pixels.
///
/// `begin_frame` drops the previous frame's calls.
#[derive(Default, Debug)]
pub struct CommandList {
    calls: Vec<DrawCall>,
    width: usize,
    height: usize,
}

impl CommandList {
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Recorded segments of column `x`, in draw order.
    pub fn column(&self, x: usize) -> impl Iterator<Item = &Segment> {
        self.calls.iter().filter_map(move |c| match c {
            DrawCall::Segment(s) if s.x == x => Some(s),
            _ => None,
        })
    }
}

impl Renderer for CommandList {
    fn begin_frame(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.calls.clear();
    }

    fn clear(&mut self, region: Region) {
        self.calls.push(DrawCall::Clear(region));
    }

    fn draw_vertical_segment(&mut self, x: usize, y_start: i32, y_end: i32, colour: Rgba) {
        self.calls.push(DrawCall::Segment(Segment {
            x,
            y_start,
            y_end,
            colour,
        }));
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&[], self.width, self.height);
    }
}
