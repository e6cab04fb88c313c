use tracing::debug;

use crate::{
    config::Settings,
    engine::{
        march::march,
        projection::{ColumnSlice, project},
        types::{Palette, Projection, Screen},
    },
    renderer::{Region, Renderer, Rgba},
    sim::{Command, MoveOutcome, SimError, SimRunner},
    world::{Grid, Pose},
};

/// Everything one view needs: the map, the player, the camera constants
/// and the surface it draws on. No state lives outside this struct.
pub struct Engine<R: Renderer> {
    pub renderer: R,
    grid: Grid,
    sim: SimRunner,
    screen: Screen,
    projection: Projection,
    palette: Palette,
}

impl<R: Renderer> Engine<R> {
    pub fn new(renderer: R, settings: Settings) -> Self {
        let Settings {
            grid,
            screen,
            projection,
            palette,
            movement,
            start,
            ..
        } = settings;
        debug!(
            w = screen.w,
            h = screen.h,
            fov = projection.fov,
            precision = projection.precision,
            map_w = grid.width(),
            map_h = grid.height(),
            "engine ready"
        );
        Self {
            renderer,
            grid,
            sim: SimRunner::new(start, movement),
            screen,
            projection,
            palette,
        }
    }

    pub fn pose(&self) -> Result<Pose, SimError> {
        self.sim.pose()
    }

    /// Input entry point: apply one directional command right away.
    pub fn apply_command(&mut self, cmd: Command) -> Result<MoveOutcome, SimError> {
        self.sim.apply_command(&self.grid, cmd)
    }

    /// Cast and project screen column `x` for `pose`.
    pub fn cast_column(&self, pose: &Pose, x: usize, prev_half_height: i32) -> ColumnSlice {
        let angle = self.projection.ray_angle(pose.angle, x);
        let hit = march(&self.grid, pose.pos, angle, self.projection.precision);
        project(
            hit.distance,
            self.screen.half_h,
            prev_half_height,
            self.projection.edge_threshold,
        )
    }

    /// Frame tick: clear, then sweep every column left to right.
    ///
    /// The pose is read once up front, so the whole frame shows a single
    /// player state.
    pub fn render_frame(&mut self) -> Result<(), SimError> {
        let pose = self.sim.pose()?;
        let Screen { w, h, .. } = self.screen;

        self.renderer.begin_frame(w, h);
        self.renderer.clear(Region::full(w, h));

        let mut prev_half_height = 0;
        for x in 0..w {
            let slice = self.cast_column(&pose, x, prev_half_height);
            for seg in slice.segments(x, &self.screen, &self.palette) {
                self.renderer
                    .draw_vertical_segment(seg.x, seg.y_start, seg.y_end, seg.colour);
            }
            prev_half_height = slice.wall_half_height;
        }
        Ok(())
    }

    /// Hand the finished frame to `submit` (window upload, file dump, …).
    pub fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        self.renderer.end_frame(submit);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
