mod grid;
mod pose;

pub use grid::{Cell, Grid, GridError, OPEN};
pub use pose::Pose;
