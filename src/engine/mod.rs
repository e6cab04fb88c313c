mod engine;
mod march;
mod projection;
mod types;

pub use engine::Engine;
pub use march::{RayHit, march};
pub use projection::{ColumnSlice, is_edge, project, wall_half_height};
pub use types::{Palette, Projection, Screen};
