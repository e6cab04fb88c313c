//! Grid raycaster: a fixed-step ray marcher over a tile map, a column
//! projector and a tiny player movement model.
//!
//! ```text
//! Command ──► sim (pose + collision) ──┐
//!                                      ▼
//!                 engine::render_frame ─► march ─► project ─► Renderer
//! ```

pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;
