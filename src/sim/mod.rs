mod components;
mod movement;
mod tic;

pub use components::{Command, MoveOutcome, Movement};
pub use movement::apply_command;
pub use tic::{FrameClock, SimError, SimRunner};
