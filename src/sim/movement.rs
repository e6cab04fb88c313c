//! Whole-step movement with binary collision.
//!
//! A move either lands in an open cell or does not happen at all: no
//! sliding, no partial steps. Rotation never collides.

use tracing::trace;

use super::{Command, MoveOutcome, Movement};
use crate::world::{Grid, Pose};

/// Apply `cmd` to `pose`, consulting `grid` for moves.
pub fn apply_command(pose: &mut Pose, grid: &Grid, movement: &Movement, cmd: Command) -> MoveOutcome {
    match cmd {
        Command::RotateLeft => {
            pose.angle -= movement.rotation_step;
            MoveOutcome::Applied
        }
        Command::RotateRight => {
            pose.angle += movement.rotation_step;
            MoveOutcome::Applied
        }
        Command::MoveForward => try_move(pose, grid, movement.movement_step),
        Command::MoveBackward => try_move(pose, grid, -movement.movement_step),
    }
}

fn try_move(pose: &mut Pose, grid: &Grid, distance: f32) -> MoveOutcome {
    let target = pose.pos + pose.forward() * distance;

    /* off-map candidates count as walls */
    if grid.is_open(target) {
        pose.pos = target;
        MoveOutcome::Applied
    } else {
        trace!(from = %pose.pos, to = %target, "move blocked");
        MoveOutcome::Blocked
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
