use std::time::{Duration, Instant};

use hecs::{Entity, World};
use thiserror::Error;

use super::{Command, MoveOutcome, Movement, movement};
use crate::world::{Grid, Pose};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("player entity {0:?} is missing from the sim world")]
    MissingPlayer(Entity),
}

/// Owns the ECS world and the player living in it.
///
/// The pose is only ever written through [`SimRunner::apply_command`];
/// the renderer gets copies via [`SimRunner::pose`].
pub struct SimRunner {
    world: World,
    player: Entity,
    movement: Movement,
}

impl SimRunner {
    /// Spawn the player at `start`. The caller guarantees `start` is open.
    pub fn new(start: Pose, movement: Movement) -> Self {
        let mut world = World::new();
        let player = world.spawn((start,));
        Self {
            world,
            player,
            movement,
        }
    }

    #[inline]
    pub fn player(&self) -> Entity {
        self.player
    }

    /// Snapshot of the player pose.
    pub fn pose(&self) -> Result<Pose, SimError> {
        let mut q = self
            .world
            .query_one::<&Pose>(self.player)
            .map_err(|_| SimError::MissingPlayer(self.player))?;
        q.get().copied().ok_or(SimError::MissingPlayer(self.player))
    }

    /// Apply one command, fully or not at all.
    pub fn apply_command(&mut self, grid: &Grid, cmd: Command) -> Result<MoveOutcome, SimError> {
        let pose = self
            .world
            .query_one_mut::<&mut Pose>(self.player)
            .map_err(|_| SimError::MissingPlayer(self.player))?;
        Ok(movement::apply_command(pose, grid, &self.movement, cmd))
    }
}

/// Fixed-period render cadence.
///
/// Missed ticks are coalesced: after a long stall `due` fires once, not
/// once per missed period.
pub struct FrameClock {
    period: Duration,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// `true` when a frame should be rendered now. The first call always is.
    pub fn due(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time left until the next tick.
    pub fn remaining(&self) -> Duration {
        match self.last {
            Some(last) => self.period.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
