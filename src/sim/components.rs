/// Directional command delivered by the platform input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
}

/// What happened to a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied,
    /// Candidate cell was a wall; pose untouched.
    Blocked,
}

/// Step sizes, fixed at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    pub movement_step: f32, // map units per MoveForward/MoveBackward
    pub rotation_step: f32, // degrees per RotateLeft/RotateRight
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            movement_step: 0.5,
            rotation_step: 5.0,
        }
    }
}
