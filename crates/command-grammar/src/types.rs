//! Typed commands produced by the parser

use core::fmt;
use serde::{Deserialize, Serialize};

/// Relative Cartesian move in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateDelta {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl CoordinateDelta {
    pub const fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }
}

impl fmt::Display for CoordinateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.dx, self.dy, self.dz)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GripperCommand {
    Open,
    Close,
}

/// A validated command, ready to be applied to the arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RobotCommand {
    Move(CoordinateDelta),
    Gripper(GripperCommand),
}

impl fmt::Display for RobotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotCommand::Move(delta) => write!(f, "move by {delta}"),
            RobotCommand::Gripper(GripperCommand::Open) => f.write_str("open gripper"),
            RobotCommand::Gripper(GripperCommand::Close) => f.write_str("close gripper"),
        }
    }
}

/// Textual shape of a raw oracle reply, decided before any number is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// Starts with `[` and ends with `]`.
    CoordinateList,
    /// Anything else that is not blank; only `0` and `1` are valid.
    GripperToken,
    Empty,
}
