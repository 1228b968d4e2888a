//! arm-gateway: actuator gateway abstractions for 6-axis arms
//!
//! This crate exposes the narrow interface the voice session drives: read the
//! current Cartesian pose, command an absolute pose, command joint angles and
//! toggle the gripper. The default build enables a `mock` backend so binaries
//! and tests run on any host; the `mycobot` feature adds a TCP backend for the
//! myCobot 320 socket server.

mod types;
pub use types::{GripperState, InterpolationMode, JointAngles, Orientation, Pose, Position, Speed};

mod error;
pub use error::{GatewayError, Result};

mod traits;
pub use traits::ArmGateway;

pub mod protocol;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{ArmCall, ArmOp, MockArm};

#[cfg(feature = "mycobot")]
mod mycobot;

#[cfg(feature = "mycobot")]
pub use mycobot::MyCobotSocket;
