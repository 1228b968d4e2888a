//! Turning a validated command into gateway calls.

use crate::SessionConfig;
use arm_gateway::{ArmGateway, GripperState, InterpolationMode, Orientation, Pose, Position};
use command_grammar::{CoordinateDelta, GripperCommand};
use tracing::info;

/// Target pose for a relative move: the current position plus the delta,
/// always with the fixed orientation.
pub fn target_pose(current: &Pose, delta: &CoordinateDelta, orientation: Orientation) -> Pose {
    let p = current.position;
    Pose::new(
        Position::new(p.x + delta.dx, p.y + delta.dy, p.z + delta.dz),
        orientation,
    )
}

pub fn gripper_state(command: GripperCommand) -> GripperState {
    match command {
        GripperCommand::Open => GripperState::Open,
        GripperCommand::Close => GripperState::Closed,
    }
}

/// Read the live pose, then move linearly to pose + delta.
///
/// The pose is read fresh on every call so the delta is relative to where
/// the arm actually is, not where it was last told to go.
pub fn apply_delta(
    arm: &mut dyn ArmGateway,
    delta: &CoordinateDelta,
    config: &SessionConfig,
) -> arm_gateway::Result<Pose> {
    let current = arm.read_pose()?;
    let target = target_pose(&current, delta, config.fixed_orientation);
    info!(%current, %delta, %target, "moving arm");
    arm.move_to_pose(&target, config.move_speed, InterpolationMode::Linear)?;
    Ok(target)
}

pub fn apply_gripper(
    arm: &mut dyn ArmGateway,
    command: GripperCommand,
    config: &SessionConfig,
) -> arm_gateway::Result<GripperState> {
    let state = gripper_state(command);
    info!(%state, "setting gripper");
    arm.set_gripper_state(state, config.gripper_speed)?;
    Ok(state)
}
