use crate::{GripperState, InterpolationMode, JointAngles, Pose, Result, Speed};

/// A minimal blocking arm interface.
///
/// Every command is fire-and-confirm: it returns once the backend has
/// accepted it, and the caller owns any waiting for physical settling.
pub trait ArmGateway {
    /// Read the live end-effector pose.
    fn read_pose(&mut self) -> Result<Pose>;

    /// Command an absolute Cartesian pose.
    fn move_to_pose(&mut self, pose: &Pose, speed: Speed, mode: InterpolationMode) -> Result<()>;

    /// Command absolute joint angles (used for the joint-zero pose).
    fn move_to_joints(&mut self, angles: &JointAngles, speed: Speed) -> Result<()>;

    fn set_gripper_state(&mut self, state: GripperState, speed: Speed) -> Result<()>;

    /// Put the gripper into pass-through (transparent) control mode.
    fn set_gripper_pass_through(&mut self) -> Result<()>;

    /// Power and lock all servos. Backends without servo control accept it.
    fn enable_servos(&mut self) -> Result<()> {
        Ok(())
    }
}
