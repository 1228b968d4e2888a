use crate::{
    ArmGateway, GatewayError, GripperState, InterpolationMode, JointAngles, Pose, Result, Speed,
};

/// Kinds of gateway operation, used to inject failures into [`MockArm`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArmOp {
    ReadPose,
    MoveToPose,
    MoveToJoints,
    SetGripper,
    GripperPassThrough,
    EnableServos,
}

/// One recorded gateway invocation, including ones that were made to fail.
#[derive(Clone, Debug, PartialEq)]
pub enum ArmCall {
    ReadPose,
    MoveToPose {
        pose: Pose,
        speed: Speed,
        mode: InterpolationMode,
    },
    MoveToJoints {
        angles: JointAngles,
        speed: Speed,
    },
    SetGripper {
        state: GripperState,
        speed: Speed,
    },
    GripperPassThrough,
    EnableServos,
}

impl ArmCall {
    pub fn op(&self) -> ArmOp {
        match self {
            ArmCall::ReadPose => ArmOp::ReadPose,
            ArmCall::MoveToPose { .. } => ArmOp::MoveToPose,
            ArmCall::MoveToJoints { .. } => ArmOp::MoveToJoints,
            ArmCall::SetGripper { .. } => ArmOp::SetGripper,
            ArmCall::GripperPassThrough => ArmOp::GripperPassThrough,
            ArmCall::EnableServos => ArmOp::EnableServos,
        }
    }
}

/// In-process arm that reaches every commanded pose instantly.
#[derive(Debug, Default)]
pub struct MockArm {
    pose: Pose,
    gripper: Option<GripperState>,
    calls: Vec<ArmCall>,
    failing: Vec<ArmOp>,
}

impl MockArm {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            ..Self::default()
        }
    }

    /// Make every future call of `op` fail with [`GatewayError::Rejected`].
    pub fn fail_on(mut self, op: ArmOp) -> Self {
        self.failing.push(op);
        self
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn gripper(&self) -> Option<GripperState> {
        self.gripper
    }

    pub fn calls(&self) -> &[ArmCall] {
        &self.calls
    }

    pub fn count(&self, op: ArmOp) -> usize {
        self.calls.iter().filter(|c| c.op() == op).count()
    }

    fn record(&mut self, call: ArmCall) -> Result<()> {
        let op = call.op();
        self.calls.push(call);
        if self.failing.contains(&op) {
            return Err(GatewayError::Rejected(format!("mock arm refuses {op:?}")));
        }
        Ok(())
    }
}

impl ArmGateway for MockArm {
    fn read_pose(&mut self) -> Result<Pose> {
        self.record(ArmCall::ReadPose)?;
        Ok(self.pose)
    }

    fn move_to_pose(&mut self, pose: &Pose, speed: Speed, mode: InterpolationMode) -> Result<()> {
        self.record(ArmCall::MoveToPose {
            pose: *pose,
            speed,
            mode,
        })?;
        self.pose = *pose;
        Ok(())
    }

    fn move_to_joints(&mut self, angles: &JointAngles, speed: Speed) -> Result<()> {
        self.record(ArmCall::MoveToJoints {
            angles: *angles,
            speed,
        })
    }

    fn set_gripper_state(&mut self, state: GripperState, speed: Speed) -> Result<()> {
        self.record(ArmCall::SetGripper { state, speed })?;
        self.gripper = Some(state);
        Ok(())
    }

    fn set_gripper_pass_through(&mut self) -> Result<()> {
        self.record(ArmCall::GripperPassThrough)
    }

    fn enable_servos(&mut self) -> Result<()> {
        self.record(ArmCall::EnableServos)
    }
}
