use core::fmt;
use serde::{Deserialize, Serialize};

/// Cartesian position of the end effector in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// End-effector orientation in degrees (roll, pitch, yaw about x, y, z).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Orientation {
    pub const fn new(rx: f64, ry: f64, rz: f64) -> Self {
        Self { rx, ry, rz }
    }
}

/// Six-scalar end-effector pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Position,
    pub orientation: Orientation,
}

impl Pose {
    pub const fn new(position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Build from `[x, y, z, rx, ry, rz]`, the order the arm reports coords in.
    pub const fn from_array(v: [f64; 6]) -> Self {
        Self {
            position: Position::new(v[0], v[1], v[2]),
            orientation: Orientation::new(v[3], v[4], v[5]),
        }
    }

    pub const fn to_array(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.rx,
            self.orientation.ry,
            self.orientation.rz,
        ]
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z, rx, ry, rz] = self.to_array();
        write!(f, "[{x:.2}, {y:.2}, {z:.2}, {rx:.2}, {ry:.2}, {rz:.2}]")
    }
}

/// Joint angles in degrees, base to wrist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointAngles(pub [f64; 6]);

impl JointAngles {
    pub const ZERO: JointAngles = JointAngles([0.0; 6]);
}

/// Motion speed as a percentage of the arm's maximum (1..=100).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub const MAX: Speed = Speed(100);

    pub fn new(percent: u8) -> Self {
        Self(percent.clamp(1, 100))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for Speed {
    fn from(v: u8) -> Self {
        Speed::new(v)
    }
}

impl From<Speed> for u8 {
    fn from(s: Speed) -> Self {
        s.0
    }
}

/// How the controller interpolates between the current and target pose.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Joint-space interpolation; the tool path is not a straight line.
    Joint,
    /// Straight-line Cartesian interpolation.
    Linear,
}

impl InterpolationMode {
    pub fn code(self) -> u8 {
        match self {
            InterpolationMode::Joint => 0,
            InterpolationMode::Linear => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GripperState {
    Open,
    Closed,
}

impl GripperState {
    pub fn code(self) -> u8 {
        match self {
            GripperState::Open => 0,
            GripperState::Closed => 1,
        }
    }
}

impl fmt::Display for GripperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GripperState::Open => f.write_str("open"),
            GripperState::Closed => f.write_str("closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_array_order_is_xyz_then_rotation() {
        let pose = Pose::from_array([-329.1, 104.6, 179.1, -179.46, -6.69, 95.57]);
        assert_eq!(pose.position.y, 104.6);
        assert_eq!(pose.orientation.rz, 95.57);
        assert_eq!(
            pose.to_array(),
            [-329.1, 104.6, 179.1, -179.46, -6.69, 95.57]
        );
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::new(30).get(), 30);
        assert_eq!(Speed::new(250).get(), 100);
    }

    #[test]
    fn pose_display() {
        let pose = Pose::from_array([0.0, 40.0, 0.0, -179.46, -6.69, 95.57]);
        assert_eq!(
            pose.to_string(),
            "[0.00, 40.00, 0.00, -179.46, -6.69, 95.57]"
        );
    }
}
