use crate::protocol::{self, Command, Frame, GRIPPER_MODE_PASS_THROUGH};
use crate::{
    ArmGateway, GatewayError, GripperState, InterpolationMode, JointAngles, Pose, Result, Speed,
};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::{debug, info};

/// Replies with a different command code are skipped this many times before
/// the read is abandoned.
const MAX_STALE_FRAMES: usize = 8;

/// myCobot 320 driven through its Wi-Fi socket server.
pub struct MyCobotSocket {
    addr: String,
    stream: TcpStream,
}

impl MyCobotSocket {
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let sock_addr = addr
            .to_socket_addrs()
            .map_err(|e| GatewayError::Connect(format!("{addr}: {e}")))?
            .next()
            .ok_or_else(|| GatewayError::Connect(format!("{addr}: no address")))?;
        let stream = TcpStream::connect_timeout(&sock_addr, timeout)
            .map_err(|e| GatewayError::Connect(format!("{addr}: {e}")))?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;
        stream.set_nodelay(true)?;
        info!(%addr, "connected to arm");
        Ok(Self {
            addr: addr.to_string(),
            stream,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn send(&mut self, bytes: &[u8]) -> Result<()> {
        debug!(frame = ?bytes, "tx");
        self.stream.write_all(bytes)?;
        self.stream.flush()?;
        Ok(())
    }

    fn query(&mut self, cmd: Command) -> Result<Frame> {
        let bytes = protocol::encode_frame(cmd, &[])?;
        self.send(&bytes)?;
        for _ in 0..MAX_STALE_FRAMES {
            let frame = protocol::read_frame(&mut self.stream)?;
            debug!(cmd = frame.cmd, data = ?frame.data, "rx");
            if frame.cmd == cmd as u8 {
                return Ok(frame);
            }
        }
        Err(GatewayError::InvalidReply("no matching reply"))
    }
}

impl ArmGateway for MyCobotSocket {
    fn read_pose(&mut self) -> Result<Pose> {
        let frame = self.query(Command::GetCoords)?;
        protocol::decode_coords(&frame.data)
    }

    fn move_to_pose(&mut self, pose: &Pose, speed: Speed, mode: InterpolationMode) -> Result<()> {
        let bytes = protocol::encode_send_coords(pose, speed, mode)?;
        self.send(&bytes)
    }

    fn move_to_joints(&mut self, angles: &JointAngles, speed: Speed) -> Result<()> {
        let bytes = protocol::encode_send_angles(angles, speed)?;
        self.send(&bytes)
    }

    fn set_gripper_state(&mut self, state: GripperState, speed: Speed) -> Result<()> {
        let bytes = protocol::encode_gripper_state(state, speed)?;
        self.send(&bytes)
    }

    fn set_gripper_pass_through(&mut self) -> Result<()> {
        let bytes = protocol::encode_frame(Command::SetGripperMode, &[GRIPPER_MODE_PASS_THROUGH])?;
        self.send(&bytes)
    }

    fn enable_servos(&mut self) -> Result<()> {
        let bytes = protocol::encode_frame(Command::PowerOn, &[])?;
        self.send(&bytes)
    }
}
