//! myCobot frame codec.
//!
//! Frames are `FE FE <len> <cmd> <data..> FA` with `len = data.len() + 2`.
//! Multi-byte values are big-endian `i16`. Coordinates are sent as
//! `x, y, z` scaled by 10 and `rx, ry, rz` scaled by 100; joint angles are
//! scaled by 100.

use crate::{GatewayError, GripperState, InterpolationMode, JointAngles, Pose, Result, Speed};
use std::io::Read;

pub const HEADER: u8 = 0xFE;
pub const FOOTER: u8 = 0xFA;

/// Command codes understood by the arm firmware.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    PowerOn = 0x10,
    SendAngles = 0x22,
    GetCoords = 0x23,
    SendCoords = 0x25,
    SetGripperState = 0x66,
    SetGripperMode = 0x6D,
}

/// Gripper mode value for pass-through (transparent) control.
pub const GRIPPER_MODE_PASS_THROUGH: u8 = 0;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub cmd: u8,
    pub data: Vec<u8>,
}

pub fn encode_frame(cmd: Command, data: &[u8]) -> Result<Vec<u8>> {
    let len = u8::try_from(data.len() + 2).map_err(|_| GatewayError::OutOfRange {
        field: "frame length",
        value: data.len() as f64,
    })?;
    let mut out = Vec::with_capacity(data.len() + 5);
    out.extend_from_slice(&[HEADER, HEADER, len, cmd as u8]);
    out.extend_from_slice(data);
    out.push(FOOTER);
    Ok(out)
}

fn scaled(field: &'static str, value: f64, scale: f64) -> Result<[u8; 2]> {
    let v = (value * scale).round();
    if !v.is_finite() || v < i16::MIN as f64 || v > i16::MAX as f64 {
        return Err(GatewayError::OutOfRange { field, value });
    }
    Ok((v as i16).to_be_bytes())
}

pub fn encode_send_coords(pose: &Pose, speed: Speed, mode: InterpolationMode) -> Result<Vec<u8>> {
    let [x, y, z, rx, ry, rz] = pose.to_array();
    let mut data = Vec::with_capacity(14);
    data.extend_from_slice(&scaled("x", x, 10.0)?);
    data.extend_from_slice(&scaled("y", y, 10.0)?);
    data.extend_from_slice(&scaled("z", z, 10.0)?);
    data.extend_from_slice(&scaled("rx", rx, 100.0)?);
    data.extend_from_slice(&scaled("ry", ry, 100.0)?);
    data.extend_from_slice(&scaled("rz", rz, 100.0)?);
    data.push(speed.get());
    data.push(mode.code());
    encode_frame(Command::SendCoords, &data)
}

pub fn encode_send_angles(angles: &JointAngles, speed: Speed) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(13);
    for a in angles.0 {
        data.extend_from_slice(&scaled("joint angle", a, 100.0)?);
    }
    data.push(speed.get());
    encode_frame(Command::SendAngles, &data)
}

pub fn encode_gripper_state(state: GripperState, speed: Speed) -> Result<Vec<u8>> {
    encode_frame(Command::SetGripperState, &[state.code(), speed.get()])
}

pub fn decode_coords(data: &[u8]) -> Result<Pose> {
    if data.len() != 12 {
        return Err(GatewayError::InvalidReply("coords payload must be 12 bytes"));
    }
    let mut v = [0.0f64; 6];
    for (i, chunk) in data.chunks_exact(2).enumerate() {
        let raw = i16::from_be_bytes([chunk[0], chunk[1]]) as f64;
        v[i] = if i < 3 { raw / 10.0 } else { raw / 100.0 };
    }
    Ok(Pose::from_array(v))
}

/// Read one frame, skipping any bytes before the double header.
pub fn read_frame(reader: &mut impl Read) -> Result<Frame> {
    let mut byte = [0u8; 1];
    let mut prev_header = false;
    loop {
        reader.read_exact(&mut byte)?;
        if byte[0] == HEADER && prev_header {
            break;
        }
        prev_header = byte[0] == HEADER;
    }
    reader.read_exact(&mut byte)?;
    let len = byte[0] as usize;
    if len < 2 {
        return Err(GatewayError::InvalidReply("frame length below 2"));
    }
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    if body.last() != Some(&FOOTER) {
        return Err(GatewayError::InvalidReply("missing frame footer"));
    }
    let cmd = body[0];
    let data = body[1..len - 1].to_vec();
    Ok(Frame { cmd, data })
}
