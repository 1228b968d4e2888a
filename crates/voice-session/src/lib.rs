//! voice-session: the voice-to-actuation command loop
//!
//! One cycle is: record a fixed window of audio, transcribe it, ask the
//! command oracle for a reply, parse that reply strictly and only then move
//! the arm or toggle the gripper. Any failure ends the cycle with no motion
//! and the session returns to the prompt. Startup and shutdown park the arm
//! at known configurations.

mod config;
pub use config::{RobotConfig, SessionConfig, VoiceArmConfig};

mod error;
pub use error::{CycleFailure, Result, SessionError};

pub mod apply;

pub mod console;
pub use console::{classify_input, Console, LineConsole, OperatorInput};

mod session;
pub use session::{
    interpret_recording, interpret_text, CycleOutcome, CycleReport, Interpretation, Session,
    SessionState, SessionSummary,
};
