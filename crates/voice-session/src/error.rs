use arm_gateway::GatewayError;
use command_grammar::ParseError;
use command_oracle::OracleError;
use thiserror::Error;
use voice_local::VoiceError;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("arm startup failed: {0}")]
    Startup(GatewayError),
    #[error("console error: {0}")]
    Console(#[from] std::io::Error),
}

pub type Result<T, E = SessionError> = core::result::Result<T, E>;

/// Why a single command cycle produced no motion.
///
/// Every variant is recoverable: the session logs it, tells the operator and
/// returns to the prompt.
#[derive(Debug, Error)]
pub enum CycleFailure {
    #[error("audio capture failed: {0}")]
    Capture(VoiceError),
    #[error("transcription failed: {0}")]
    Transcription(VoiceError),
    #[error("transcript {text:?} is too short or unclear ({len} of at least {min} characters)")]
    TranscriptTooShort {
        text: String,
        len: usize,
        min: usize,
    },
    #[error("command interpretation failed: {0}")]
    Oracle(OracleError),
    #[error("oracle reply rejected: {0}")]
    Parse(ParseError),
    #[error("arm did not accept the command: {0}")]
    Actuation(GatewayError),
}
