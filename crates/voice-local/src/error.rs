use thiserror::Error;

pub type Result<T, E = VoiceError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("audio device: {0}")]
    Device(String),
    #[error("audio stream: {0}")]
    Stream(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
    #[error("speech service request failed: {0}")]
    Http(String),
    #[error("backend not available: {0}")]
    Unsupported(String),
}
