//! voice-local: fixed-window audio capture and transcription
//!
//! A voice command is one short recording: capture a mono buffer of a fixed
//! duration, then hand it to a transcriber. Both sides are traits so the
//! session can run against a microphone and a speech-to-text service, or
//! against in-process mocks.

mod types;
pub use types::{AudioBuffer, TranscriberConfig};

mod error;
pub use error::{Result, VoiceError};

mod traits;
pub use traits::{CaptureSource, Transcriber};

pub mod resample;

#[cfg(feature = "mock")]
mod mock;
#[cfg(feature = "mock")]
pub use mock::{MockCapture, MockTranscriber, ScriptedTranscriber};

#[cfg(feature = "audio")]
pub mod mic;

#[cfg(feature = "whisper_http")]
pub mod whisper_http;

pub mod plugin;
