use crate::{AudioBuffer, Result};
use std::time::Duration;

/// On-demand recorder of a fixed-length mono buffer.
pub trait CaptureSource {
    /// Block for `duration` and return mono samples at `sample_rate_hz`.
    fn capture(&mut self, duration: Duration, sample_rate_hz: u32) -> Result<AudioBuffer>;
}

/// Best-effort speech-to-text.
pub trait Transcriber {
    /// Return the transcript, trimmed. Silence may yield an empty string.
    fn transcribe(&mut self, audio: &AudioBuffer) -> Result<String>;

    fn name(&self) -> &'static str;
}
