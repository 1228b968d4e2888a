use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::OffsetDateTime;

/// Mono PCM samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
    /// When the recording finished.
    pub captured_at: OffsetDateTime,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
            captured_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate_hz == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate_hz as f64)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }
}

/// Speech-to-text backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriberConfig {
    /// `/v1/audio/transcriptions` endpoint for the HTTP backend.
    pub endpoint: String,
    pub model: String,
    pub language: Option<String>,
    /// Environment variable holding the bearer token, if any.
    pub api_key_env: String,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            language: Some("en".to_string()),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_from_length_and_rate() {
        let buf = AudioBuffer::new(vec![0.0; 48_000], 16_000);
        assert_eq!(buf.duration(), Duration::from_secs(3));
        assert_eq!(AudioBuffer::new(vec![0.0; 10], 0).duration(), Duration::ZERO);
    }

    #[test]
    fn peak_is_absolute() {
        let buf = AudioBuffer::new(vec![0.1, -0.7, 0.3], 16_000);
        assert_eq!(buf.peak(), 0.7);
    }
}
