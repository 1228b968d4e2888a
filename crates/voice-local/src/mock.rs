use crate::{AudioBuffer, CaptureSource, Result, Transcriber, VoiceError};
use std::collections::VecDeque;
use std::time::Duration;

/// Produces a quiet 440 Hz tone of the requested length.
#[derive(Debug, Default)]
pub struct MockCapture {
    fail: bool,
    captures: usize,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capture source whose device is always unavailable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            captures: 0,
        }
    }

    pub fn captures(&self) -> usize {
        self.captures
    }
}

impl CaptureSource for MockCapture {
    fn capture(&mut self, duration: Duration, sample_rate_hz: u32) -> Result<AudioBuffer> {
        self.captures += 1;
        if self.fail {
            return Err(VoiceError::Device("mock input device unplugged".into()));
        }
        let sr = sample_rate_hz.max(8000);
        let frames = (duration.as_secs_f64() * sr as f64) as usize;
        let freq = 440.0_f32;
        let samples = (0..frames)
            .map(|n| {
                let t = n as f32 / sr as f32;
                (2.0 * std::f32::consts::PI * freq * t).sin() * 0.1
            })
            .collect();
        Ok(AudioBuffer::new(samples, sr))
    }
}

/// Cycles through a fixed list of utterances, one per call.
pub struct MockTranscriber {
    phrases: Vec<String>,
    counter: usize,
}

impl MockTranscriber {
    pub fn new(phrases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            counter: 0,
        }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new(["go left 40", "move up 20", "close the gripper", "open the gripper"])
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&mut self, _audio: &AudioBuffer) -> Result<String> {
        if self.phrases.is_empty() {
            return Ok(String::new());
        }
        let text = self.phrases[self.counter % self.phrases.len()].clone();
        self.counter += 1;
        Ok(text)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Returns queued results in order, then empty transcripts.
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    script: VecDeque<Result<String>>,
    calls: usize,
}

impl ScriptedTranscriber {
    pub fn new(script: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Transcriber for ScriptedTranscriber {
    fn transcribe(&mut self, _audio: &AudioBuffer) -> Result<String> {
        self.calls += 1;
        self.script.pop_front().unwrap_or_else(|| Ok(String::new()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_has_requested_length() -> Result<()> {
        let mut cap = MockCapture::new();
        let buf = cap.capture(Duration::from_secs(3), 16_000)?;
        assert_eq!(buf.samples.len(), 48_000);
        assert_eq!(buf.sample_rate_hz, 16_000);
        assert!(buf.peak() <= 0.1 + f32::EPSILON);
        assert_eq!(cap.captures(), 1);
        Ok(())
    }

    #[test]
    fn failing_capture_reports_device_error() {
        let mut cap = MockCapture::failing();
        assert!(matches!(
            cap.capture(Duration::from_secs(1), 16_000),
            Err(VoiceError::Device(_))
        ));
    }

    #[test]
    fn mock_transcriber_cycles() -> Result<()> {
        let mut t = MockTranscriber::new(["a b c", "d e f"]);
        let buf = AudioBuffer::new(vec![], 16_000);
        assert_eq!(t.transcribe(&buf)?, "a b c");
        assert_eq!(t.transcribe(&buf)?, "d e f");
        assert_eq!(t.transcribe(&buf)?, "a b c");
        Ok(())
    }

    #[test]
    fn scripted_transcriber_drains_then_goes_quiet() -> Result<()> {
        let mut t = ScriptedTranscriber::new([Ok("hello".to_string())]);
        let buf = AudioBuffer::new(vec![], 16_000);
        assert_eq!(t.transcribe(&buf)?, "hello");
        assert_eq!(t.transcribe(&buf)?, "");
        assert_eq!(t.calls(), 2);
        Ok(())
    }
}
