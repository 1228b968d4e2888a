//! Whisper-compatible `/v1/audio/transcriptions` client.

use crate::{AudioBuffer, Result, Transcriber, TranscriberConfig, VoiceError};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::io::Cursor;
use tracing::{debug, warn};

pub struct WhisperHttpTranscriber {
    client: Client,
    endpoint: String,
    model: String,
    language: Option<String>,
    api_key: Option<String>,
}

impl WhisperHttpTranscriber {
    pub fn new(config: &TranscriberConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty());
        if api_key.is_none() {
            warn!(env = %config.api_key_env, "no API key for speech service");
        }
        let client = Client::builder()
            .build()
            .map_err(|e| VoiceError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            language: config.language.clone(),
            api_key,
        })
    }
}

/// Encode mono samples as a 16-bit PCM WAV file in memory.
pub fn encode_wav(audio: &AudioBuffer) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let wav_err = |e: hound::Error| VoiceError::Transcription(format!("wav encode: {e}"));
    let mut cursor = Cursor::new(Vec::with_capacity(audio.samples.len() * 2 + 44));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(wav_err)?;
        for &sample in &audio.samples {
            let pcm = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
            writer.write_sample(pcm).map_err(wav_err)?;
        }
        writer.finalize().map_err(wav_err)?;
    }
    Ok(cursor.into_inner())
}

/// Accept either `{"text": ...}` or a plain-text body.
fn extract_text(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .trim()
            .to_string(),
        Err(_) => body.trim().to_string(),
    }
}

impl Transcriber for WhisperHttpTranscriber {
    fn transcribe(&mut self, audio: &AudioBuffer) -> Result<String> {
        let wav = encode_wav(audio)?;
        let file = Part::bytes(wav)
            .file_name("command.wav")
            .mime_str("audio/wav")
            .map_err(|e| VoiceError::Http(e.to_string()))?;
        let mut form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("response_format", "json");
        if let Some(lang) = &self.language {
            form = form.text("language", lang.clone());
        }

        let mut req = self.client.post(&self.endpoint).multipart(form);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().map_err(|e| VoiceError::Http(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| VoiceError::Http(e.to_string()))?;
        if !status.is_success() {
            return Err(VoiceError::Http(format!("HTTP {status}: {body}")));
        }
        debug!(body = %body, "transcription response");
        Ok(extract_text(&body))
    }

    fn name(&self) -> &'static str {
        "whisper_http"
    }
}
