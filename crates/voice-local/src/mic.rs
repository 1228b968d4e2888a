use crate::resample::{downmix, fit_length, resample_linear};
use crate::{AudioBuffer, CaptureSource, Result, VoiceError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default input device, recorded at its native format and converted to the
/// requested mono rate after each capture.
pub struct MicCapture {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
}

impl MicCapture {
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| VoiceError::Device("no default input device".into()))?;
        let config = device
            .default_input_config()
            .map_err(|e| VoiceError::Device(format!("input config: {e}")))?;
        info!(
            device = %device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate = config.sample_rate().0,
            channels = config.channels(),
            "microphone opened"
        );
        Ok(Self { device, config })
    }

    fn build_stream<T>(&self, sink: Arc<Mutex<Vec<f32>>>) -> Result<cpal::Stream>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let stream = self
            .device
            .build_input_stream(
                &self.config.config(),
                move |data: &[T], _| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend(data.iter().map(|s| s.to_sample::<f32>()));
                    }
                },
                |err| warn!("input stream error: {err}"),
                None,
            )
            .map_err(|e| VoiceError::Stream(e.to_string()))?;
        Ok(stream)
    }
}

impl CaptureSource for MicCapture {
    fn capture(&mut self, duration: Duration, sample_rate_hz: u32) -> Result<AudioBuffer> {
        let device_rate = self.config.sample_rate().0;
        let channels = self.config.channels() as usize;
        let sink = Arc::new(Mutex::new(Vec::with_capacity(
            (device_rate as f64 * duration.as_secs_f64()) as usize * channels,
        )));

        let stream = match self.config.sample_format() {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(sink.clone())?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(sink.clone())?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(sink.clone())?,
            other => {
                return Err(VoiceError::Unsupported(format!(
                    "sample format {other:?}"
                )))
            }
        };
        stream
            .play()
            .map_err(|e| VoiceError::Stream(format!("stream play: {e}")))?;
        std::thread::sleep(duration);
        drop(stream);

        let interleaved = sink
            .lock()
            .map_err(|_| VoiceError::Stream("capture buffer poisoned".into()))?
            .clone();
        let mono = downmix(&interleaved, channels);
        let resampled = resample_linear(&mono, device_rate, sample_rate_hz);
        let target_len = (sample_rate_hz as f64 * duration.as_secs_f64()) as usize;
        debug!(
            captured = mono.len(),
            device_rate,
            target_len,
            "capture finished"
        );
        Ok(AudioBuffer::new(
            fit_length(resampled, target_len),
            sample_rate_hz,
        ))
    }
}
