#[cfg(feature = "audio")]
use crate::mic::MicCapture;
#[cfg(feature = "whisper_http")]
use crate::whisper_http::WhisperHttpTranscriber;
#[cfg(feature = "mock")]
use crate::{MockCapture, MockTranscriber};
use crate::{CaptureSource, Result, Transcriber, TranscriberConfig};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaptureBackendKind {
    Mock,
    Microphone,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TranscriberBackendKind {
    Mock,
    WhisperHttp,
}

pub fn new_capture_backend(kind: CaptureBackendKind) -> Result<Box<dyn CaptureSource>> {
    match kind {
        CaptureBackendKind::Mock => {
            #[cfg(feature = "mock")]
            {
                Ok(Box::new(MockCapture::new()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::VoiceError::Unsupported("mock feature not enabled".into()))
            }
        }
        CaptureBackendKind::Microphone => {
            #[cfg(feature = "audio")]
            {
                MicCapture::open_default().map(|m| Box::new(m) as Box<dyn CaptureSource>)
            }
            #[cfg(not(feature = "audio"))]
            {
                Err(crate::VoiceError::Unsupported(
                    "built without the `audio` feature; rebuild with `--features audio` or pass --mock"
                        .into(),
                ))
            }
        }
    }
}

pub fn new_transcriber_backend(
    kind: TranscriberBackendKind,
    cfg: &TranscriberConfig,
) -> Result<Box<dyn Transcriber>> {
    match kind {
        TranscriberBackendKind::Mock => {
            #[cfg(feature = "mock")]
            {
                let _ = cfg;
                Ok(Box::new(MockTranscriber::default()))
            }
            #[cfg(not(feature = "mock"))]
            {
                Err(crate::VoiceError::Unsupported("mock feature not enabled".into()))
            }
        }
        TranscriberBackendKind::WhisperHttp => {
            #[cfg(feature = "whisper_http")]
            {
                WhisperHttpTranscriber::new(cfg).map(|t| Box::new(t) as Box<dyn Transcriber>)
            }
            #[cfg(not(feature = "whisper_http"))]
            {
                let _ = cfg;
                Err(crate::VoiceError::Unsupported(
                    "built without the `whisper_http` feature; rebuild with `--features whisper_http` or pass --mock"
                        .into(),
                ))
            }
        }
    }
}
