use thiserror::Error;

pub type Result<T, E = GatewayError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("cannot reach arm at {0}")]
    Connect(String),
    #[error("I/O error: {0}")]
    Io(String),
    #[error("timeout waiting for arm reply")]
    Timeout,
    #[error("invalid reply: {0}")]
    InvalidReply(&'static str),
    #[error("arm rejected command: {0}")]
    Rejected(String),
    #[error("value out of range for {field}: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => GatewayError::Timeout,
            _ => GatewayError::Io(err.to_string()),
        }
    }
}
