use thiserror::Error;

pub type Result<T, E = OracleError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Http(String),
    #[error("oracle returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("oracle did not answer within the timeout")]
    Timeout,
    #[error("oracle returned an empty reply")]
    EmptyReply,
    #[error("malformed oracle response: {0}")]
    Malformed(String),
    #[error("oracle unavailable: {0}")]
    Unsupported(String),
}
