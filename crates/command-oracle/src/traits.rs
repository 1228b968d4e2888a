use crate::Result;
use std::time::Duration;

/// One interpretation request.
#[derive(Debug, Clone)]
pub struct OracleRequest<'a> {
    /// Fixed system role.
    pub system: &'a str,
    /// The transcribed utterance, as heard.
    pub utterance: &'a str,
    /// The instruction template filled with `utterance`.
    pub instruction: String,
    /// Wall-clock budget for the whole call.
    pub timeout: Duration,
}

/// Text-in/text-out command oracle.
pub trait CommandOracle {
    /// Return the raw reply text. Implementations must give up after
    /// `request.timeout` and report [`crate::OracleError::Timeout`].
    fn complete(&mut self, request: &OracleRequest<'_>) -> Result<String>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
