//! command-oracle: language-model interpretation of spoken commands
//!
//! The oracle is a text-in/text-out service. It is asked, under the fixed
//! instruction contract from `command-grammar`, to turn an utterance into a
//! single command reply. Nothing it returns is trusted: callers hand the reply
//! to [`command_grammar::parse_command`] before anything moves.

mod error;
pub use error::{OracleError, Result};

mod traits;
pub use traits::{CommandOracle, OracleRequest};

mod types;
pub use types::{OracleConfig, OracleKind};

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "openai")]
pub mod openai;

use std::time::Duration;
use tracing::{debug, info};

/// Ask the oracle to interpret one utterance.
///
/// Returns the trimmed reply. A blank reply is an error; a non-blank reply
/// is returned verbatim for the parser to accept or reject.
pub fn interpret(
    oracle: &mut dyn CommandOracle,
    utterance: &str,
    timeout: Duration,
) -> Result<String> {
    let request = OracleRequest {
        system: command_grammar::SYSTEM_ROLE,
        utterance,
        instruction: command_grammar::render_instruction(utterance),
        timeout,
    };
    debug!(
        oracle = oracle.name(),
        contract = command_grammar::CONTRACT_VERSION,
        prompt = %request.instruction,
        "sending instruction"
    );
    let reply = oracle.complete(&request)?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(OracleError::EmptyReply);
    }
    info!(oracle = oracle.name(), reply, "oracle replied");
    Ok(reply.to_string())
}

/// Create an oracle backend from configuration.
pub fn create_oracle(config: &OracleConfig) -> Result<Box<dyn CommandOracle>> {
    match config.kind {
        #[cfg(feature = "mock")]
        OracleKind::Keyword => Ok(Box::new(mock::KeywordOracle::new()?)),
        #[cfg(feature = "openai")]
        OracleKind::OpenAi => Ok(Box::new(openai::OpenAiOracle::new(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(OracleError::Unsupported(format!(
            "{other:?} oracle not enabled in this build"
        ))),
    }
}

#[cfg(all(test, feature = "mock"))]
mod tests {
    use super::*;
    use crate::mock::ScriptedOracle;

    #[test]
    fn interpret_trims_reply_and_sends_contract() -> Result<()> {
        let mut oracle = ScriptedOracle::new([Ok("  [0, 40, 0]\n".to_string())]);
        let reply = interpret(&mut oracle, "go left 40", Duration::from_secs(20))?;
        assert_eq!(reply, "[0, 40, 0]");
        let sent = oracle.requests();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].ends_with("The command is: go left 40"));
        Ok(())
    }

    #[test]
    fn blank_reply_is_an_error() {
        let mut oracle = ScriptedOracle::new([Ok(" \n ".to_string())]);
        let res = interpret(&mut oracle, "go left 40", Duration::from_secs(1));
        assert!(matches!(res, Err(OracleError::EmptyReply)));
    }

    #[test]
    fn keyword_oracle_is_default_offline_backend() -> Result<()> {
        let mut oracle = create_oracle(&OracleConfig {
            kind: OracleKind::Keyword,
            ..OracleConfig::default()
        })?;
        assert_eq!(oracle.name(), "keyword");
        let reply = interpret(oracle.as_mut(), "move up 15", Duration::from_secs(1))?;
        assert_eq!(reply, "[0, 0, 15]");
        Ok(())
    }
}
