//! Offline oracles for development and testing

use crate::{CommandOracle, OracleError, OracleRequest, Result};
use regex::Regex;
use std::collections::VecDeque;

/// Replays a fixed sequence of replies and records every instruction sent.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    replies: VecDeque<Result<String>>,
    requests: Vec<String>,
}

impl ScriptedOracle {
    pub fn new(replies: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Instructions received so far, oldest first.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl CommandOracle for ScriptedOracle {
    fn complete(&mut self, request: &OracleRequest<'_>) -> Result<String> {
        self.requests.push(request.instruction.clone());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Unsupported("script exhausted".into())))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Step used when an utterance names a direction but no distance.
const DEFAULT_STEP_MM: f64 = 20.0;

const DIRECTION: &str = r"(left|right|forwards?|ahead|back(?:wards?)?|up|down)";
const UNIT: &str = r"(mm|millimet(?:er|re)s?|cm|centimet(?:er|re)s?)?";

/// Rule-based stand-in for a language model.
///
/// Follows the same contract as a real model: a `[x, y, z]` list for moves
/// and `0`/`1` for the gripper. Anything it cannot map is echoed back, which
/// the parser then rejects.
pub struct KeywordOracle {
    open: Regex,
    close: Regex,
    direction_first: Regex,
    number_first: Regex,
    direction_only: Regex,
}

impl KeywordOracle {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| OracleError::Unsupported(format!("keyword pattern: {e}")))
        };
        Ok(Self {
            open: compile(r"(?i)\b(open|release|let go)\b")?,
            close: compile(r"(?i)\b(close|grab|grip|grasp)\b")?,
            direction_first: compile(&format!(
                r"(?i)\b{DIRECTION}\b\D*?(\d+(?:\.\d+)?)\s*{UNIT}"
            ))?,
            number_first: compile(&format!(
                r"(?i)(\d+(?:\.\d+)?)\s*{UNIT}\s+(?:to\s+the\s+)?{DIRECTION}\b"
            ))?,
            direction_only: compile(&format!(r"(?i)\b{DIRECTION}\b"))?,
        })
    }

    fn interpret(&self, utterance: &str) -> String {
        if self.open.is_match(utterance) {
            return "0".to_string();
        }
        if self.close.is_match(utterance) {
            return "1".to_string();
        }

        let parsed = if let Some(c) = self.direction_first.captures(utterance) {
            Some((c.get(1), c.get(2), c.get(3)))
        } else if let Some(c) = self.number_first.captures(utterance) {
            Some((c.get(3), c.get(1), c.get(2)))
        } else {
            self.direction_only
                .captures(utterance)
                .map(|c| (c.get(1), None, None))
        };

        let Some((Some(direction), amount, unit)) = parsed else {
            return utterance.trim().to_string();
        };
        let amount = amount
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(DEFAULT_STEP_MM);
        let scale = match unit.map(|m| m.as_str().to_ascii_lowercase()) {
            Some(u) if u.starts_with('c') => 10.0,
            _ => 1.0,
        };
        let [x, y, z] = axis_delta(&direction.as_str().to_ascii_lowercase(), amount * scale);
        format!("[{x}, {y}, {z}]")
    }
}

/// Map a direction word to a base-frame delta: forward `+x`, left `+y`, up `+z`.
fn axis_delta(direction: &str, mm: f64) -> [f64; 3] {
    match direction {
        "left" => [0.0, mm, 0.0],
        "right" => [0.0, -mm, 0.0],
        "up" => [0.0, 0.0, mm],
        "down" => [0.0, 0.0, -mm],
        d if d.starts_with("back") => [-mm, 0.0, 0.0],
        _ => [mm, 0.0, 0.0],
    }
}

impl CommandOracle for KeywordOracle {
    fn complete(&mut self, request: &OracleRequest<'_>) -> Result<String> {
        Ok(self.interpret(request.utterance))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_follow_base_frame() -> Result<()> {
        let oracle = KeywordOracle::new()?;
        assert_eq!(oracle.interpret("go left 40"), "[0, 40, 0]");
        assert_eq!(oracle.interpret("Move right 12.5"), "[0, -12.5, 0]");
        assert_eq!(oracle.interpret("go forward 30"), "[30, 0, 0]");
        assert_eq!(oracle.interpret("move back 25 mm"), "[-25, 0, 0]");
        assert_eq!(oracle.interpret("down 3 cm"), "[0, 0, -30]");
        Ok(())
    }

    #[test]
    fn number_before_direction() -> Result<()> {
        let oracle = KeywordOracle::new()?;
        assert_eq!(oracle.interpret("40 to the left"), "[0, 40, 0]");
        assert_eq!(oracle.interpret("move 2 cm up"), "[0, 0, 20]");
        Ok(())
    }

    #[test]
    fn bare_direction_uses_default_step() -> Result<()> {
        let oracle = KeywordOracle::new()?;
        assert_eq!(oracle.interpret("a bit higher, go up"), "[0, 0, 20]");
        Ok(())
    }

    #[test]
    fn gripper_words() -> Result<()> {
        let oracle = KeywordOracle::new()?;
        assert_eq!(oracle.interpret("open the gripper"), "0");
        assert_eq!(oracle.interpret("Grab it"), "1");
        Ok(())
    }

    #[test]
    fn unknown_utterance_is_echoed() -> Result<()> {
        let oracle = KeywordOracle::new()?;
        assert_eq!(oracle.interpret(" hello there "), "hello there");
        Ok(())
    }

    #[test]
    fn scripted_oracle_runs_dry() {
        let mut oracle = ScriptedOracle::default();
        let req = OracleRequest {
            system: "",
            utterance: "x",
            instruction: "x".into(),
            timeout: std::time::Duration::from_secs(1),
        };
        assert!(oracle.complete(&req).is_err());
        assert_eq!(oracle.requests().len(), 1);
    }
}
