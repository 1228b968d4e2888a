//! Strict parser for oracle replies
//!
//! Classification looks only at the textual shape of the trimmed reply. A
//! reply that merely resembles a command is rejected rather than guessed at.

use crate::{CoordinateDelta, GripperCommand, OutputShape, ParseError, RobotCommand};
use tracing::debug;

/// Non-ASCII code points a model may emit in place of `-`: every character
/// in Unicode general category Pd (dash punctuation), plus the minus sign.
pub fn is_dash_variant(c: char) -> bool {
    matches!(
        c,
        '\u{058A}' // armenian hyphen
            | '\u{05BE}' // hebrew maqaf
            | '\u{1400}' // canadian syllabics hyphen
            | '\u{1806}' // mongolian todo soft hyphen
            | '\u{2010}'..='\u{2015}' // hyphen through horizontal bar
            | '\u{2212}' // minus sign
            | '\u{2E17}' // double oblique hyphen
            | '\u{2E1A}' // hyphen with diaeresis
            | '\u{2E3A}' | '\u{2E3B}' // two- and three-em dash
            | '\u{2E40}' // double hyphen
            | '\u{2E5D}' // oblique hyphen
            | '\u{301C}' // wave dash
            | '\u{3030}' // wavy dash
            | '\u{30A0}' // katakana double hyphen
            | '\u{FE31}' | '\u{FE32}' // vertical em and en dash
            | '\u{FE58}' // small em dash
            | '\u{FE63}' // small hyphen-minus
            | '\u{FF0D}' // fullwidth hyphen-minus
            | '\u{10EAD}' // yezidi hyphenation mark
    )
}

pub fn classify(raw: &str) -> OutputShape {
    let text = raw.trim();
    if text.is_empty() {
        OutputShape::Empty
    } else if text.starts_with('[') && text.ends_with(']') {
        OutputShape::CoordinateList
    } else {
        OutputShape::GripperToken
    }
}

/// Replace every non-ASCII dash variant with an ASCII hyphen-minus.
pub fn normalize_dashes(text: &str) -> String {
    text.chars()
        .map(|c| if is_dash_variant(c) { '-' } else { c })
        .collect()
}

/// Parse a raw oracle reply into a [`RobotCommand`].
pub fn parse_command(raw: &str) -> Result<RobotCommand, ParseError> {
    let text = raw.trim();
    let shape = classify(text);
    debug!(?shape, reply = text, "classified oracle reply");
    match shape {
        OutputShape::Empty => Err(ParseError::Empty),
        OutputShape::CoordinateList => parse_delta(text).map(RobotCommand::Move),
        OutputShape::GripperToken => parse_gripper(text).map(RobotCommand::Gripper),
    }
}

fn parse_delta(text: &str) -> Result<CoordinateDelta, ParseError> {
    // `text` is known to be wrapped in brackets, both one byte wide.
    let inner = normalize_dashes(&text[1..text.len() - 1]);
    let segments: Vec<&str> = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(str::trim).collect()
    };
    if segments.len() != 3 {
        return Err(ParseError::Arity {
            raw: text.to_string(),
            found: segments.len(),
        });
    }

    let mut values = [0.0f64; 3];
    for (slot, segment) in values.iter_mut().zip(&segments) {
        let v: f64 = segment.parse().map_err(|_| ParseError::NotANumber {
            raw: text.to_string(),
            segment: segment.to_string(),
        })?;
        if !v.is_finite() {
            return Err(ParseError::NonFinite {
                raw: text.to_string(),
                segment: segment.to_string(),
            });
        }
        *slot = v;
    }
    let [dx, dy, dz] = values;
    Ok(CoordinateDelta::new(dx, dy, dz))
}

fn parse_gripper(text: &str) -> Result<GripperCommand, ParseError> {
    match text {
        "0" => Ok(GripperCommand::Open),
        "1" => Ok(GripperCommand::Close),
        other if other.parse::<i64>().is_ok() => Err(ParseError::GripperValue {
            value: other.to_string(),
        }),
        other => Err(ParseError::Unrecognized {
            raw: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn delta(raw: &str) -> Result<CoordinateDelta, ParseError> {
        match parse_command(raw)? {
            RobotCommand::Move(d) => Ok(d),
            other => Err(ParseError::Unrecognized {
                raw: other.to_string(),
            }),
        }
    }

    #[test]
    fn parses_coordinate_list() -> Result<(), ParseError> {
        assert_eq!(delta("[0, 40, 0]")?, CoordinateDelta::new(0.0, 40.0, 0.0));
        assert_eq!(delta("[0,40,0]")?, delta("[0, 40, 0]")?);
        assert_eq!(delta("  [ 12.5 ,-3, 1e1 ]\n")?, CoordinateDelta::new(12.5, -3.0, 10.0));
        Ok(())
    }

    #[test]
    fn wrong_arity_is_rejected() {
        for raw in ["[0, 40]", "[0,40,0,5]", "[]", "[ ]", "[0, 40, 0,]"] {
            assert!(
                matches!(parse_command(raw), Err(ParseError::Arity { .. })),
                "{raw} should be an arity error"
            );
        }
    }

    #[test]
    fn non_numeric_segment_is_rejected() {
        assert_eq!(
            parse_command("[a,40,0]"),
            Err(ParseError::NotANumber {
                raw: "[a,40,0]".to_string(),
                segment: "a".to_string(),
            })
        );
        assert!(matches!(
            parse_command("[0,,40]"),
            Err(ParseError::NotANumber { .. })
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for raw in ["[NaN, 0, 0]", "[0, inf, 0]", "[0, 0, -infinity]"] {
            assert!(
                matches!(parse_command(raw), Err(ParseError::NonFinite { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn unicode_dashes_become_minus() -> Result<(), ParseError> {
        let expected = delta("[0, -40, 0]")?;
        assert_eq!(expected, CoordinateDelta::new(0.0, -40.0, 0.0));
        for raw in ["[0, –40, 0]", "[0, —40, 0]", "[0, −40, 0]", "[0, －40, 0]"] {
            assert_eq!(delta(raw)?, expected, "{raw}");
        }
        for dash in [
            '\u{058A}', '\u{05BE}', '\u{2010}', '\u{2011}', '\u{2012}', '\u{2015}', '\u{2E17}',
            '\u{2E1A}', '\u{2E3A}', '\u{2E3B}', '\u{2E40}', '\u{301C}', '\u{FE31}', '\u{FE32}',
            '\u{FE58}', '\u{FE63}', '\u{10EAD}',
        ] {
            let raw = format!("[0, {dash}40, 0]");
            assert_eq!(delta(&raw)?, expected, "{raw}");
        }
        Ok(())
    }

    #[test]
    fn ascii_and_lookalike_non_dashes_are_untouched() {
        assert_eq!(normalize_dashes("a-b_c~d"), "a-b_c~d");
        assert!(!is_dash_variant('\u{00AD}'));
        assert!(!is_dash_variant('\u{2043}'));
        assert!(matches!(
            parse_command("[0, ~40, 0]"),
            Err(ParseError::NotANumber { .. })
        ));
    }

    proptest! {
        #[test]
        fn formatted_triples_parse_back(
            dx in -500i32..=500,
            dy in -500i32..=500,
            dz in -500i32..=500,
            dash_idx in 0usize..4,
        ) {
            let dash = ['-', '\u{2212}', '\u{2013}', '\u{FE58}'][dash_idx];
            let fmt = |v: i32| {
                if v < 0 { format!("{dash}{}", -v) } else { v.to_string() }
            };
            let raw = format!("[{}, {},{}]", fmt(dx), fmt(dy), fmt(dz));
            prop_assert_eq!(
                parse_command(&raw),
                Ok(RobotCommand::Move(CoordinateDelta::new(dx as f64, dy as f64, dz as f64)))
            );
        }

        #[test]
        fn arbitrary_text_never_panics(raw in "\\PC{0,40}") {
            let _ = parse_command(&raw);
        }
    }

    #[test]
    fn gripper_tokens() {
        assert_eq!(
            parse_command("0"),
            Ok(RobotCommand::Gripper(GripperCommand::Open))
        );
        assert_eq!(
            parse_command(" 1 "),
            Ok(RobotCommand::Gripper(GripperCommand::Close))
        );
    }

    #[test]
    fn out_of_grammar_gripper_replies() {
        assert!(matches!(
            parse_command("2"),
            Err(ParseError::GripperValue { .. })
        ));
        assert!(matches!(
            parse_command("01"),
            Err(ParseError::GripperValue { .. })
        ));
        assert_eq!(parse_command(""), Err(ParseError::Empty));
        assert!(matches!(parse_command("[1]"), Err(ParseError::Arity { found: 1, .. })));
        assert!(matches!(
            parse_command("close the gripper"),
            Err(ParseError::Unrecognized { .. })
        ));
        assert!(matches!(
            parse_command("1."),
            Err(ParseError::Unrecognized { .. })
        ));
    }

    #[test]
    fn half_bracketed_reply_is_not_a_list() {
        assert_eq!(classify("[0, 40, 0"), OutputShape::GripperToken);
        assert!(matches!(
            parse_command("[0, 40, 0"),
            Err(ParseError::Unrecognized { .. })
        ));
    }

    #[test]
    fn diagnostics_name_expected_and_received() {
        let msg = parse_command("[0, 40]")
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(msg.contains("[0, 40]"));
        assert!(msg.contains("expected exactly 3"));
    }
}
