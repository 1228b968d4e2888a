//! Command grammar for voice-driven arm control
//!
//! The language model that interprets an utterance is constrained to exactly
//! two reply shapes: a bracketed list of three numbers (a Cartesian delta in
//! millimetres) or a bare `0`/`1` gripper token. This crate owns both halves
//! of that contract: the instruction text sent to the model ([`prompt`]) and
//! the strict parser that turns its reply back into a [`RobotCommand`].

mod error;
pub use error::ParseError;

mod types;
pub use types::{CoordinateDelta, GripperCommand, OutputShape, RobotCommand};

mod parser;
pub use parser::{classify, is_dash_variant, normalize_dashes, parse_command};

pub mod prompt;
pub use prompt::{render_instruction, CONTRACT_VERSION, SYSTEM_ROLE};
