use thiserror::Error;

/// Oracle reply that does not fit the command grammar.
///
/// Every variant names what was expected and echoes what was received so the
/// operator can see why nothing moved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty reply; expected `[dx, dy, dz]` or `0`/`1`")]
    Empty,
    #[error("coordinate list `{raw}` has {found} values; expected exactly 3")]
    Arity { raw: String, found: usize },
    #[error("coordinate list `{raw}`: `{segment}` is not a number")]
    NotANumber { raw: String, segment: String },
    #[error("coordinate list `{raw}`: `{segment}` is not a finite number")]
    NonFinite { raw: String, segment: String },
    #[error("gripper value `{value}` is not allowed; expected `0` (open) or `1` (close)")]
    GripperValue { value: String },
    #[error("unrecognised reply `{raw}`; expected `[dx, dy, dz]` or `0`/`1`")]
    Unrecognized { raw: String },
}
