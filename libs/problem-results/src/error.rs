//! Failures raised by the engine itself (as opposed to the failures it renders).

/// Engine-internal error conditions.
///
/// `UnsupportedErrorKind` never leaves the dispatcher: it is rendered as an
/// unexpected error instead. `InvalidParameter` is a caller defect and is
/// propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProblemEngineError {
    #[error("unsupported error kind code: {code}")]
    UnsupportedErrorKind { code: i32 },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl ProblemEngineError {
    pub(crate) fn blank(name: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            reason: "must not be empty or whitespace".to_owned(),
        }
    }
}

/// Fails with [`ProblemEngineError::InvalidParameter`] when `value` is blank.
pub(crate) fn require_non_blank(name: &'static str, value: &str) -> Result<(), ProblemEngineError> {
    if value.trim().is_empty() {
        return Err(ProblemEngineError::blank(name));
    }
    Ok(())
}
