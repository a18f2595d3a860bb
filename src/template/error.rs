//! Errors raised while parsing or rendering template text.
//!
//! Parse-level failures and resource limits abort the render. Unresolved
//! variables and functions are not errors; the dispatcher recovers from them
//! locally.

/// Fatal template failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("malformed placeholder at offset {offset}: {kind}")]
    MalformedPlaceholder { offset: usize, kind: MalformedKind },
    #[error("unbalanced conditional at offset {offset}: {kind}")]
    UnbalancedConditional { offset: usize, kind: UnbalancedKind },
    #[error("render nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("rendered output exceeds the limit of {limit} bytes")]
    OutputLimitExceeded { limit: usize },
}

/// What was wrong with a `${...}` span.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedKind {
    #[error("`${{` has no matching `}}`")]
    Unterminated,
    #[error("quoted argument is not terminated")]
    UnterminatedQuote,
    #[error("placeholder name is empty")]
    EmptyName,
    #[error("argument `{0}` has no value")]
    MissingValue(String),
    #[error("`=` without an argument name")]
    UnexpectedEquals,
}

/// How a conditional block failed to balance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnbalancedKind {
    #[error("`</{name}>` closes a block that was never opened")]
    UnexpectedClose { name: String },
    #[error("expected `</{expected}>`, found `</{found}>`")]
    Mismatched { expected: String, found: String },
    #[error("block `<{name}>` is never closed")]
    Unclosed { name: String },
}

impl TemplateError {
    pub(crate) fn malformed(offset: usize, kind: MalformedKind) -> Self {
        Self::MalformedPlaceholder { offset, kind }
    }

    pub(crate) fn unbalanced(offset: usize, kind: UnbalancedKind) -> Self {
        Self::UnbalancedConditional { offset, kind }
    }

    /// Byte offset into the template text for parse-level errors.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedPlaceholder { offset, .. }
            | Self::UnbalancedConditional { offset, .. } => Some(*offset),
            Self::DepthExceeded { .. } | Self::OutputLimitExceeded { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_reported_for_parse_errors() {
        let err = TemplateError::malformed(7, MalformedKind::Unterminated);
        assert_eq!(err.offset(), Some(7));

        let err = TemplateError::unbalanced(
            3,
            UnbalancedKind::Unclosed {
                name: "a".into(),
            },
        );
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn limits_have_no_offset() {
        assert_eq!(TemplateError::DepthExceeded { limit: 4 }.offset(), None);
        assert_eq!(
            TemplateError::OutputLimitExceeded { limit: 10 }.offset(),
            None
        );
    }

    #[test]
    fn display_mentions_braces() {
        let err = TemplateError::malformed(0, MalformedKind::Unterminated);
        assert_eq!(
            err.to_string(),
            "malformed placeholder at offset 0: `${` has no matching `}`"
        );
    }

    #[test]
    fn display_mismatched_block() {
        let err = TemplateError::unbalanced(
            9,
            UnbalancedKind::Mismatched {
                expected: "a".into(),
                found: "b".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "unbalanced conditional at offset 9: expected `</a>`, found `</b>`"
        );
    }
}
