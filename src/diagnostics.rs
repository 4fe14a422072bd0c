//! Parse failure types.
//!
//! One taxonomy, no recovery: the first grammar violation aborts the parse of
//! the whole snippet and carries the offending source offset. Callers decide
//! whether a failed parse triggers a fallback extraction strategy.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end.saturating_sub(span.start)).into()
    }
}

/// Failure raised by the tokenizer or parser.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ParseError {
    /// Unexpected token, missing clause, malformed literal, and similar
    /// grammar violations.
    #[error("syntax error at offset {}: {message}", .span.start)]
    #[diagnostic(code(sigscript::syntax))]
    Syntax {
        message: String,
        #[label("here")]
        span: Span,
    },

    /// A `{`, `(`, or `[` whose matching closer never arrives; the span
    /// points at the opener.
    #[error("unbalanced '{delimiter}' at offset {}", .span.start)]
    #[diagnostic(code(sigscript::unbalanced))]
    UnbalancedDelimiter {
        delimiter: char,
        #[label("opened here and never closed")]
        span: Span,
    },

    /// A reserved word used where a plain identifier is required.
    #[error("reserved word '{name}' used as identifier at offset {}", .span.start)]
    #[diagnostic(code(sigscript::reserved_ident))]
    ReservedIdent {
        name: String,
        #[label("not a valid identifier")]
        span: Span,
    },

    /// A construct outside the supported subset that the grammar recognizes
    /// well enough to name.
    #[error("{feature} is not supported at offset {}", .span.start)]
    #[diagnostic(code(sigscript::unsupported))]
    Unsupported {
        feature: &'static str,
        #[label("unsupported construct")]
        span: Span,
    },

    /// The per-parse recursion budget ran out before the grammar bottomed
    /// out.
    #[error("recursion limit reached")]
    #[diagnostic(code(sigscript::recursion_limit))]
    RecursionLimit,
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        ParseError::Syntax {
            message: message.into(),
            span,
        }
    }

    /// The byte offset of the offending token, if the failure carries one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::UnbalancedDelimiter { span, .. }
            | ParseError::ReservedIdent { span, .. }
            | ParseError::Unsupported { span, .. } => Some(span.start),
            ParseError::RecursionLimit => None,
        }
    }

    /// Return `true` for the syntax-failure class (including unbalanced
    /// delimiters and reserved-identifier misuse).
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            ParseError::Syntax { .. }
                | ParseError::UnbalancedDelimiter { .. }
                | ParseError::ReservedIdent { .. }
        )
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParseError::Unsupported { .. })
    }

    pub fn is_resource_limit(&self) -> bool {
        matches!(self, ParseError::RecursionLimit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_classification() {
        let syntax = ParseError::syntax("unexpected token", Span::new(3, 4));
        assert!(syntax.is_syntax());
        assert_eq!(syntax.offset(), Some(3));

        let unbalanced = ParseError::UnbalancedDelimiter {
            delimiter: '{',
            span: Span::new(0, 1),
        };
        assert!(unbalanced.is_syntax());
        assert_eq!(unbalanced.offset(), Some(0));

        let unsupported = ParseError::Unsupported {
            feature: "array comprehension",
            span: Span::new(5, 8),
        };
        assert!(unsupported.is_unsupported());
        assert!(!unsupported.is_syntax());

        assert!(ParseError::RecursionLimit.is_resource_limit());
        assert_eq!(ParseError::RecursionLimit.offset(), None);
    }

    #[test]
    fn test_display_carries_offset() {
        let err = ParseError::syntax("unexpected token", Span::new(12, 13));
        assert!(err.to_string().contains("offset 12"));
    }
}
