use thiserror::Error;

use crate::TokenKind;

/// Errors raised while reading or writing a token stream.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TokenError {
    #[error("expected {expected} at token {position}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: TokenKind,
        position: usize,
    },

    #[error("expected {expected} at token {position}, found end of input")]
    UnexpectedEnd {
        expected: &'static str,
        position: usize,
    },

    #[error("number at token {position} does not fit `{target}`")]
    OutOfRange {
        target: &'static str,
        position: usize,
    },

    #[error("cannot write {what}: {reason}")]
    InvalidWrite {
        what: &'static str,
        reason: &'static str,
    },

    #[error("token stream is incomplete, {open} container(s) still open")]
    Incomplete { open: usize },

    #[error("{0}")]
    Custom(String),
}
