use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;
use vc_token::TokenError;

use crate::registry::ModelError;

/// Errors raised while decoding a value.
///
/// Unknown keys and unmapped discriminator tags are not errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// Every required member absent from the input, in model order.
    #[error("`{type_name}` is missing required member(s): {}", .members.join(", "))]
    MissingMembers {
        type_name: &'static str,
        members: Vec<String>,
    },

    /// The first constructor parameter absent from the input.
    #[error("`{type_name}` is missing constructor parameter `{parameter}`")]
    MissingParameter {
        type_name: &'static str,
        parameter: &'static str,
    },

    #[error("resolved type `{resolved}` is neither `{requested}` nor a subtype of it")]
    IncompatibleType {
        requested: &'static str,
        resolved: &'static str,
    },

    #[error("input resolves to `{resolved}`, a subtype of `{requested}`; decode into `Poly` instead")]
    RequiresPoly {
        requested: &'static str,
        resolved: &'static str,
    },

    #[error("`{type_name}` does not accept null")]
    NullNotAllowed { type_name: &'static str },

    #[error("unknown variant `{value}` of `{type_name}`")]
    UnknownVariant {
        type_name: &'static str,
        value: String,
    },

    #[error("{value} does not fit `{target}`")]
    OutOfRange {
        target: &'static str,
        value: String,
    },

    #[error("in `{type_name}.{member}`: {source}")]
    InMember {
        type_name: &'static str,
        member: &'static str,
        source: Box<DecodeError>,
    },

    #[error("unexpected tokens after the value at token {position}")]
    TrailingTokens { position: usize },

    #[error("type mismatch, expected `{expected}`")]
    Mismatch { expected: &'static str },

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}

impl DecodeError {
    /// Strips member context and returns the innermost error.
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let DecodeError::InMember { source, .. } = err {
            err = source;
        }
        err
    }

    pub(crate) fn in_member(self, type_name: &'static str, member: &'static str) -> Self {
        DecodeError::InMember {
            type_name,
            member,
            source: Box::new(self),
        }
    }
}

/// Errors raised while encoding a value.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("type mismatch, expected `{expected}`")]
    Mismatch { expected: &'static str },

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Custom(String),
}
