use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

/// A type model could not be built.
///
/// Raised the first time a type is used and cached with the type, so
/// every later use observes the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("`{type_name}` declares no usable constructor")]
    NoConstructor { type_name: &'static str },

    #[error("`{type_name}` has {count} candidate constructors and none is preferred")]
    AmbiguousConstructor {
        type_name: &'static str,
        count: usize,
    },

    #[error("constructor parameter `{parameter}` of `{type_name}` matches no member")]
    UnmatchedParameter {
        type_name: &'static str,
        parameter: &'static str,
    },

    #[error("default of parameter `{parameter}` of `{type_name}` is not a `{expected}`")]
    DefaultTypeMismatch {
        type_name: &'static str,
        parameter: &'static str,
        expected: &'static str,
    },

    #[error("capture slot `{member}` of `{type_name}` must be a `CaptureMap`, found `{found}`")]
    InvalidCaptureSlot {
        type_name: &'static str,
        member: &'static str,
        found: &'static str,
    },

    #[error("capture slot `{member}` of `{type_name}` cannot be a `TriState`")]
    WrappedCaptureSlot {
        type_name: &'static str,
        member: &'static str,
    },

    #[error("variant `{variant}` registered on `{root}` is not a subtype of it")]
    NotASubtype {
        root: &'static str,
        variant: &'static str,
    },

    #[error("tag `{tag}` is registered twice on `{type_name}`")]
    DuplicateTag { type_name: &'static str, tag: String },

    #[error("polymorphic type `{type_name}` has no discriminator member")]
    MissingDiscriminator { type_name: &'static str },

    #[error("`{type_name}` declares key `{key}` twice")]
    DuplicateMember { type_name: &'static str, key: String },

    #[error("parent model of `{type_name}` failed to build: {source}")]
    Parent {
        type_name: &'static str,
        source: Box<ModelError>,
    },
}
