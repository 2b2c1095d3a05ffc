use alloc::string::{String, ToString};
use core::fmt;

use vc_token::{TokenReader, TokenWriter};

use super::Wire;
use crate::codec::{DecodeError, DecodeOptions, EncodeError};

// -----------------------------------------------------------------------------
// Tag

/// A string-encoded enumeration, usable as a discriminator.
///
/// Usually implemented by `#[derive(WireEnum)]`.
pub trait Tag: Wire {
    /// Whether decoding an unrecognized tag succeeds.
    const TOLERATES_UNKNOWN: bool = false;

    /// The wire form of this value.
    fn tag(&self) -> &str;

    /// Parses a wire tag, returning `None` if it is not recognized.
    fn from_tag(tag: &str) -> Option<Self>;
}

// -----------------------------------------------------------------------------
// NonExhaustive

/// An enumeration value that keeps unrecognized tags.
///
/// Decoding a tag that `T` does not know yields `Unknown` with the
/// original string, and encoding writes that string back unchanged.
///
/// # Examples
///
/// ```
/// use vc_record::{NonExhaustive, Tag, WireEnum};
///
/// #[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
/// #[record(rename_all = "kebab-case")]
/// enum Shape {
///     Circle,
///     Square,
/// }
///
/// let known = NonExhaustive::<Shape>::from_tag("circle").unwrap();
/// assert_eq!(known, NonExhaustive::Known(Shape::Circle));
///
/// let unknown = NonExhaustive::<Shape>::from_tag("hexagon").unwrap();
/// assert_eq!(unknown.tag(), "hexagon");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum NonExhaustive<T> {
    Known(T),
    Unknown(String),
}

impl<T> NonExhaustive<T> {
    #[inline]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    #[inline]
    pub const fn known(&self) -> Option<&T> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown(_) => None,
        }
    }
}

impl<T> From<T> for NonExhaustive<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: Tag> Wire for NonExhaustive<T> {
    #[inline]
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        Ok(writer.write_str(self.tag())?)
    }

    fn decode(reader: &mut TokenReader<'_>, _: &DecodeOptions) -> Result<Self, DecodeError> {
        let tag = reader.read_str()?;
        Ok(match T::from_tag(tag) {
            Some(v) => Self::Known(v),
            None => Self::Unknown(tag.to_string()),
        })
    }
}

impl<T: Tag> Tag for NonExhaustive<T> {
    const TOLERATES_UNKNOWN: bool = true;

    #[inline]
    fn tag(&self) -> &str {
        match self {
            Self::Known(v) => v.tag(),
            Self::Unknown(raw) => raw,
        }
    }

    #[inline]
    fn from_tag(tag: &str) -> Option<Self> {
        Some(T::from_tag(tag).map_or_else(|| Self::Unknown(tag.to_string()), Self::Known))
    }
}

impl<T: fmt::Debug> fmt::Debug for NonExhaustive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(v) => f.debug_tuple("Known").field(v).finish(),
            Self::Unknown(raw) => f.debug_tuple("Unknown").field(raw).finish(),
        }
    }
}
