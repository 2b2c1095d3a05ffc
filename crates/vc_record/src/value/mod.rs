//! Values that can be written to and read from a token stream.
//!
//! [`Wire`] is implemented for scalars, strings, the standard containers,
//! and every [`Record`](crate::Record). [`ErasedWire`] is its object-safe
//! counterpart, used where the member model hands out values without
//! knowing their type.

use core::any::Any;

use vc_token::{TokenReader, TokenWriter};

use crate::codec::{DecodeError, DecodeOptions, EncodeError};

// -----------------------------------------------------------------------------
// Modules

mod containers;
mod raw;
mod scalars;
mod tag;

// -----------------------------------------------------------------------------
// Exports

pub use raw::{CaptureMap, RawValue};
pub use tag::{NonExhaustive, Tag};

// -----------------------------------------------------------------------------
// Wire

/// A value with a token-stream representation.
///
/// Nullable types (`Option<T>` and friends) set [`NULLABLE`](Wire::NULLABLE)
/// and report their null state through [`is_null`](Wire::is_null), so that a
/// plain member of such a type reads as `Null` rather than as a value.
pub trait Wire: Sized + Send + Sync + 'static {
    /// Whether a wire `null` is a legal value of this type.
    const NULLABLE: bool = false;

    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError>;

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError>;

    /// Returns `true` if this value is written as `null`.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }

    /// The value a wire `null` decodes into, for nullable types.
    #[inline]
    fn null() -> Option<Self> {
        None
    }
}

// -----------------------------------------------------------------------------
// ErasedWire

/// Object-safe access to a [`Wire`] value.
pub trait ErasedWire: Any + Send + Sync {
    fn encode_erased(&self, writer: &mut TokenWriter) -> Result<(), EncodeError>;

    fn as_any(&self) -> &dyn Any;

    /// The Rust type name, for diagnostics.
    fn wire_type_name(&self) -> &'static str;
}

impl<T: Wire> ErasedWire for T {
    #[inline]
    fn encode_erased(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        self.encode(writer)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn wire_type_name(&self) -> &'static str {
        core::any::type_name::<T>()
    }
}

impl dyn ErasedWire {
    /// Returns the value as a `T` if it is one.
    #[inline]
    pub fn downcast_ref<T: Wire>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }
}
