use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

use bitflags::bitflags;
use vc_token::TokenReader;

use crate::TriState;
use crate::codec::{DecodeError, DecodeOptions};
use crate::value::ErasedWire;

// -----------------------------------------------------------------------------
// ArgSlot

/// A staged constructor argument.
///
/// Holds a boxed value of the bound member's declared type once filled.
#[derive(Default)]
pub struct ArgSlot(Option<Box<dyn Any>>);

impl ArgSlot {
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn fill(&mut self, value: Box<dyn Any>) {
        self.0 = Some(value);
    }

    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Any>> {
        self.0.take()
    }
}

impl fmt::Debug for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_filled() { "ArgSlot(filled)" } else { "ArgSlot(empty)" })
    }
}

// -----------------------------------------------------------------------------
// MemberAccess

/// Type-erased access to one member of a record.
///
/// `owner` is always the record that declares the member; passing anything
/// else yields `None` or [`DecodeError::Mismatch`]. Boxed values passed to
/// [`write`](Self::write) carry the member's value type: `T` for a plain
/// member of type `T`, `U` for a wrapped member of type `TriState<U>`.
pub trait MemberAccess: Send + Sync + 'static {
    /// Reads the member as a tri-state value.
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<TriState<&'a dyn ErasedWire>>;

    /// Applies a tri-state value to the member.
    fn write(&self, owner: &mut dyn Any, value: TriState<Box<dyn Any>>) -> Result<(), DecodeError>;

    /// Stages a tri-state value into a constructor argument slot.
    fn write_slot(&self, slot: &mut ArgSlot, value: TriState<Box<dyn Any>>)
    -> Result<(), DecodeError>;

    /// Decodes the next value as a tri-state value of the member's value type.
    fn decode_value(
        &self,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<TriState<Box<dyn Any>>, DecodeError>;

    /// Decodes the next value straight into the member.
    fn decode_into(
        &self,
        owner: &mut dyn Any,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError>;

    /// Decodes the next value straight into a constructor argument slot.
    fn decode_slot(
        &self,
        slot: &mut ArgSlot,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError>;

    /// The default a bound constructor parameter gets when none is declared.
    fn implicit_default(&self) -> Option<fn() -> Box<dyn Any>> {
        None
    }
}

// -----------------------------------------------------------------------------
// Flags

bitflags! {
    /// Capabilities of a member, introspected once at model build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const READ          = 1 << 0;
        const WRITE         = 1 << 1;
        /// Decoding fails when the key is absent.
        const REQUIRED      = 1 << 2;
        /// A wire `null` is accepted.
        const NULLABLE      = 1 << 3;
        /// Writing `Unset` is legal and leaves the member untouched.
        const UNSETTABLE    = 1 << 4;
        const DISCRIMINATOR = 1 << 5;
    }
}

/// When a readable member is left out of the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IgnorePolicy {
    /// Written unless `Unset`.
    #[default]
    Never,
    /// Written unless `Unset` or `Null`.
    WhenWritingNull,
}

pub(crate) type DefaultFn = Arc<dyn Fn() -> Box<dyn Any> + Send + Sync>;
pub(crate) type TagFn = for<'a> fn(&'a dyn Any) -> Option<&'a str>;

/// How a discriminator member exposes its tag.
#[derive(Clone, Copy)]
pub(crate) struct TagSpec {
    pub(crate) read: TagFn,
    pub(crate) tolerates_unknown: bool,
}

// -----------------------------------------------------------------------------
// MemberInfo

/// The descriptor of one member in a [`TypeModel`](crate::TypeModel).
#[derive(Clone)]
pub struct MemberInfo {
    pub(crate) name: &'static str,
    pub(crate) key: Box<str>,
    pub(crate) type_name: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) flags: MemberFlags,
    pub(crate) ignore: IgnorePolicy,
    pub(crate) declaring_type: &'static str,
    pub(crate) declaring_id: TypeId,
    pub(crate) parameter: Option<usize>,
    pub(crate) default: Option<DefaultFn>,
    pub(crate) tag: Option<TagSpec>,
    pub(crate) access: Arc<dyn MemberAccess>,
}

impl MemberInfo {
    /// The model name, usually the Rust field name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The wire key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The declared Rust type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn flags(&self) -> MemberFlags {
        self.flags
    }

    #[inline]
    pub fn can_read(&self) -> bool {
        self.flags.contains(MemberFlags::READ)
    }

    #[inline]
    pub fn can_write(&self) -> bool {
        self.flags.contains(MemberFlags::WRITE)
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.flags.contains(MemberFlags::REQUIRED)
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.flags.contains(MemberFlags::NULLABLE)
    }

    #[inline]
    pub fn is_unsettable(&self) -> bool {
        self.flags.contains(MemberFlags::UNSETTABLE)
    }

    #[inline]
    pub fn is_discriminator(&self) -> bool {
        self.flags.contains(MemberFlags::DISCRIMINATOR)
    }

    #[inline]
    pub fn ignore_policy(&self) -> IgnorePolicy {
        self.ignore
    }

    /// The record type that declares this member.
    #[inline]
    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    /// Index of the constructor parameter bound to this member.
    #[inline]
    pub fn parameter(&self) -> Option<usize> {
        self.parameter
    }

    #[inline]
    pub fn access(&self) -> &dyn MemberAccess {
        &*self.access
    }

    /// Reads the member of `owner`.
    ///
    /// `owner` may be the declaring record or any record derived from it
    /// when this descriptor comes from the derived record's model.
    #[inline]
    pub fn read<'a>(&self, owner: &'a dyn Any) -> Option<TriState<&'a dyn ErasedWire>> {
        self.access.read(owner)
    }

    /// Reads the member as a `T`, the member's value type.
    pub fn read_as<'a, T: 'static>(&self, owner: &'a dyn Any) -> Option<TriState<&'a T>> {
        match self.access.read(owner)? {
            TriState::Unset => Some(TriState::Unset),
            TriState::Null => Some(TriState::Null),
            TriState::Value(v) => v.as_any().downcast_ref::<T>().map(TriState::Value),
        }
    }

    /// Applies a typed tri-state value.
    pub fn write<T: 'static>(&self, owner: &mut dyn Any, value: TriState<T>) -> Result<(), DecodeError> {
        self.access
            .write(owner, value.map(|v| Box::new(v) as Box<dyn Any>))
    }

    /// Stages a typed tri-state value into a constructor argument slot.
    pub fn write_slot<T: 'static>(
        &self,
        slot: &mut ArgSlot,
        value: TriState<T>,
    ) -> Result<(), DecodeError> {
        self.access
            .write_slot(slot, value.map(|v| Box::new(v) as Box<dyn Any>))
    }

    /// Reads the discriminator tag of `value`, a value of this member's
    /// value type.
    pub(crate) fn tag_of<'a>(&self, value: &'a dyn Any) -> Option<&'a str> {
        self.tag.and_then(|spec| (spec.read)(value))
    }
}

impl fmt::Debug for MemberInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberInfo")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("type_name", &self.type_name)
            .field("flags", &self.flags)
            .field("ignore", &self.ignore)
            .field("declaring_type", &self.declaring_type)
            .field("parameter", &self.parameter)
            .finish_non_exhaustive()
    }
}
