use alloc::boxed::Box;
use core::any::{Any, type_name};

use vc_token::{TokenKind, TokenReader};

use super::{ArgSlot, MemberAccess};
use crate::TriState;
use crate::codec::{DecodeError, DecodeOptions};
use crate::value::{ErasedWire, Wire};

/// A member stored directly as a `T`.
///
/// The tri-state view is synthesized: a value that [`Wire::is_null`]
/// reads as `Null`, anything else as `Value`. A plain member is never
/// `Unset`, and writing `Unset` leaves it unchanged.
pub struct PlainMember<O, T> {
    get: fn(&O) -> &T,
    get_mut: fn(&mut O) -> &mut T,
}

impl<O: 'static, T: Wire> PlainMember<O, T> {
    #[inline]
    pub const fn new(get: fn(&O) -> &T, get_mut: fn(&mut O) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    fn owner_mut<'a>(owner: &'a mut dyn Any) -> Result<&'a mut O, DecodeError> {
        owner.downcast_mut::<O>().ok_or(DecodeError::Mismatch {
            expected: type_name::<O>(),
        })
    }

    /// Converts a tri-state value into a stored value, `None` for `Unset`.
    fn resolve(value: TriState<Box<dyn Any>>) -> Result<Option<T>, DecodeError> {
        match value {
            TriState::Unset => Ok(None),
            TriState::Null => T::null().map(Some).ok_or(DecodeError::NullNotAllowed {
                type_name: type_name::<T>(),
            }),
            TriState::Value(v) => v.downcast::<T>().map(|v| Some(*v)).map_err(|_| {
                DecodeError::Mismatch {
                    expected: type_name::<T>(),
                }
            }),
        }
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<T, DecodeError> {
        if !T::NULLABLE && reader.peek_kind() == Some(TokenKind::Null) {
            return Err(DecodeError::NullNotAllowed {
                type_name: type_name::<T>(),
            });
        }
        T::decode(reader, options)
    }
}

impl<O: Send + Sync + 'static, T: Wire> MemberAccess for PlainMember<O, T> {
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<TriState<&'a dyn ErasedWire>> {
        let value = (self.get)(owner.downcast_ref::<O>()?);
        Some(if value.is_null() {
            TriState::Null
        } else {
            TriState::Value(value as &dyn ErasedWire)
        })
    }

    fn write(&self, owner: &mut dyn Any, value: TriState<Box<dyn Any>>) -> Result<(), DecodeError> {
        let owner = Self::owner_mut(owner)?;
        if let Some(value) = Self::resolve(value)? {
            *(self.get_mut)(owner) = value;
        }
        Ok(())
    }

    fn write_slot(
        &self,
        slot: &mut ArgSlot,
        value: TriState<Box<dyn Any>>,
    ) -> Result<(), DecodeError> {
        if let Some(value) = Self::resolve(value)? {
            slot.fill(Box::new(value));
        }
        Ok(())
    }

    fn decode_value(
        &self,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<TriState<Box<dyn Any>>, DecodeError> {
        let value = Self::decode(reader, options)?;
        Ok(if value.is_null() {
            TriState::Null
        } else {
            TriState::Value(Box::new(value) as Box<dyn Any>)
        })
    }

    fn decode_into(
        &self,
        owner: &mut dyn Any,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError> {
        let owner = Self::owner_mut(owner)?;
        *(self.get_mut)(owner) = Self::decode(reader, options)?;
        Ok(())
    }

    fn decode_slot(
        &self,
        slot: &mut ArgSlot,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError> {
        slot.fill(Box::new(Self::decode(reader, options)?));
        Ok(())
    }
}
