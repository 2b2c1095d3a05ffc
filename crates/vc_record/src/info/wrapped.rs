use alloc::boxed::Box;
use core::any::{Any, type_name};

use vc_token::TokenReader;

use super::{ArgSlot, MemberAccess};
use crate::TriState;
use crate::codec::{DecodeError, DecodeOptions};
use crate::value::{ErasedWire, Wire};

/// A member already stored as a `TriState<U>`.
///
/// Always nullable and unsettable. Writing `Unset` is accepted and not
/// applied, so a decode never erases a value the constructor put there.
pub struct WrappedMember<O, U> {
    get: fn(&O) -> &TriState<U>,
    get_mut: fn(&mut O) -> &mut TriState<U>,
}

impl<O: 'static, U: Wire> WrappedMember<O, U> {
    #[inline]
    pub const fn new(get: fn(&O) -> &TriState<U>, get_mut: fn(&mut O) -> &mut TriState<U>) -> Self {
        Self { get, get_mut }
    }

    fn unbox(value: TriState<Box<dyn Any>>) -> Result<TriState<U>, DecodeError> {
        match value {
            TriState::Unset => Ok(TriState::Unset),
            TriState::Null => Ok(TriState::Null),
            TriState::Value(v) => v
                .downcast::<U>()
                .map(|v| TriState::Value(*v))
                .map_err(|_| DecodeError::Mismatch {
                    expected: type_name::<U>(),
                }),
        }
    }

    fn decode(
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<TriState<U>, DecodeError> {
        // A nullable payload type sees the null itself, e.g. `TriState<Option<T>>`
        // never holds `Null`.
        if !U::NULLABLE && reader.try_read_null() {
            return Ok(TriState::Null);
        }
        U::decode(reader, options).map(TriState::Value)
    }
}

impl<O: Send + Sync + 'static, U: Wire> MemberAccess for WrappedMember<O, U> {
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<TriState<&'a dyn ErasedWire>> {
        let value = (self.get)(owner.downcast_ref::<O>()?);
        Some(match value {
            TriState::Unset => TriState::Unset,
            TriState::Null => TriState::Null,
            TriState::Value(v) if v.is_null() => TriState::Null,
            TriState::Value(v) => TriState::Value(v as &dyn ErasedWire),
        })
    }

    fn write(&self, owner: &mut dyn Any, value: TriState<Box<dyn Any>>) -> Result<(), DecodeError> {
        let owner = owner.downcast_mut::<O>().ok_or(DecodeError::Mismatch {
            expected: type_name::<O>(),
        })?;
        (self.get_mut)(owner).update(Self::unbox(value)?);
        Ok(())
    }

    fn write_slot(
        &self,
        slot: &mut ArgSlot,
        value: TriState<Box<dyn Any>>,
    ) -> Result<(), DecodeError> {
        let value = Self::unbox(value)?;
        if value.is_set() || !slot.is_filled() {
            slot.fill(Box::new(value));
        }
        Ok(())
    }

    fn decode_value(
        &self,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<TriState<Box<dyn Any>>, DecodeError> {
        Ok(Self::decode(reader, options)?.map(|v| Box::new(v) as Box<dyn Any>))
    }

    fn decode_into(
        &self,
        owner: &mut dyn Any,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError> {
        let owner = owner.downcast_mut::<O>().ok_or(DecodeError::Mismatch {
            expected: type_name::<O>(),
        })?;
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

    fn implicit_default(&self) -> Option<fn() -> Box<dyn Any>> {
        Some(|| Box::new(TriState::<U>::Unset) as Box<dyn Any>)
    }
}
