use alloc::boxed::Box;
use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;

use vc_token::{TokenReader, TokenWriter};

use super::{DecodeError, DecodeOptions, EncodeError};
use crate::info::TypeModel;
use crate::registry::{AnyRecord, Record};
use crate::value::Wire;

/// A decoded member of a polymorphic hierarchy: a `T` or any record
/// derived from `T`.
///
/// Encoding uses the runtime type's model, so a `Poly<Animal>` holding a
/// `Dog` writes every member of `Dog`.
pub struct Poly<T> {
    value: Box<dyn AnyRecord>,
    model: &'static TypeModel,
    _marker: PhantomData<fn() -> T>,
}

/// Walks parent links from `model` up to `target`, projecting `value`.
fn upcast<'a>(mut value: &'a dyn Any, mut model: &'static TypeModel, target: TypeId) -> Option<&'a dyn Any> {
    while model.type_id() != target {
        let parent = model.parent()?;
        value = parent.link().upcast(value)?;
        model = parent.model();
    }
    Some(value)
}

fn upcast_mut<'a>(
    mut value: &'a mut dyn Any,
    mut model: &'static TypeModel,
    target: TypeId,
) -> Option<&'a mut dyn Any> {
    while model.type_id() != target {
        let parent = model.parent()?;
        value = parent.link().upcast_mut(value)?;
        model = parent.model();
    }
    Some(value)
}

impl<T: Record> Poly<T> {
    /// Wraps a concrete record, checking that it is a `T` or derives from it.
    pub fn from_boxed(value: Box<dyn AnyRecord>) -> Result<Self, DecodeError> {
        let model = value.record_model()?;
        if upcast(value.as_any(), model, TypeId::of::<T>()).is_none() {
            return Err(DecodeError::IncompatibleType {
                requested: type_name::<T>(),
                resolved: model.type_name(),
            });
        }
        Ok(Self {
            value,
            model,
            _marker: PhantomData,
        })
    }

    /// Wraps a record derived from `T`.
    pub fn new<D: Record>(value: D) -> Result<Self, DecodeError> {
        Self::from_boxed(Box::new(value))
    }

    /// The `T` part of the value.
    pub fn get(&self) -> &T {
        upcast(self.value.as_any(), self.model, TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
            .expect("`Poly<T>` always holds a `T` or a descendant")
    }

    pub fn get_mut(&mut self) -> &mut T {
        upcast_mut(self.value.as_any_mut(), self.model, TypeId::of::<T>())
            .and_then(|v| v.downcast_mut::<T>())
            .expect("`Poly<T>` always holds a `T` or a descendant")
    }

    /// The model of the runtime type.
    #[inline]
    pub fn model(&self) -> &'static TypeModel {
        self.model
    }

    /// Returns `true` if the runtime type is exactly `U`.
    #[inline]
    pub fn is<U: Record>(&self) -> bool {
        self.value.as_any().is::<U>()
    }

    /// Views the value as `U`, a type on the path from the runtime type up
    /// to `T`.
    pub fn downcast_ref<U: Record>(&self) -> Option<&U> {
        upcast(self.value.as_any(), self.model, TypeId::of::<U>())?.downcast_ref()
    }

    pub fn downcast_mut<U: Record>(&mut self) -> Option<&mut U> {
        upcast_mut(self.value.as_any_mut(), self.model, TypeId::of::<U>())?.downcast_mut()
    }

    /// Takes the value out if its runtime type is exactly `U`.
    pub fn downcast<U: Record>(self) -> Result<U, Self> {
        if !self.is::<U>() {
            return Err(self);
        }
        match self.value.into_any().downcast::<U>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("runtime type checked above"),
        }
    }

    #[inline]
    pub fn as_record(&self) -> &dyn AnyRecord {
        &*self.value
    }

    #[inline]
    pub fn into_boxed(self) -> Box<dyn AnyRecord> {
        self.value
    }
}

impl<T: Record> Wire for Poly<T> {
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        super::encode_record_dyn(&*self.value, writer)
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        super::decode_record_poly(reader, options)
    }
}

impl<T> fmt::Debug for Poly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly")
            .field("requested", &type_name::<T>())
            .field("runtime", &self.model.type_name())
            .finish()
    }
}
