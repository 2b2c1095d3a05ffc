use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;

use vc_token::TokenReader;

use super::{ArgSlot, MemberAccess};
use crate::TriState;
use crate::codec::{DecodeError, DecodeOptions};
use crate::value::ErasedWire;

// -----------------------------------------------------------------------------
// Upcast

/// Projects a derived record onto the parent record it embeds.
pub trait Upcast: Send + Sync + 'static {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any>;

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

/// An [`Upcast`] from `D` to its embedded parent `P`.
pub struct Projection<D, P> {
    get: fn(&D) -> &P,
    get_mut: fn(&mut D) -> &mut P,
}

impl<D, P> Projection<D, P> {
    #[inline]
    pub const fn new(get: fn(&D) -> &P, get_mut: fn(&mut D) -> &mut P) -> Self {
        Self { get, get_mut }
    }
}

impl<D: Send + Sync + 'static, P: Send + Sync + 'static> Upcast for Projection<D, P> {
    #[inline]
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        let derived = value.downcast_ref::<D>()?;
        Some((self.get)(derived))
    }

    #[inline]
    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let derived = value.downcast_mut::<D>()?;
        Some((self.get_mut)(derived))
    }
}

// -----------------------------------------------------------------------------
// InheritedMember

/// A parent member seen from a derived record.
///
/// Owner-based operations upcast first; slot operations pass through.
pub(crate) struct InheritedMember {
    inner: Arc<dyn MemberAccess>,
    upcast: Arc<dyn Upcast>,
    derived: &'static str,
}

impl InheritedMember {
    pub(crate) fn new(
        inner: Arc<dyn MemberAccess>,
        upcast: Arc<dyn Upcast>,
        derived: &'static str,
    ) -> Self {
        Self {
            inner,
            upcast,
            derived,
        }
    }

    fn parent_mut<'a>(&self, owner: &'a mut dyn Any) -> Result<&'a mut dyn Any, DecodeError> {
        self.upcast
            .upcast_mut(owner)
            .ok_or(DecodeError::Mismatch {
                expected: self.derived,
            })
    }
}

impl MemberAccess for InheritedMember {
    fn read<'a>(&self, owner: &'a dyn Any) -> Option<TriState<&'a dyn ErasedWire>> {
        self.inner.read(self.upcast.upcast(owner)?)
    }

    fn write(&self, owner: &mut dyn Any, value: TriState<Box<dyn Any>>) -> Result<(), DecodeError> {
        self.inner.write(self.parent_mut(owner)?, value)
    }

    fn write_slot(
        &self,
        slot: &mut ArgSlot,
        value: TriState<Box<dyn Any>>,
    ) -> Result<(), DecodeError> {
        self.inner.write_slot(slot, value)
    }

    fn decode_value(
        &self,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<TriState<Box<dyn Any>>, DecodeError> {
        self.inner.decode_value(reader, options)
    }

    fn decode_into(
        &self,
        owner: &mut dyn Any,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError> {
        self.inner.decode_into(self.parent_mut(owner)?, reader, options)
    }

    fn decode_slot(
        &self,
        slot: &mut ArgSlot,
        reader: &mut TokenReader<'_>,
        options: &DecodeOptions,
    ) -> Result<(), DecodeError> {
        self.inner.decode_slot(slot, reader, options)
    }

    fn implicit_default(&self) -> Option<fn() -> Box<dyn Any>> {
        self.inner.implicit_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{Projection, Upcast};

    struct Base(u8);
    struct Derived {
        base: Base,
    }

    #[test]
    fn projection_upcasts() {
        let p = Projection::new(|d: &Derived| &d.base, |d: &mut Derived| &mut d.base);
        let mut d = Derived { base: Base(3) };
        let any = p.upcast(&d).unwrap();
        assert_eq!(any.downcast_ref::<Base>().unwrap().0, 3);
        p.upcast_mut(&mut d)
            .unwrap()
            .downcast_mut::<Base>()
            .unwrap()
            .0 = 4;
        assert_eq!(d.base.0, 4);
        assert!(p.upcast(&d.base).is_none());
    }
}
