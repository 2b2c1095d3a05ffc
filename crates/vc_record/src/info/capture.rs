use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use super::Upcast;
use crate::value::CaptureMap;

/// Type-erased access to a record's capture slot.
pub trait CaptureAccess: Send + Sync + 'static {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a CaptureMap>;

    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut CaptureMap>;
}

/// A capture field of declared type `F`, validated to be a [`CaptureMap`]
/// at model build.
pub(crate) struct CaptureField<O, F> {
    get: fn(&O) -> &F,
    get_mut: fn(&mut O) -> &mut F,
}

impl<O, F> CaptureField<O, F> {
    pub(crate) const fn new(get: fn(&O) -> &F, get_mut: fn(&mut O) -> &mut F) -> Self {
        Self { get, get_mut }
    }
}

impl<O: Send + Sync + 'static, F: Send + Sync + 'static> CaptureAccess for CaptureField<O, F> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a CaptureMap> {
        let field: &dyn Any = (self.get)(owner.downcast_ref::<O>()?);
        field.downcast_ref()
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut CaptureMap> {
        let field: &mut dyn Any = (self.get_mut)(owner.downcast_mut::<O>()?);
        field.downcast_mut()
    }
}

/// A parent's capture slot seen from a derived record.
pub(crate) struct InheritedCapture {
    inner: Arc<dyn CaptureAccess>,
    upcast: Arc<dyn Upcast>,
}

impl InheritedCapture {
    pub(crate) fn new(inner: Arc<dyn CaptureAccess>, upcast: Arc<dyn Upcast>) -> Self {
        Self { inner, upcast }
    }
}

impl CaptureAccess for InheritedCapture {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a CaptureMap> {
        self.inner.get(self.upcast.upcast(owner)?)
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut CaptureMap> {
        self.inner.get_mut(self.upcast.upcast_mut(owner)?)
    }
}

// -----------------------------------------------------------------------------
// CaptureSlot

/// The member that collects unmatched keys.
#[derive(Clone)]
pub struct CaptureSlot {
    pub(crate) name: &'static str,
    pub(crate) declaring_type: &'static str,
    pub(crate) access: Arc<dyn CaptureAccess>,
}

impl CaptureSlot {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn declaring_type(&self) -> &'static str {
        self.declaring_type
    }

    #[inline]
    pub fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a CaptureMap> {
        self.access.get(owner)
    }

    #[inline]
    pub fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut CaptureMap> {
        self.access.get_mut(owner)
    }
}

impl fmt::Debug for CaptureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureSlot")
            .field("name", &self.name)
            .field("declaring_type", &self.declaring_type)
            .finish_non_exhaustive()
    }
}
