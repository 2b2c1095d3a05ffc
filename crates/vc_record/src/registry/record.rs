use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::fmt;

use super::{ModelBuilder, ModelCache, ModelError};
use crate::info::{Projection, TypeModel, Upcast};
use crate::value::Wire;

// -----------------------------------------------------------------------------
// Record

/// A modeled record: a struct whose shape is described by a [`TypeModel`].
///
/// Normally implemented by `#[derive(Record)]`, which also implements
/// [`Wire`] by delegating to the record codec.
///
/// # Examples
///
/// A hand-written implementation:
///
/// ```
/// use vc_record::{ModelBuilder, Record, Wire, DecodeError, DecodeOptions, EncodeError};
/// use vc_token::{TokenReader, TokenWriter};
///
/// #[derive(Default, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     fn describe(builder: &mut ModelBuilder<Self>) {
///         builder.default_constructor();
///         builder.plain::<i32>("x", |p| &p.x, |p| &mut p.x).required();
///         builder.plain::<i32>("y", |p| &p.y, |p| &mut p.y);
///     }
/// }
///
/// impl Wire for Point {
///     fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
///         vc_record::encode_record(self, writer)
///     }
///
///     fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
///         vc_record::decode_record(reader, options)
///     }
/// }
///
/// let model = Point::type_model().unwrap();
/// assert_eq!(model.members().len(), 2);
/// assert!(model.member("x").unwrap().is_required());
/// ```
pub trait Record: Wire {
    /// Declares members, constructors, and polymorphism on `builder`.
    fn describe(builder: &mut ModelBuilder<Self>);

    /// The embedded parent record, for derived types.
    #[inline]
    fn parent() -> Option<ParentLink> {
        None
    }

    /// Returns the cached model, building it on first use.
    #[inline]
    fn type_model() -> Result<&'static TypeModel, ModelError> {
        ModelCache::global().get_or_build::<Self>()
    }
}

// -----------------------------------------------------------------------------
// AnyRecord

/// An object-safe view of any [`Record`].
pub trait AnyRecord: Any + Send + Sync {
    /// The model of the runtime type.
    fn record_model(&self) -> Result<&'static TypeModel, ModelError>;

    fn record_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Record> AnyRecord for T {
    #[inline]
    fn record_model(&self) -> Result<&'static TypeModel, ModelError> {
        T::type_model()
    }

    #[inline]
    fn record_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl fmt::Debug for dyn AnyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyRecord")
            .field(&self.record_type_name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ParentLink

/// The link from a derived record to the parent record it embeds.
///
/// A derived record holds its parent as a field; members of the parent are
/// inherited through that field.
#[derive(Clone)]
pub struct ParentLink {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) model: fn() -> Result<&'static TypeModel, ModelError>,
    pub(crate) grandparent: fn() -> Option<ParentLink>,
    pub(crate) upcast: Arc<dyn Upcast>,
}

impl ParentLink {
    /// Links `D` to its parent `P` through the field reached by `get`.
    pub fn new<D: Record, P: Record>(get: fn(&D) -> &P, get_mut: fn(&mut D) -> &mut P) -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            type_name: type_name::<P>(),
            model: P::type_model,
            grandparent: P::parent,
            upcast: Arc::new(Projection::new(get, get_mut)),
        }
    }

    /// The parent type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.upcast(value)
    }

    #[inline]
    pub fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.upcast_mut(value)
    }

    /// Returns `true` if `ancestor` is the parent or one of its ancestors.
    ///
    /// Walks declared links only, without building any model.
    pub(crate) fn reaches(&self, ancestor: TypeId) -> bool {
        let mut link = Some(self.clone());
        while let Some(current) = link {
            if current.type_id == ancestor {
                return true;
            }
            link = (current.grandparent)();
        }
        false
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentLink")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
