//! Descriptors of modeled records.
//!
//! A [`TypeModel`] is built once per record type and describes everything
//! the codec needs: the ordered [`MemberInfo`]s with their type-erased
//! accessors, the selected [`ConstructorInfo`], the optional
//! [`CaptureSlot`], the parent link, and for polymorphic roots the
//! [`Polymorphism`] table.

// -----------------------------------------------------------------------------
// Modules

mod capture;
mod constructor;
mod inherited;
mod member;
mod naming;
mod plain;
mod polymorphism;
mod type_model;
mod wrapped;

// -----------------------------------------------------------------------------
// Exports

pub use capture::{CaptureAccess, CaptureSlot};
pub use constructor::{Constructor, ConstructorArgs, ConstructorInfo, ParameterInfo};
pub use inherited::{Projection, Upcast};
pub use member::{ArgSlot, IgnorePolicy, MemberAccess, MemberFlags, MemberInfo};
pub use naming::{NamingPolicy, UnknownPolicy};
pub use plain::PlainMember;
pub use polymorphism::{Polymorphism, VariantInfo};
pub use type_model::{ParentModel, TypeModel};
pub use wrapped::WrappedMember;

pub(crate) use capture::{CaptureField, InheritedCapture};
pub(crate) use constructor::{InvokeFn, ParamDecl};
pub(crate) use inherited::InheritedMember;
pub(crate) use member::{DefaultFn, TagSpec};
