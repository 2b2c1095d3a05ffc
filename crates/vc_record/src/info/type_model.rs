use core::any::TypeId;
use core::fmt;

use super::{CaptureSlot, ConstructorInfo, MemberInfo, NamingPolicy, Polymorphism};
use crate::codec::NameTable;
use crate::registry::ParentLink;

/// The parent of a derived type model.
#[derive(Clone)]
pub struct ParentModel {
    pub(crate) link: ParentLink,
    pub(crate) model: &'static TypeModel,
}

impl ParentModel {
    #[inline]
    pub fn link(&self) -> &ParentLink {
        &self.link
    }

    #[inline]
    pub fn model(&self) -> &'static TypeModel {
        self.model
    }
}

/// The cached, build-once descriptor of a record type.
///
/// Obtained through [`Record::type_model`](crate::Record::type_model).
/// Members are ordered for encoding: constructor-bound members first in
/// parameter order, then the rest in declaration order, the most derived
/// type's members before inherited ones.
pub struct TypeModel {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) naming: NamingPolicy,
    pub(crate) members: Box<[MemberInfo]>,
    pub(crate) constructor: ConstructorInfo,
    pub(crate) capture: Option<CaptureSlot>,
    pub(crate) parent: Option<ParentModel>,
    pub(crate) polymorphism: Option<Polymorphism>,
    pub(crate) names: NameTable,
}

impl TypeModel {
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }

    /// All members, declared and inherited.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Members declared by this type itself.
    pub fn declared_members(&self) -> impl Iterator<Item = &MemberInfo> {
        self.members
            .iter()
            .filter(move |m| m.declaring_id == self.type_id)
    }

    /// Finds a member by model name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Finds a member by exact wire key.
    pub fn member_by_key(&self, key: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|m| &*m.key == key)
    }

    #[inline]
    pub fn constructor(&self) -> &ConstructorInfo {
        &self.constructor
    }

    #[inline]
    pub fn capture(&self) -> Option<&CaptureSlot> {
        self.capture.as_ref()
    }

    #[inline]
    pub fn parent(&self) -> Option<&ParentModel> {
        self.parent.as_ref()
    }

    #[inline]
    pub fn polymorphism(&self) -> Option<&Polymorphism> {
        self.polymorphism.as_ref()
    }

    /// Iterates the strict ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static TypeModel> {
        let mut next = self.parent.as_ref().map(|p| p.model);
        core::iter::from_fn(move || {
            let current = next?;
            next = current.parent.as_ref().map(|p| p.model);
            Some(current)
        })
    }

    /// Returns `true` if `ancestor` is a strict ancestor of this type.
    pub fn is_subtype_of(&self, ancestor: &TypeModel) -> bool {
        self.ancestors().any(|m| m.type_id == ancestor.type_id)
    }

    /// Returns `true` if this is `other` or a subtype of it.
    #[inline]
    pub fn is_assignable_to(&self, other: &TypeModel) -> bool {
        self.type_id == other.type_id || self.is_subtype_of(other)
    }

    /// The topmost polymorphic model among this type and its ancestors.
    pub fn polymorphic_root(&'static self) -> Option<&'static TypeModel> {
        core::iter::once(self)
            .chain(self.ancestors())
            .filter(|m| m.polymorphism.is_some())
            .last()
    }
}

impl fmt::Debug for TypeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeModel")
            .field("type_name", &self.type_name)
            .field("naming", &self.naming)
            .field("members", &self.members)
            .field("constructor", &self.constructor)
            .field("capture", &self.capture)
            .field("parent", &self.parent.as_ref().map(|p| p.model.type_name))
            .field("polymorphism", &self.polymorphism)
            .finish()
    }
}
