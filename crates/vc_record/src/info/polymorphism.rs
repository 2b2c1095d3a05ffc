use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use std::sync::OnceLock;

use vc_utils::hash::HashMap;

use crate::TypeModel;
use crate::registry::ModelError;

/// One `(derived type, tag)` registration on a polymorphic root.
#[derive(Clone)]
pub struct VariantInfo {
    pub(crate) tag: &'static str,
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) model: fn() -> Result<&'static TypeModel, ModelError>,
}

impl VariantInfo {
    #[inline]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for VariantInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantInfo")
            .field("tag", &self.tag)
            .field("type_name", &self.type_name)
            .finish()
    }
}

type VariantTable = HashMap<&'static str, &'static TypeModel>;

/// The discriminator and variant table of a polymorphic root.
///
/// Variant models are resolved on first lookup: a variant's model depends
/// on the root's, so the root cannot build them eagerly.
pub struct Polymorphism {
    pub(crate) discriminator: usize,
    pub(crate) tolerates_unknown: bool,
    pub(crate) variants: Box<[VariantInfo]>,
    pub(crate) table: OnceLock<Result<VariantTable, ModelError>>,
}

impl Polymorphism {
    /// Index of the discriminator in the root's members.
    #[inline]
    pub fn discriminator(&self) -> usize {
        self.discriminator
    }

    /// Whether the discriminator type accepts tags it does not know.
    #[inline]
    pub fn tolerates_unknown(&self) -> bool {
        self.tolerates_unknown
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    /// Looks up the model registered under `tag`.
    pub fn resolve(&self, tag: &str) -> Result<Option<&'static TypeModel>, ModelError> {
        let table = self.table.get_or_init(|| {
            let mut table = VariantTable::default();
            for variant in &self.variants {
                table.insert(variant.tag, (variant.model)()?);
            }
            Ok(table)
        });
        match table {
            Ok(table) => Ok(table.get(tag).copied()),
            Err(e) => Err(e.clone()),
        }
    }
}

impl fmt::Debug for Polymorphism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polymorphism")
            .field("discriminator", &self.discriminator)
            .field("tolerates_unknown", &self.tolerates_unknown)
            .field("variants", &self.variants)
            .finish_non_exhaustive()
    }
}
