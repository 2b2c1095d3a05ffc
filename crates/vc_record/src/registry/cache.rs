use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use std::sync::{PoisonError, RwLock};

use vc_utils::TypeIdMap;

use super::{ModelBuilder, ModelError, Record};
use crate::info::TypeModel;

type Entry = Result<&'static TypeModel, ModelError>;

/// The process-wide store of built type models.
///
/// A model is built on first request, outside of any lock, then inserted
/// unless another thread got there first; the first inserted result wins
/// and every caller observes it. Models live for the rest of the process.
/// Build failures are cached too, so a broken type fails the same way on
/// every use.
pub struct ModelCache {
    models: RwLock<TypeIdMap<Entry>>,
}

static GLOBAL: ModelCache = ModelCache::new();

impl ModelCache {
    const fn new() -> Self {
        Self {
            models: RwLock::new(TypeIdMap::new()),
        }
    }

    /// The global cache used by [`Record::type_model`].
    #[inline]
    pub fn global() -> &'static ModelCache {
        &GLOBAL
    }

    /// Returns the cached result for `T`, if it was built.
    pub fn get<T: Record>(&self) -> Option<Entry> {
        self.get_by_type_id(TypeId::of::<T>())
    }

    /// Returns the model of `T`, building it if needed.
    pub fn get_or_build<T: Record>(&self) -> Entry {
        let type_id = TypeId::of::<T>();
        match self.get_by_type_id(type_id) {
            Some(entry) => entry,
            None => self.insert_by_type_id::<T>(type_id, ModelBuilder::<T>::build()),
        }
    }

    /// Number of types with a cached result.
    pub fn len(&self) -> usize {
        self.models.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<Entry> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned()
    }

    #[inline(never)]
    fn insert_by_type_id<T>(&self, type_id: TypeId, built: Result<TypeModel, ModelError>) -> Entry {
        self.models
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, move || match built {
                Ok(model) => Ok(&*Box::leak(Box::new(model))),
                Err(error) => {
                    log::error!("failed to build type model for `{}`: {error}", type_name::<T>());
                    Err(error)
                }
            })
            .clone()
    }
}
