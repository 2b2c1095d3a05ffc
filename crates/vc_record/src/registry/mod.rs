//! Declaring records and building their type models.
//!
//! A [`Record`] describes itself to a [`ModelBuilder`]; the resulting
//! [`TypeModel`](crate::TypeModel) is built once and kept in the
//! [`ModelCache`].

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod cache;
mod error;
mod record;

// -----------------------------------------------------------------------------
// Exports

pub use builder::{MemberOptions, ModelBuilder};
pub use cache::ModelCache;
pub use error::ModelError;
pub use record::{AnyRecord, ParentLink, Record};
