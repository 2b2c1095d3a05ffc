//! Small shared utilities for the `vc_data` crates.
//!
//! - [`hash`]: fixed-seed hashing and `hashbrown` containers.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`pool`]: thread-local pools for per-call scratch buffers.
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;
pub mod pool;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
