//! Parsing of `#[record(...)]` attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::{DefaultValue, FieldAttributes, VariantAttributes};
pub(crate) use type_attributes::{ConstructorAttribute, TypeAttributes};

pub(crate) const RECORD_ATTRIBUTE_NAME: &str = "record";
