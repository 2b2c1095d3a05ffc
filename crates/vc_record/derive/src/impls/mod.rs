// -----------------------------------------------------------------------------
// Modules

mod record;
mod wire_enum;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use record::impl_record;
pub(crate) use wire_enum::impl_wire_enum;
