//! Reading and writing records over a token stream.
//!
//! Encoding walks a record's model in order and writes one object. Decoding
//! first resolves the concrete model through the polymorphic dispatcher,
//! then fills an instance: in one pass for records with a parameterless
//! constructor, in two passes over the same object otherwise.

// -----------------------------------------------------------------------------
// Modules

mod api;
mod decode;
mod dispatch;
mod encode;
mod error;
mod name_table;
mod options;
mod poly;
mod scratch;

// -----------------------------------------------------------------------------
// Exports

pub use api::{
    decode, decode_poly, decode_record, decode_record_poly, encode, encode_dyn, encode_record,
    encode_record_dyn,
};
pub use error::{DecodeError, EncodeError};
pub use options::{DecodeOptions, KeyMatching};
pub use poly::Poly;

pub(crate) use name_table::NameTable;
