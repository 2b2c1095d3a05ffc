//! A record serialization engine with three-state members and
//! discriminated polymorphism.
//!
//! - [`TriState`]: a member that is `Unset` (key absent), `Null` (explicit
//!   `null`) or holds a `Value`.
//! - [`Record`] and [`TypeModel`]: a record type describes its members,
//!   constructors, capture slot, and parent once; the model is cached for the
//!   life of the process.
//! - The codec ([`encode`], [`decode`], [`decode_poly`]) reads and writes
//!   records over a [`vc_token`] stream, with `Unset` members left out of the
//!   output and unknown keys tolerated on input.
//! - Polymorphic roots pick the concrete type from a discriminator member;
//!   unknown tags fall back to the requested type instead of failing.
//!
//! # Examples
//!
//! ```
//! use vc_record::{NonExhaustive, Poly, Record, TriState, WireEnum, json};
//!
//! #[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
//! #[record(rename_all = "kebab-case")]
//! enum Kind {
//!     Circle,
//! }
//!
//! #[derive(Record, Default, Debug)]
//! #[record(default, variant(Circle, "circle"))]
//! struct Shape {
//!     #[record(discriminator, rename = "type")]
//!     kind: TriState<NonExhaustive<Kind>>,
//! }
//!
//! #[derive(Record, Default, Debug)]
//! #[record(default)]
//! struct Circle {
//!     #[record(parent)]
//!     shape: Shape,
//!     radius: f64,
//! }
//!
//! // Declared members come before inherited ones.
//! let text = r#"{"radius":1.5,"type":"circle"}"#;
//! let shape: Poly<Shape> = json::from_str(text).unwrap();
//! assert_eq!(shape.downcast_ref::<Circle>().unwrap().radius, 1.5);
//! assert_eq!(json::to_string(&shape).unwrap(), text);
//!
//! let future: Poly<Shape> = json::from_str(r#"{"type":"hexagon"}"#).unwrap();
//! assert!(future.is::<Shape>());
//! assert_eq!(
//!     future.get().kind,
//!     TriState::Value(NonExhaustive::Unknown("hexagon".to_owned())),
//! );
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Lets the derive macros name `vc_record` from inside this crate.
extern crate self as vc_record;

// -----------------------------------------------------------------------------
// Modules

pub mod codec;
pub mod info;
pub mod registry;
pub mod value;

#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub mod json;

mod tri_state;

// -----------------------------------------------------------------------------
// Top-level exports

pub use codec::{
    DecodeError, DecodeOptions, EncodeError, KeyMatching, Poly, decode, decode_poly,
    decode_record, decode_record_poly, encode, encode_dyn, encode_record, encode_record_dyn,
};
pub use info::{Constructor, ConstructorArgs, NamingPolicy, TypeModel};
pub use registry::{AnyRecord, ModelBuilder, ModelCache, ModelError, ParentLink, Record};
pub use tri_state::TriState;
pub use value::{CaptureMap, NonExhaustive, RawValue, Tag, Wire};

pub use vc_record_derive::{Record, WireEnum};

#[doc(hidden)]
pub mod __macro_exports {
    pub use vc_token::{TokenReader, TokenWriter};
}
