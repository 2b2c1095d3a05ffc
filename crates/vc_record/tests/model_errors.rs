#![cfg(feature = "json")]

use std::collections::BTreeMap;

use vc_record::{
    CaptureMap, Constructor, DecodeError, DecodeOptions, EncodeError, ModelBuilder, ModelCache,
    ModelError, NonExhaustive, RawValue, Record, TriState, Wire, WireEnum, json,
};
use vc_token::{TokenReader, TokenWriter};

#[derive(Record, Debug)]
struct NoConstructor {
    value: u32,
}

#[derive(Record, Debug)]
#[record(constructor(call = from_a, params(a)), constructor(call = from_b, params(b)))]
struct TwoConstructors {
    a: u32,
    b: u32,
}

impl TwoConstructors {
    fn from_a(a: u32) -> Self {
        Self { a, b: 0 }
    }

    fn from_b(b: u32) -> Self {
        Self { a: 0, b }
    }
}

#[derive(Record, Default, Debug)]
#[record(default, constructor(call = from_a, params(a), preferred))]
#[record(constructor(call = from_b, params(b), preferred))]
struct TwoPreferred {
    a: u32,
    b: u32,
}

impl TwoPreferred {
    fn from_a(a: u32) -> Self {
        Self { a, b: 0 }
    }

    fn from_b(b: u32) -> Self {
        Self { a: 0, b }
    }
}

#[derive(Record, Debug)]
#[record(constructor(call = new, params(missing)))]
struct Unmatched {
    present: u32,
}

impl Unmatched {
    fn new(missing: u32) -> Self {
        Self { present: missing }
    }
}

struct MismatchedDefault {
    count: u32,
}

impl Record for MismatchedDefault {
    fn describe(builder: &mut ModelBuilder<Self>) {
        builder.plain::<u32>("count", |v| &v.count, |v| &mut v.count);
        builder.constructor(
            Constructor::new(|args| Ok(MismatchedDefault { count: args.take(0)? }))
                .param_default("count", || String::from("zero")),
        );
    }
}

impl Wire for MismatchedDefault {
    fn encode(&self, writer: &mut TokenWriter) -> Result<(), EncodeError> {
        vc_record::encode_record(self, writer)
    }

    fn decode(reader: &mut TokenReader<'_>, options: &DecodeOptions) -> Result<Self, DecodeError> {
        vc_record::decode_record(reader, options)
    }
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct MapCapture {
    #[record(capture)]
    extra: BTreeMap<String, RawValue>,
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct WrappedCapture {
    #[record(capture)]
    extra: TriState<CaptureMap>,
}

#[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
enum Shape {
    Circle,
}

#[derive(Record, Default, Debug)]
#[record(default, variant(Circle, "circle"), variant(Square, "circle"))]
struct DuplicateTag {
    #[record(discriminator)]
    kind: TriState<NonExhaustive<Shape>>,
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct Circle {
    #[record(parent)]
    base: DuplicateTag,
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct Square {
    #[record(parent)]
    base: DuplicateTag,
}

#[derive(Record, Default, Debug)]
#[record(default, polymorphic)]
struct NoDiscriminator {
    name: TriState<String>,
}

#[derive(Record, Default, Debug)]
#[record(default, variant(Stranger, "stranger"))]
struct Adopter {
    #[record(discriminator)]
    kind: TriState<NonExhaustive<Shape>>,
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct Stranger {
    name: TriState<String>,
}

#[derive(Record, Default, Debug)]
#[record(default)]
struct DuplicateKey {
    #[record(rename = "id")]
    first: u32,
    #[record(rename = "id")]
    second: u32,
}

#[derive(Record, Debug)]
struct Orphan {
    #[record(parent)]
    base: NoConstructor,
}

#[test]
fn no_constructor() {
    let err = NoConstructor::type_model().unwrap_err();
    assert!(matches!(err, ModelError::NoConstructor { .. }), "{err}");
}

#[test]
fn ambiguous_constructors() {
    let err = TwoConstructors::type_model().unwrap_err();
    assert!(matches!(err, ModelError::AmbiguousConstructor { count: 2, .. }), "{err}");

    let err = TwoPreferred::type_model().unwrap_err();
    assert!(matches!(err, ModelError::AmbiguousConstructor { count: 2, .. }), "{err}");
}

#[test]
fn unmatched_parameter() {
    let err = Unmatched::type_model().unwrap_err();
    assert!(
        matches!(err, ModelError::UnmatchedParameter { parameter: "missing", .. }),
        "{err}",
    );
}

#[test]
fn default_of_the_wrong_type() {
    let err = MismatchedDefault::type_model().unwrap_err();
    assert!(
        matches!(err, ModelError::DefaultTypeMismatch { parameter: "count", .. }),
        "{err}",
    );
}

#[test]
fn capture_slot_types() {
    let err = MapCapture::type_model().unwrap_err();
    assert!(matches!(err, ModelError::InvalidCaptureSlot { member: "extra", .. }), "{err}");

    let err = WrappedCapture::type_model().unwrap_err();
    assert!(matches!(err, ModelError::WrappedCaptureSlot { member: "extra", .. }), "{err}");
}

#[test]
fn duplicate_tag() {
    let err = DuplicateTag::type_model().unwrap_err();
    match err {
        ModelError::DuplicateTag { tag, .. } => assert_eq!(tag, "circle"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn polymorphic_root_needs_a_discriminator() {
    let err = NoDiscriminator::type_model().unwrap_err();
    assert!(matches!(err, ModelError::MissingDiscriminator { .. }), "{err}");
}

#[test]
fn variant_must_descend_from_the_root() {
    let err = Adopter::type_model().unwrap_err();
    assert!(matches!(err, ModelError::NotASubtype { .. }), "{err}");
}

#[test]
fn duplicate_key() {
    let err = DuplicateKey::type_model().unwrap_err();
    match err {
        ModelError::DuplicateMember { key, .. } => assert_eq!(key, "id"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn broken_parent() {
    let err = Orphan::type_model().unwrap_err();
    match err {
        ModelError::Parent { source, .. } => {
            assert!(matches!(*source, ModelError::NoConstructor { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failures_are_cached_and_surface_on_use() {
    let first = NoConstructor::type_model().unwrap_err();
    let second = ModelCache::global().get::<NoConstructor>().unwrap().unwrap_err();
    assert_eq!(first, second);

    let err = json::from_str::<NoConstructor>("{}").unwrap_err();
    assert!(matches!(err, DecodeError::Model(ModelError::NoConstructor { .. })), "{err}");

    let err = json::to_string(&NoConstructor { value: 1 }).unwrap_err();
    assert!(matches!(err, EncodeError::Model(ModelError::NoConstructor { .. })), "{err}");
}
