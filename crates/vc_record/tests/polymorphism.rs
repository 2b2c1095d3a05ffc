#![cfg(feature = "json")]

use vc_record::{DecodeError, DecodeOptions, NonExhaustive, Poly, Record, Tag, TriState, WireEnum, json};

#[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
#[record(rename_all = "kebab-case")]
enum Kind {
    LeftChild,
    #[record(rename = "right-child-1")]
    RightChild,
    RightGrandChild,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
#[record(variant(LeftChild, "left-child"))]
#[record(variant(RightChild, "right-child-1", "right-child-2"))]
#[record(variant(RightGrandChild, "right-grand-child"))]
struct Node {
    #[record(discriminator, rename = "type")]
    kind: TriState<NonExhaustive<Kind>>,
    name: TriState<String>,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct LeftChild {
    #[record(parent)]
    node: Node,
    left: TriState<u32>,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct RightChild {
    #[record(parent)]
    node: Node,
    weight: TriState<u32>,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct RightGrandChild {
    #[record(parent)]
    right: RightChild,
    depth: TriState<u32>,
}

fn poly<T: Record>(text: &str) -> Result<Poly<T>, DecodeError> {
    json::from_str_poly(text, &DecodeOptions::new())
}

fn kind(tag: &str) -> TriState<NonExhaustive<Kind>> {
    TriState::Value(NonExhaustive::from_tag(tag).unwrap())
}

#[test]
fn tag_selects_the_variant() {
    let node = poly::<Node>(r#"{"name":"l","type":"left-child","left":4}"#).unwrap();
    let left = node.downcast_ref::<LeftChild>().unwrap();
    assert_eq!(left.left, TriState::Value(4));
    assert_eq!(node.get().name, TriState::Value("l".to_owned()));
    assert_eq!(node.get().kind, TriState::Value(NonExhaustive::Known(Kind::LeftChild)));
}

#[test]
fn unknown_tag_falls_back_to_the_root() {
    let text = r#"{"type":"unknown-value","name":"x"}"#;
    let node = poly::<Node>(text).unwrap();
    assert!(node.is::<Node>());
    assert_eq!(
        node.get().kind,
        TriState::Value(NonExhaustive::Unknown("unknown-value".to_owned())),
    );
    assert_eq!(json::to_string(&node).unwrap(), text);

    // A plain decode agrees, since nothing more derived was selected.
    let plain: Node = json::from_str(text).unwrap();
    assert_eq!(json::to_string(&plain).unwrap(), text);
}

#[test]
fn absent_and_null_tags_stay_distinct() {
    let absent = poly::<Node>(r#"{"name":"a"}"#).unwrap();
    assert!(absent.is::<Node>());
    assert!(absent.get().kind.is_unset());
    assert_eq!(json::to_string(&absent).unwrap(), r#"{"name":"a"}"#);

    let null = poly::<Node>(r#"{"type":null,"name":"a"}"#).unwrap();
    assert!(null.is::<Node>());
    assert!(null.get().kind.is_null());
    assert_eq!(json::to_string(&null).unwrap(), r#"{"type":null,"name":"a"}"#);
}

#[test]
fn several_tags_map_to_one_type() {
    for tag in ["right-child-1", "right-child-2"] {
        let text = format!(r#"{{"type":"{tag}"}}"#);
        let node = poly::<Node>(&text).unwrap();
        assert!(node.is::<RightChild>(), "{tag}");
        assert_eq!(node.get().kind, kind(tag));
        // Re-encoded with the tag it was read with.
        assert_eq!(json::to_string(&node).unwrap(), text);
    }
}

#[test]
fn deep_hierarchy_decodes_from_any_ancestor() {
    let text = r#"{"depth":2,"weight":5,"type":"right-grand-child","name":"g"}"#;

    let from_root = poly::<Node>(text).unwrap();
    let grand = from_root.downcast_ref::<RightGrandChild>().unwrap();
    assert_eq!(grand.depth, TriState::Value(2));
    assert_eq!(grand.right.weight, TriState::Value(5));
    assert_eq!(from_root.get().name, TriState::Value("g".to_owned()));
    assert_eq!(json::to_string(&from_root).unwrap(), text);

    let from_child = poly::<RightChild>(text).unwrap();
    assert!(from_child.is::<RightGrandChild>());
    assert_eq!(from_child.get().weight, TriState::Value(5));

    let exact: RightGrandChild = json::from_str(text).unwrap();
    assert_eq!(&exact, grand);
}

#[test]
fn unrelated_target_is_rejected() {
    let text = r#"{"type":"right-grand-child"}"#;
    let err = poly::<LeftChild>(text).unwrap_err();
    assert!(matches!(err, DecodeError::IncompatibleType { .. }), "{err}");

    // The same holds when the tag names a sibling.
    let err = json::from_str::<LeftChild>(r#"{"type":"right-child-1"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::IncompatibleType { .. }), "{err}");
}

#[test]
fn untagged_input_resolves_to_the_root() {
    // Absent, null, and unmapped tags all select `Node`, which is not a `RightChild`.
    for text in [r#"{"weight":1}"#, r#"{"type":null}"#, r#"{"type":"unknown-value"}"#] {
        let err = poly::<RightChild>(text).unwrap_err();
        match err {
            DecodeError::IncompatibleType { requested, resolved } => {
                assert!(requested.ends_with("RightChild"), "{text}");
                assert!(resolved.ends_with("Node"), "{text}");
            }
            other => panic!("{text}: unexpected error: {other}"),
        }
        assert!(
            matches!(json::from_str::<RightChild>(text), Err(DecodeError::IncompatibleType { .. })),
            "{text}",
        );
    }

    // The root itself still accepts all three.
    for text in [r#"{"weight":1}"#, r#"{"type":null}"#, r#"{"type":"unknown-value"}"#] {
        assert!(poly::<Node>(text).unwrap().is::<Node>(), "{text}");
    }
}

#[test]
fn exact_decode_of_a_subtype_needs_poly() {
    let err = json::from_str::<Node>(r#"{"type":"left-child"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::RequiresPoly { .. }), "{err}");
}

#[test]
fn polymorphic_values_nest() {
    #[derive(Record, Default, Debug)]
    #[record(default)]
    struct Forest {
        nodes: Vec<Poly<Node>>,
    }

    let text = r#"{"nodes":[{"left":1,"type":"left-child"},{"name":"root"},{"weight":3,"type":"right-child-2"}]}"#;
    let forest: Forest = json::from_str(text).unwrap();
    assert!(forest.nodes[0].is::<LeftChild>());
    assert!(forest.nodes[1].is::<Node>());
    assert!(forest.nodes[2].is::<RightChild>());
    assert_eq!(json::to_string(&forest).unwrap(), text);
}

#[test]
fn poly_from_a_concrete_value() {
    let grand = RightGrandChild {
        right: RightChild {
            node: Node {
                kind: TriState::Value(NonExhaustive::Known(Kind::RightGrandChild)),
                name: TriState::Unset,
            },
            weight: TriState::Null,
        },
        depth: TriState::Value(9),
    };
    let mut node = Poly::<Node>::new(grand).unwrap();
    node.get_mut().name = TriState::Value("n".to_owned());
    assert_eq!(
        json::to_string(&node).unwrap(),
        r#"{"depth":9,"weight":null,"type":"right-grand-child","name":"n"}"#,
    );

    let grand = node.downcast::<RightGrandChild>().unwrap();
    assert_eq!(grand.right.node.name, TriState::Value("n".to_owned()));

    assert!(Poly::<LeftChild>::new(Node::default()).is_err());
}

#[test]
fn variant_table_is_introspectable() {
    let model = Node::type_model().unwrap();
    let poly = model.polymorphism().unwrap();
    assert!(poly.tolerates_unknown());
    assert_eq!(model.members()[poly.discriminator()].key(), "type");
    let tags: Vec<_> = poly.variants().iter().map(|v| v.tag()).collect();
    assert_eq!(tags, ["left-child", "right-child-1", "right-child-2", "right-grand-child"]);

    let grand = RightGrandChild::type_model().unwrap();
    assert!(grand.is_subtype_of(model));
    assert!(grand.is_subtype_of(RightChild::type_model().unwrap()));
    assert!(!grand.is_subtype_of(LeftChild::type_model().unwrap()));
    assert_eq!(grand.polymorphic_root().map(|m| m.type_name()), Some(model.type_name()));
}
