#![cfg(feature = "json")]

use vc_record::{DecodeError, DecodeOptions, KeyMatching, Record, TriState, WireEnum, json};

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, rename_all = "camelCase")]
struct Contact {
    display_name: TriState<String>,
    age: TriState<u32>,
    tags: TriState<Vec<String>>,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, rename_all = "camelCase")]
struct Settings {
    nickname: Option<String>,
    #[record(ignore_null)]
    theme: TriState<String>,
    #[record(read_only)]
    revision: u32,
    #[record(ignore)]
    dirty: bool,
}

#[derive(WireEnum, Debug, Clone, Copy, PartialEq)]
#[record(rename_all = "kebab-case")]
enum PartyType {
    Person,
    Organization,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, rename_all = "camelCase")]
struct Party {
    party_type: TriState<PartyType>,
    name: TriState<String>,
}

#[test]
fn all_unset_round_trip() {
    let contact = Contact::default();
    let text = json::to_string(&contact).unwrap();
    assert_eq!(text, "{}");
    assert_eq!(json::from_str::<Contact>(&text).unwrap(), contact);
}

#[test]
fn each_state_survives_a_round_trip() {
    let contact = Contact {
        display_name: TriState::Value("Ada".to_owned()),
        age: TriState::Null,
        tags: TriState::Unset,
    };
    let text = json::to_string(&contact).unwrap();
    assert_eq!(text, r#"{"displayName":"Ada","age":null}"#);

    let back: Contact = json::from_str(&text).unwrap();
    assert_eq!(back, contact);
    assert!(back.tags.is_unset());
    assert!(back.age.is_null());
}

#[test]
fn collections_inside_a_wrapped_member() {
    let text = r#"{"tags":["a","b"]}"#;
    let contact: Contact = json::from_str(text).unwrap();
    assert_eq!(contact.tags, TriState::Value(vec!["a".to_owned(), "b".to_owned()]));
    assert_eq!(json::to_string(&contact).unwrap(), text);
}

#[test]
fn option_member_reads_none_as_null() {
    let settings = Settings::default();
    assert_eq!(json::to_string(&settings).unwrap(), r#"{"nickname":null,"revision":0}"#);

    let settings: Settings = json::from_str(r#"{"nickname":"ada"}"#).unwrap();
    assert_eq!(settings.nickname.as_deref(), Some("ada"));
}

#[test]
fn ignore_null_omits_the_key() {
    let settings = Settings {
        theme: TriState::Null,
        ..Settings::default()
    };
    let text = json::to_string(&settings).unwrap();
    assert!(!text.contains("theme"));

    // Still read back when present.
    let settings: Settings = json::from_str(r#"{"theme":null}"#).unwrap();
    assert!(settings.theme.is_null());
}

#[test]
fn read_only_member_is_written_but_not_applied() {
    let settings = Settings {
        revision: 3,
        ..Settings::default()
    };
    assert!(json::to_string(&settings).unwrap().contains(r#""revision":3"#));

    let settings: Settings = json::from_str(r#"{"revision":7}"#).unwrap();
    assert_eq!(settings.revision, 0);
}

#[test]
fn ignored_field_is_not_a_member() {
    let model = Settings::type_model().unwrap();
    assert!(model.member("dirty").is_none());
    assert_eq!(model.members().len(), 3);
}

#[test]
fn unknown_keys_are_skipped() {
    let text = r#"{"newField":"x","displayName":"Ada","extra":{"deep":[1,2,{"k":null}]},"age":41}"#;
    let contact: Contact = json::from_str(text).unwrap();
    assert_eq!(contact.display_name, TriState::Value("Ada".to_owned()));
    assert_eq!(contact.age, TriState::Value(41));
    assert!(contact.tags.is_unset());
}

#[test]
fn keys_match_exactly_by_default() {
    let party: Party = json::from_str(r#"{"PARTYTYPE":"person"}"#).unwrap();
    assert!(party.party_type.is_unset());
}

#[test]
fn case_insensitive_keys() {
    let options = DecodeOptions::new().key_matching(KeyMatching::CaseInsensitive);
    let party: Party = json::from_str_with(r#"{"PARTYTYPE":"person","Name":"Ada"}"#, &options).unwrap();
    assert_eq!(party.party_type, TriState::Value(PartyType::Person));
    assert_eq!(party.name, TriState::Value("Ada".to_owned()));

    // Output always uses the modeled keys.
    assert_eq!(
        json::to_string(&party).unwrap(),
        r#"{"partyType":"person","name":"Ada"}"#,
    );
}

#[test]
fn unknown_variant_of_an_exhaustive_enum_fails() {
    let err = json::from_str::<Party>(r#"{"partyType":"robot"}"#).unwrap_err();
    assert!(matches!(err, DecodeError::InMember { member: "party_type", .. }));
    match err.root_cause() {
        DecodeError::UnknownVariant { value, .. } => assert_eq!(value, "robot"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn null_into_a_plain_member_fails() {
    let err = json::from_str::<Settings>(r#"{"revision":null}"#);
    // Read-only members are skipped before their value is looked at.
    assert!(err.is_ok());

    #[derive(Record, Default, Debug)]
    #[record(default)]
    struct Counter {
        count: u32,
    }
    let err = json::from_str::<Counter>(r#"{"count":null}"#).unwrap_err();
    assert!(matches!(err.root_cause(), DecodeError::NullNotAllowed { .. }));
}

#[test]
fn non_object_input_is_rejected() {
    let tokens = json::to_tokens("[1,2]").unwrap();
    let err = vc_record::decode::<Contact>(&tokens, &DecodeOptions::new()).unwrap_err();
    assert!(matches!(err, DecodeError::Token(_)));
}
