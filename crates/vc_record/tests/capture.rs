#![cfg(feature = "json")]

use vc_record::{CaptureMap, DecodeOptions, Record, TriState, json};

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, rename_all = "camelCase")]
struct Profile {
    display_name: TriState<String>,
    #[record(capture)]
    extra: CaptureMap,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Admin {
    #[record(parent)]
    profile: Profile,
    level: u8,
}

#[test]
fn unknown_keys_are_captured_and_written_back() {
    let text = r#"{"displayName":"Ada","newField":"x","nested":{"a":[1,null,true]}}"#;
    let profile: Profile = json::from_str(text).unwrap();
    assert_eq!(profile.extra.len(), 2);
    assert_eq!(
        profile.extra.get("newField").unwrap().decode_as::<String>(&DecodeOptions::new()).unwrap(),
        "x",
    );
    assert_eq!(json::to_string(&profile).unwrap(), text);
}

#[test]
fn capture_can_be_turned_off() {
    let options = DecodeOptions::new().capture_unmatched(false);
    let profile: Profile = json::from_str_with(r#"{"newField":"x"}"#, &options).unwrap();
    assert!(profile.extra.is_empty());
    assert_eq!(json::to_string(&profile).unwrap(), "{}");
}

#[test]
fn captured_keys_never_shadow_members() {
    let mut profile = Profile {
        display_name: TriState::Value("Ada".to_owned()),
        ..Profile::default()
    };
    let raw = json::to_tokens(r#""Grace""#).unwrap();
    profile.extra.insert("displayName", vc_record::RawValue::new(raw));
    let raw = json::to_tokens("1").unwrap();
    profile.extra.insert("other", vc_record::RawValue::new(raw));

    assert_eq!(
        json::to_string(&profile).unwrap(),
        r#"{"displayName":"Ada","other":1}"#,
    );
}

#[test]
fn derived_types_inherit_the_slot() {
    let text = r#"{"level":3,"displayName":"Root","newField":"x"}"#;
    let admin: Admin = json::from_str(text).unwrap();
    assert_eq!(admin.level, 3);
    assert_eq!(admin.profile.extra.len(), 1);
    assert_eq!(json::to_string(&admin).unwrap(), text);

    let model = Admin::type_model().unwrap();
    let slot = model.capture().unwrap();
    assert_eq!(slot.name(), "extra");
    assert!(slot.declaring_type().ends_with("Profile"));
}

#[test]
fn capture_slot_is_not_a_member() {
    let model = Profile::type_model().unwrap();
    assert!(model.member("extra").is_none());
    assert_eq!(model.members().len(), 1);
}
