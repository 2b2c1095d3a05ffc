#![cfg(feature = "json")]

use vc_record::{DecodeError, DecodeOptions, KeyMatching, Record, TriState, json};

#[derive(Record, Debug, PartialEq)]
#[record(rename_all = "camelCase", constructor(call = new, params(user_id, display_name)))]
struct Account {
    user_id: u64,
    display_name: String,
    #[record(required)]
    email: String,
    bio: TriState<String>,
}

impl Account {
    fn new(user_id: u64, display_name: String) -> Self {
        Self {
            user_id,
            display_name,
            email: String::new(),
            bio: TriState::Unset,
        }
    }
}

fn default_port() -> u16 {
    8080
}

#[derive(Record, Debug, PartialEq)]
#[record(constructor(call = new, params(host, port, retries, label)))]
struct Endpoint {
    host: String,
    #[record(default = default_port)]
    port: u16,
    #[record(default)]
    retries: u32,
    label: TriState<String>,
}

impl Endpoint {
    fn new(host: String, port: u16, retries: u32, label: TriState<String>) -> Self {
        Self {
            host,
            port,
            retries,
            label,
        }
    }
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, constructor(call = with_id, params(id)))]
struct Fallback {
    id: u32,
}

impl Fallback {
    fn with_id(id: u32) -> Self {
        Self { id: id + 1000 }
    }
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default, constructor(call = with_id, params(id), preferred))]
struct Preferring {
    id: u32,
}

impl Preferring {
    fn with_id(id: u32) -> Self {
        Self { id: id + 1000 }
    }
}

#[test]
fn bound_members_come_first() {
    let model = Account::type_model().unwrap();
    let keys: Vec<_> = model.members().iter().map(|m| m.key()).collect();
    assert_eq!(keys, ["userId", "displayName", "email", "bio"]);

    let params = model.constructor().params();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name(), "user_id");
    assert_eq!(params[1].name(), "display_name");
    assert_eq!(model.members()[params[1].member()].name(), "display_name");
    assert_eq!(model.member("email").unwrap().parameter(), None);
}

#[test]
fn constructor_round_trip() {
    let mut account = Account::new(7, "Ada".to_owned());
    account.email = "ada@example.com".to_owned();
    account.bio = TriState::Null;

    let text = json::to_string(&account).unwrap();
    assert_eq!(
        text,
        r#"{"userId":7,"displayName":"Ada","email":"ada@example.com","bio":null}"#,
    );
    assert_eq!(json::from_str::<Account>(&text).unwrap(), account);
}

#[test]
fn parameters_are_found_in_any_order() {
    let text = r#"{"bio":"hi","newField":[1],"email":"e@x","displayName":"Ada","userId":7}"#;
    let account: Account = json::from_str(text).unwrap();
    assert_eq!(account.user_id, 7);
    assert_eq!(account.display_name, "Ada");
    assert_eq!(account.email, "e@x");
    assert_eq!(account.bio, TriState::Value("hi".to_owned()));
}

#[test]
fn missing_parameter_is_named() {
    let err = json::from_str::<Account>(r#"{"displayName":"Ada","email":"e@x"}"#).unwrap_err();
    match err {
        DecodeError::MissingParameter { parameter, .. } => assert_eq!(parameter, "user_id"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_required_member_is_named_alone() {
    let err = json::from_str::<Account>(r#"{"userId":1,"displayName":"Ada"}"#).unwrap_err();
    match err {
        DecodeError::MissingMembers { members, .. } => assert_eq!(members, ["email"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn required_members_are_reported_together() {
    #[derive(Record, Default, Debug)]
    #[record(default, rename_all = "camelCase")]
    struct Pair {
        #[record(required)]
        first_name: String,
        #[record(required)]
        last_name: String,
        nickname: TriState<String>,
    }

    let err = json::from_str::<Pair>(r#"{"nickname":"x"}"#).unwrap_err();
    match err {
        DecodeError::MissingMembers { members, .. } => assert_eq!(members, ["firstName", "lastName"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn absent_parameters_take_defaults() {
    let endpoint: Endpoint = json::from_str(r#"{"host":"localhost"}"#).unwrap();
    assert_eq!(endpoint.port, 8080);
    assert_eq!(endpoint.retries, 0);
    assert!(endpoint.label.is_unset());

    let endpoint: Endpoint = json::from_str(r#"{"host":"h","port":1,"retries":3,"label":null}"#).unwrap();
    assert_eq!(endpoint.port, 1);
    assert_eq!(endpoint.retries, 3);
    assert!(endpoint.label.is_null());

    let params = Endpoint::type_model().unwrap().constructor().params();
    assert!(!params[0].has_default());
    assert!(params.iter().skip(1).all(|p| p.has_default()));
    // A tri-state parameter defaults to `Unset` without being told to.
    assert_eq!(params[3].name(), "label");
    assert!(params[3].has_default());
}

#[test]
fn keys_override_defaults() {
    #[derive(Record, Debug, PartialEq)]
    #[record(constructor(call = new, params(width, height)))]
    struct Window {
        #[record(default)]
        width: u32,
        height: TriState<u32>,
    }

    impl Window {
        fn new(width: u32, height: TriState<u32>) -> Self {
            Self { width, height }
        }
    }

    let window: Window = json::from_str("{}").unwrap();
    assert_eq!(window, Window::new(0, TriState::Unset));

    // Every slot starts filled, yet both keys are still read.
    let window: Window = json::from_str(r#"{"extra":true,"height":2,"width":5}"#).unwrap();
    assert_eq!(window, Window::new(5, TriState::Value(2)));
}

#[test]
fn parameter_values_are_not_applied_twice() {
    // The member pass skips bound keys, so the constructor's adjustment sticks.
    let fallback: Preferring = json::from_str(r#"{"id":1}"#).unwrap();
    assert_eq!(fallback.id, 1001);
}

#[test]
fn parameterless_constructor_wins_a_tie() {
    let model = Fallback::type_model().unwrap();
    assert!(model.constructor().is_parameterless());

    let fallback: Fallback = json::from_str(r#"{"id":1}"#).unwrap();
    assert_eq!(fallback.id, 1);
}

#[test]
fn preferred_constructor_wins() {
    let model = Preferring::type_model().unwrap();
    assert!(model.constructor().is_preferred());
    assert_eq!(model.constructor().params().len(), 1);
}

#[test]
fn case_insensitive_parameters() {
    let options = DecodeOptions::new().key_matching(KeyMatching::CaseInsensitive);
    let account: Account =
        json::from_str_with(r#"{"USERID":3,"DisplayName":"Ada","EMAIL":"e@x"}"#, &options).unwrap();
    assert_eq!(account.user_id, 3);
    assert_eq!(account.display_name, "Ada");
    assert_eq!(account.email, "e@x");
}

#[test]
fn parameter_errors_carry_the_member() {
    let err = json::from_str::<Account>(r#"{"userId":"seven","displayName":"Ada","email":"e@x"}"#)
        .unwrap_err();
    assert!(matches!(err, DecodeError::InMember { member: "user_id", .. }), "{err}");
    assert!(matches!(err.root_cause(), DecodeError::Token(_)));
}
