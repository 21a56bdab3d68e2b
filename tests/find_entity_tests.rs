use memoform::convert::{CoerceError, CoerceResult};
use memoform::{
    CoercionConfig, Column, ColumnDescriptor, DataType, Entity, EntityMatcher, FormData, FormError,
    Model, RawValue, Value, find_entity, find_model_entity,
};
use serde_json::{Value as JsonValue, json};

#[derive(Debug, Model)]
#[model(table = "users")]
struct User {
    #[column(primary_key)]
    id: i64,
    name: String,
}

#[derive(Debug, Model)]
#[model(table = "memberships")]
struct Membership {
    #[column(primary_key)]
    tenant_id: i32,
    #[column(primary_key)]
    id: i32,
    role: String,
}

fn payload(value: JsonValue) -> FormData {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("payload must be an object, got {other}"),
    }
}

fn users() -> Vec<User> {
    vec![
        User { id: 1, name: "Alice".into() },
        User { id: 2, name: "Bob".into() },
    ]
}

fn memberships() -> Vec<Membership> {
    vec![
        Membership { tenant_id: 1, id: 1, role: "owner".into() },
        Membership { tenant_id: 1, id: 2, role: "member".into() },
        Membership { tenant_id: 2, id: 1, role: "guest".into() },
    ]
}

#[test]
fn test_finds_entity_by_coerced_primary_key() {
    let users = users();
    let found = find_model_entity(&users, &payload(json!({"id": "2", "name": "Robert"}))).unwrap();

    let found = found.expect("user 2 should match");
    assert_eq!(found.name, "Bob");
    assert!(std::ptr::eq(found, &users[1]));
}

#[test]
fn test_explicit_primary_key_columns() {
    let users = users();
    let keys = [Column::new("id", DataType::Integer).primary_key()];
    let found = find_entity(&users, &keys, &payload(json!({"id": "1"}))).unwrap();
    assert_eq!(found.map(|user| user.id), Some(1));
}

#[test]
fn test_missing_primary_key_field() {
    let users = users();
    assert!(find_model_entity(&users, &payload(json!({}))).unwrap().is_none());
    assert!(
        find_model_entity(&users, &payload(json!({"name": "Bob"})))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_blank_primary_key_field() {
    let users = users();
    for blank in [json!(""), json!(null)] {
        let found = find_model_entity(&users, &payload(json!({"id": blank}))).unwrap();
        assert!(found.is_none());
    }
}

#[test]
fn test_unconvertible_primary_key_is_no_match() {
    let users = users();
    let found = find_model_entity(&users, &payload(json!({"id": "abc"}))).unwrap();
    assert!(found.is_none());

    let found = find_model_entity(&users, &payload(json!({"id": ["2"]}))).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_empty_candidates() {
    let users: Vec<User> = Vec::new();
    for data in [json!({"id": "1"}), json!({"id": 1}), json!({"id": "abc"})] {
        assert!(find_model_entity(&users, &payload(data)).unwrap().is_none());
    }
}

#[test]
fn test_unknown_key_value_is_no_match() {
    let users = users();
    let found = find_model_entity(&users, &payload(json!({"id": "3"}))).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_numeric_payload_values() {
    let users = users();
    let found = find_model_entity(&users, &payload(json!({"id": 2}))).unwrap();
    assert_eq!(found.map(|user| user.id), Some(2));
}

#[test]
fn test_composite_key_requires_every_component() {
    let memberships = memberships();

    let found = find_model_entity(&memberships, &payload(json!({"tenant_id": "2", "id": "1"}))).unwrap();
    assert_eq!(found.map(|m| m.role.as_str()), Some("guest"));

    let found = find_model_entity(&memberships, &payload(json!({"tenant_id": "1", "id": "2"}))).unwrap();
    assert_eq!(found.map(|m| m.role.as_str()), Some("member"));

    // tenant 2 exists and id 2 exists, but not together
    let found = find_model_entity(&memberships, &payload(json!({"tenant_id": "2", "id": "2"}))).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_composite_key_with_missing_component() {
    let memberships = memberships();
    let found = find_model_entity(&memberships, &payload(json!({"tenant_id": "1"}))).unwrap();
    assert!(found.is_none());

    let found = find_model_entity(&memberships, &payload(json!({"tenant_id": "1", "id": ""}))).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_composite_key_with_bad_component() {
    let memberships = memberships();
    let found =
        find_model_entity(&memberships, &payload(json!({"tenant_id": "one", "id": "1"}))).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_trait_object_candidates() {
    let users = users();
    let candidates: Vec<&dyn Entity> = users.iter().map(|user| user as &dyn Entity).collect();
    let keys: Vec<Column> = User::table().primary_keys().cloned().collect();

    let found = find_entity(candidates.iter().copied(), &keys, &payload(json!({"id": "1"}))).unwrap();
    let found = found.expect("user 1 should match");
    assert_eq!(found.attribute("name").unwrap(), Value::Text("Alice".into()));
}

/// Key column whose coercion depends on an external lookup.
struct SlugColumn {
    known: Vec<&'static str>,
}

impl ColumnDescriptor for SlugColumn {
    fn name(&self) -> &str {
        "id"
    }

    fn coerce(&self, raw: &RawValue, _config: &CoercionConfig) -> CoerceResult<Value> {
        let slug = raw.as_str().ok_or(CoerceError::WrongType {
            data_type: DataType::Integer,
            found: "non-string",
        })?;
        match self.known.iter().position(|known| *known == slug) {
            Some(idx) => Ok(Value::Integer(idx as i64 + 1)),
            None if slug.starts_with('!') => Err(CoerceError::Rejected(format!("reserved slug '{slug}'"))),
            None => Err(CoerceError::format(DataType::Integer, slug, "unknown slug")),
        }
    }
}

#[test]
fn test_custom_descriptor_recoverable_failures() {
    let users = users();
    let keys = [SlugColumn { known: vec!["alice", "bob"] }];

    let found = find_entity(&users, &keys, &payload(json!({"id": "bob"}))).unwrap();
    assert_eq!(found.map(|user| user.id), Some(2));

    assert!(find_entity(&users, &keys, &payload(json!({"id": "carol"}))).unwrap().is_none());
    assert!(find_entity(&users, &keys, &payload(json!({"id": 5}))).unwrap().is_none());
}

#[test]
fn test_custom_descriptor_unrecognized_failure_propagates() {
    let users = users();
    let keys = [SlugColumn { known: vec!["alice"] }];

    let err = find_entity(&users, &keys, &payload(json!({"id": "!admin"}))).unwrap_err();
    match err {
        FormError::Coercion(message) => assert!(message.contains("reserved slug")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_matcher_with_configured_formats() {
    #[derive(Model)]
    struct Shift {
        #[column(primary_key)]
        day: chrono::NaiveDate,
        #[column(primary_key)]
        starts_at: chrono::NaiveTime,
    }

    let shifts = vec![
        Shift {
            day: chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            starts_at: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        },
        Shift {
            day: chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            starts_at: chrono::NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        },
    ];
    let data = payload(json!({"day": "08/01/2024", "starts_at": "16:00"}));

    assert!(find_model_entity(&shifts, &data).unwrap().is_none());

    let matcher = EntityMatcher::new(CoercionConfig::new().date_format("%d/%m/%Y").time_format("%H:%M"));
    let found = matcher.find_model(&shifts, &data).unwrap();
    assert!(std::ptr::eq(found.unwrap(), &shifts[1]));
}

#[derive(Debug, Model)]
struct Reading {
    #[column(primary_key)]
    value: f64,
    label: String,
}

fn readings() -> Vec<Reading> {
    vec![
        Reading { value: 1e-20, label: "tiny".into() },
        Reading { value: 2e-20, label: "twice tiny".into() },
        Reading { value: 2.0, label: "two".into() },
        Reading { value: f64::NAN, label: "undefined".into() },
    ]
}

#[test]
fn test_float_key_matches_exactly() {
    let readings = readings();

    let found = find_model_entity(&readings, &payload(json!({"value": "2e-20"}))).unwrap();
    assert_eq!(found.map(|r| r.label.as_str()), Some("twice tiny"));

    let found = find_model_entity(&readings, &payload(json!({"value": 1e-20}))).unwrap();
    assert_eq!(found.map(|r| r.label.as_str()), Some("tiny"));

    let found = find_model_entity(&readings, &payload(json!({"value": 2}))).unwrap();
    assert_eq!(found.map(|r| r.label.as_str()), Some("two"));
}

#[test]
fn test_near_equal_float_key_is_no_match() {
    let readings = readings();
    for near in [json!("1.5e-20"), json!(2.0000000000000004), json!("3e-20")] {
        let found = find_model_entity(&readings, &payload(json!({"value": near}))).unwrap();
        assert!(found.is_none(), "{near} should not match");
    }
}

#[test]
fn test_nan_key_never_matches() {
    let readings = readings();
    let found = find_model_entity(&readings, &payload(json!({"value": "NaN"}))).unwrap();
    assert!(found.is_none());
}

#[derive(Debug, Model)]
struct Token {
    #[column(primary_key)]
    id: uuid::Uuid,
    #[column(primary_key)]
    scope: String,
}

#[test]
fn test_uuid_and_text_keys() {
    let first = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
    let second = uuid::Uuid::parse_str("a3bb189e-8bf9-3888-9912-ace4e6543002").unwrap();
    let tokens = vec![
        Token { id: first, scope: "read".into() },
        Token { id: first, scope: "write".into() },
        Token { id: second, scope: "read".into() },
    ];

    let found = find_model_entity(
        &tokens,
        &payload(json!({"id": "67E55044-10B1-426F-9247-BB680E5FE0C8", "scope": "write"})),
    )
    .unwrap();
    assert!(std::ptr::eq(found.unwrap(), &tokens[1]));

    let found = find_model_entity(&tokens, &payload(json!({"id": second.to_string(), "scope": "read"}))).unwrap();
    assert!(std::ptr::eq(found.unwrap(), &tokens[2]));

    // text keys compare exactly, case included
    let found = find_model_entity(&tokens, &payload(json!({"id": first.to_string(), "scope": "Read"}))).unwrap();
    assert!(found.is_none());

    let found = find_model_entity(&tokens, &payload(json!({"id": "not-a-uuid", "scope": "read"}))).unwrap();
    assert!(found.is_none());
}
