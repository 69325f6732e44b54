use todolist_core::{ItemValidationError, TodoItem};
use uuid::Uuid;

#[test]
fn new_item_sets_defaults() {
    let item = TodoItem::new("buy milk").unwrap();

    assert!(!item.id.is_nil());
    assert_eq!(item.title, "buy milk");
    assert!(!item.is_completed);
}

#[test]
fn new_items_get_distinct_ids() {
    let first = TodoItem::new("a").unwrap();
    let second = TodoItem::new("a").unwrap();
    assert_ne!(first.id, second.id);
    assert_ne!(first, second);
}

#[test]
fn with_id_rejects_nil_id() {
    let err = TodoItem::with_id(Uuid::nil(), "invalid", false).unwrap_err();
    assert_eq!(err, ItemValidationError::NilId);
}

#[test]
fn serialization_uses_stored_wire_names() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let item = TodoItem::with_id(id, "ship release", true).unwrap();

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["isCompleted"], true);
    assert!(json.get("is_completed").is_none());

    let decoded: TodoItem = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn deserialize_accepts_upper_case_ids() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555".to_uppercase(),
        "title": "legacy",
        "isCompleted": false
    });

    let item: TodoItem = serde_json::from_value(value).unwrap();
    assert_eq!(
        item.id,
        Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap()
    );
}

#[test]
fn deserialize_rejects_empty_title() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "title": "",
        "isCompleted": false
    });

    let err = serde_json::from_value::<TodoItem>(value).unwrap_err();
    assert!(
        err.to_string().contains("item title must not be empty"),
        "unexpected error: {err}"
    );
}
