mod common;

use common::{SomeItem, at, first_item, init_logging, second_item};
use recmap::{Mapper, MapperConfig, Policy, SKIP_MARKER, Value, convert_to_map};
use serde_json::json;

fn time(seconds: i64) -> Value {
    serde_json::to_value(at(seconds)).expect("timestamps serialize")
}

#[test]
fn db_tag_with_default_value() {
    init_logging();
    let mapper = Mapper::<SomeItem>::new().with_default("DEFAULT");

    let first = mapper.convert(&first_item()).expect("first item converts");
    assert_eq!(
        Value::Object(first),
        json!({
            "id": 1,
            "name": "item_1",
            "number": 11,
            "created": time(10_000),
            "updated": time(11_000),
            "price": 1111.0,
            "discount": 111.0,
            "reserved": true,
            "points": 11,
            "rating": 1.0,
            "visible": true,
        })
    );

    let second = mapper.convert(&second_item()).expect("second item converts");
    assert_eq!(
        Value::Object(second),
        json!({
            "id": 2,
            "name": "item_2",
            "number": 22,
            "created": time(20_000),
            "updated": "DEFAULT",
            "price": 2222.0,
            "discount": "DEFAULT",
            "reserved": "DEFAULT",
            "points": "DEFAULT",
            "rating": "DEFAULT",
            "visible": false,
        })
    );
}

#[test]
fn db_tag_with_null_default() {
    init_logging();
    let map = convert_to_map(&second_item(), &MapperConfig::default()).expect("converts");

    for key in ["updated", "discount", "reserved", "points", "rating"] {
        assert_eq!(map.get(key), Some(&Value::Null), "{key} should be null");
    }
    // Zero values of plain fields are real values, not empty ones.
    assert_eq!(map.get("visible"), Some(&json!(false)));
    assert_eq!(map.len(), 11);
}

#[test]
fn exclude_policy_drops_empty_fields() {
    init_logging();
    let config = MapperConfig::default()
        .with_policy(Policy::Exclude)
        .with_default("SomeDefault");
    let map = convert_to_map(&second_item(), &config).expect("converts");

    assert_eq!(
        Value::Object(map),
        json!({
            "id": 2,
            "name": "item_2",
            "number": 22,
            "created": time(20_000),
            "price": 2222.0,
            "visible": false,
        })
    );
}

#[test]
fn custom_tag_selects_other_names() {
    init_logging();
    let mapper = Mapper::<SomeItem>::new()
        .with_tag("custom_tag")
        .with_default("SomeDefault");

    let map = mapper.convert(&second_item()).expect("converts");
    assert_eq!(
        Value::Object(map),
        json!({
            "id": 2,
            "num": 22,
            "sum": 222,
            "created_time": time(20_000),
            "updated_time": "SomeDefault",
            "is_reserved": "SomeDefault",
            "visible": false,
            "i_ignore_nothing": 20,
        })
    );
}

#[test]
fn private_skipped_and_untagged_fields_never_appear() {
    init_logging();
    let mapper = Mapper::<SomeItem>::new();
    let keys = mapper.table().keys();

    assert!(!keys.contains(&"some_private"));
    assert!(!keys.contains(&"notes"));
    assert!(!keys.contains(&SKIP_MARKER));
    assert!(!keys.contains(&"sum"));

    let map = mapper.convert(&first_item()).expect("converts");
    assert!(!map.contains_key("some_private"));
    assert!(!map.contains_key("notes"));
    assert!(!map.contains_key("-"));
}

#[test]
fn table_follows_declaration_order() {
    let mapper = Mapper::<SomeItem>::new();
    assert_eq!(
        mapper.table().keys(),
        vec![
            "id", "name", "number", "created", "updated", "price", "discount", "reserved", "points", "rating",
            "visible",
        ]
    );
    assert_eq!(mapper.table().tag(), "db");
}

#[test]
fn unknown_tag_produces_empty_map() {
    init_logging();
    let mapper = Mapper::<SomeItem>::new().with_tag("json");
    assert!(mapper.table().is_empty());
    assert!(mapper.convert(&first_item()).expect("converts").is_empty());
}
