#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use recmap::{NullBool, NullFloat64, NullInt64, NullTime, Record};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().expect("valid timestamp")
}

#[derive(Record)]
pub struct SomeItem {
    #[tag(db = "id", custom_tag = "id")]
    pub id: i64,
    #[tag(db = "name")]
    pub name: String,
    #[tag(db = "some_private", custom_tag = "some_private")]
    some_private: String,
    #[tag(db = "number", custom_tag = "num")]
    pub number: i32,
    #[tag(custom_tag = "sum")]
    pub checksum: i32,
    #[tag(custom_tag = "created_time", db = "created")]
    pub created: DateTime<Utc>,
    #[tag(db = "updated", custom_tag = "updated_time")]
    #[recmap(valuer)]
    pub updated: NullTime,
    #[tag(db = "price")]
    pub price: f64,
    #[tag(db = "discount")]
    pub discount: Option<f64>,
    #[tag(db = "reserved", custom_tag = "is_reserved")]
    #[recmap(valuer)]
    pub is_reserved: NullBool,
    #[tag(db = "points")]
    #[recmap(valuer)]
    pub points: NullInt64,
    #[tag(db = "rating")]
    #[recmap(valuer)]
    pub rating: NullFloat64,
    #[tag(db = "visible", custom_tag = "visible")]
    pub is_visible: bool,
    #[tag(db = "-", custom_tag = "i_ignore_nothing")]
    pub some_ignore_field: i32,
    pub notes: String,
}

/// A fully populated item.
pub fn first_item() -> SomeItem {
    SomeItem {
        id: 1,
        name: "item_1".to_string(),
        some_private: "hidden".to_string(),
        number: 11,
        checksum: 111,
        created: at(10_000),
        updated: NullTime::new(at(11_000)),
        price: 1111.0,
        discount: Some(111.0),
        is_reserved: NullBool::new(true),
        points: NullInt64::new(11),
        rating: NullFloat64::new(1.0),
        is_visible: true,
        some_ignore_field: 10,
        notes: "foo".to_string(),
    }
}

/// An item whose nullable fields are all empty.
pub fn second_item() -> SomeItem {
    SomeItem {
        id: 2,
        name: "item_2".to_string(),
        some_private: "hidden".to_string(),
        number: 22,
        checksum: 222,
        created: at(20_000),
        updated: NullTime::null(),
        price: 2222.0,
        discount: None,
        is_reserved: NullBool::null(),
        points: NullInt64::invalid(22),
        rating: NullFloat64::null(),
        is_visible: false,
        some_ignore_field: 20,
        notes: "bar".to_string(),
    }
}
