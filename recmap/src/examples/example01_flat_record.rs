use anyhow::Result;
use serde_json::json;

use crate::{Mapper, NullBool, Policy, Record};

#[derive(Record)]
pub struct Product {
    #[tag(db = "id", api = "product_id")]
    pub id: i64,
    #[tag(db = "name", api = "title")]
    pub name: String,
    #[tag(db = "note")]
    pub note: Option<String>,
    #[tag(db = "in_stock", api = "available")]
    #[recmap(valuer)]
    pub in_stock: NullBool,
    // Untagged fields never show up in the map.
    pub internal_code: String,
}

/// Example 01: A flat record under both policies and two tags.
pub fn run() -> Result<()> {
    let product = Product {
        id: 7,
        name: "x".to_string(),
        note: None,
        in_stock: NullBool::null(),
        internal_code: "p-7".to_string(),
    };

    let mut mapper = Mapper::for_record(&product);
    mapper.set_default("D");

    let filled = mapper.convert(&product)?;
    assert_eq!(
        serde_json::Value::Object(filled),
        json!({"id": 7, "name": "x", "note": "D", "in_stock": "D"})
    );

    mapper.set_policy(Policy::Exclude);
    let trimmed = mapper.convert(&product)?;
    assert_eq!(serde_json::Value::Object(trimmed), json!({"id": 7, "name": "x"}));

    // Same mapper, different annotation key.
    mapper.set_tag("api");
    let api = mapper.convert(&Product {
        in_stock: NullBool::new(true),
        ..product
    })?;
    assert_eq!(
        serde_json::Value::Object(api),
        json!({"product_id": 7, "title": "x", "available": true})
    );
    Ok(())
}
