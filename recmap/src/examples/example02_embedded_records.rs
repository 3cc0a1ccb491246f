use anyhow::Result;
use serde_json::json;

use crate::{Mapper, NullString, Policy, Record};

#[derive(Record)]
pub struct Audit {
    #[tag(db = "created_by")]
    pub created_by: String,
    #[tag(db = "revision")]
    #[recmap(zeroable)]
    pub revision: u32,
}

#[derive(Record)]
pub struct Origin {
    #[tag(db = "origin")]
    pub origin: String,
}

#[derive(Record)]
pub struct Article {
    #[tag(db = "id")]
    pub id: i64,
    #[recmap(flatten)]
    pub audit: Audit,
    #[recmap(flatten)]
    pub origin: Option<Box<Origin>>,
    #[tag(db = "-")]
    #[recmap(flatten)]
    pub draft: Audit,
    #[tag(db = "author")]
    #[recmap(valuer)]
    pub author: NullString,
}

/// Example 02: Embedded records are flattened into the parent map.
pub fn run() -> Result<()> {
    let article = Article {
        id: 1,
        audit: Audit {
            created_by: "jo".to_string(),
            revision: 0,
        },
        origin: Some(Box::new(Origin {
            origin: "import".to_string(),
        })),
        draft: Audit {
            created_by: "nobody".to_string(),
            revision: 9,
        },
        author: NullString::invalid("ghost".to_string()),
    };

    let mapper = Mapper::<Article>::new().with_default("DEFAULT");
    assert_eq!(mapper.table().keys(), vec!["id", "created_by", "revision", "origin", "author"]);

    let map = mapper.convert(&article)?;
    assert_eq!(
        serde_json::Value::Object(map),
        json!({
            "id": 1,
            "created_by": "jo",
            "revision": "DEFAULT",
            "origin": "import",
            "author": "DEFAULT",
        })
    );

    // An absent embedded record contributes no keys, even under UseDefault.
    let detached = Article { origin: None, ..article };
    let map = mapper.convert(&detached)?;
    assert!(!map.contains_key("origin"));

    let map = mapper.with_policy(Policy::Exclude).convert(&detached)?;
    assert_eq!(serde_json::Value::Object(map), json!({"id": 1, "created_by": "jo"}));
    Ok(())
}
