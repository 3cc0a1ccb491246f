use serde_json::json;

use crate::{MapError, Mapper, MapperConfig, Record, ToMappable, ToMapper, ValueMap, convert_to_map};

/// Free-form metadata that decides its own map shape.
pub struct Labels {
    pub primary: String,
    pub extra: Vec<String>,
}

impl ToMappable for Labels {
    fn to_map(&self) -> Result<ValueMap, MapError> {
        if self.primary.is_empty() {
            return Err(MapError::conversion("labels need a primary label"));
        }
        let mut map = ValueMap::new();
        map.insert("primary".into(), json!(self.primary));
        map.insert("extra".into(), json!(self.extra));
        Ok(map)
    }
}

#[derive(Record)]
pub struct Ticket {
    #[tag(db = "id", api = "ticket")]
    pub id: i64,
    #[tag(db = "labels", api = "labels")]
    #[recmap(to_map)]
    pub labels: Labels,
}

#[derive(Record)]
#[recmap(to_map)]
pub struct Summary {
    #[tag(db = "total")]
    pub total: u64,
}

impl ToMappable for Summary {
    fn to_map(&self) -> Result<ValueMap, MapError> {
        let mut map = ValueMap::new();
        map.insert("count".into(), json!(self.total));
        Ok(map)
    }
}

fn export<T>(mapper: &impl ToMapper<T>, records: &[T]) -> Result<Vec<ValueMap>, MapError> {
    records.iter().map(|record| mapper.to_map(record)).collect()
}

/// Example 03: Self-converting values, whole-record overrides and pluggable mappers.
pub fn run() -> anyhow::Result<()> {
    let config = MapperConfig::from_toml_str(
        r#"
        tag = "api"
        policy = "exclude"
        "#,
    )?;
    let mapper = Mapper::<Ticket>::with_config(config);

    let tickets = vec![Ticket {
        id: 3,
        labels: Labels {
            primary: "bug".to_string(),
            extra: vec!["ui".to_string()],
        },
    }];
    let maps = export(&mapper, &tickets)?;
    assert_eq!(
        serde_json::Value::Object(maps[0].clone()),
        json!({"ticket": 3, "labels": {"primary": "bug", "extra": ["ui"]}})
    );

    // Any function of the right shape works where a mapper is expected.
    let ids_only = |ticket: &Ticket| -> Result<ValueMap, MapError> {
        let mut map = ValueMap::new();
        map.insert("id".into(), json!(ticket.id));
        Ok(map)
    };
    let maps = export(&ids_only, &tickets)?;
    assert_eq!(serde_json::Value::Object(maps[0].clone()), json!({"id": 3}));

    // A failing self-conversion fails the whole record.
    let broken = Ticket {
        id: 4,
        labels: Labels {
            primary: String::new(),
            extra: Vec::new(),
        },
    };
    let err = mapper.convert(&broken).err();
    assert_eq!(
        err.map(|err| err.to_string()),
        Some("labels need a primary label".to_string())
    );

    // Whole-record conversion bypasses the annotations entirely.
    let summary = convert_to_map(&Summary { total: 12 }, &MapperConfig::default())?;
    assert_eq!(serde_json::Value::Object(summary), json!({"count": 12}));
    Ok(())
}
