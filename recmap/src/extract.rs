//! Value extraction.
//!
//! [`extract`] walks an [`AnnotationTable`] over a live record. The free
//! functions below are the per-field readers that `#[derive(Record)]` wires
//! into each field descriptor, one per capability.

use serde::Serialize;
use serde_json::Value;

use crate::capabilities::{ToMappable, Valuer, Zeroable};
use crate::config::MapperConfig;
use crate::errors::MapError;
use crate::json;
use crate::policy;
use crate::scan::{AnnotationTable, Entry};
use crate::types::{FieldValue, ValueMap};

/// Extracts `record` through `table`, applying the configured empty-value policy.
///
/// A failing field aborts the whole call; no partial map is returned.
pub fn extract<T: 'static>(
    record: &T,
    table: &AnnotationTable<T>,
    config: &MapperConfig,
) -> Result<ValueMap, MapError> {
    let mut out = ValueMap::new();
    extract_into(record, table, config, &mut out)?;
    Ok(out)
}

pub(crate) fn extract_into<T: 'static>(
    record: &T,
    table: &AnnotationTable<T>,
    config: &MapperConfig,
    out: &mut ValueMap,
) -> Result<(), MapError> {
    for entry in table.entries() {
        match entry {
            Entry::Direct { key, read, .. } => {
                let value = read(record)?;
                policy::apply(config, key, value, out);
            }
            Entry::Nested { group, .. } => group.extract_into(record, config, out)?,
        }
    }
    Ok(())
}

/// Reader for plain fields: the value is serialized as is and `null` counts as empty.
pub fn plain<V>(field: &'static str, value: Option<&V>) -> Result<FieldValue, MapError>
where
    V: Serialize + ?Sized,
{
    match value {
        Some(value) => json::to_json(field, value),
        None => Ok(FieldValue::Empty),
    }
}

/// Reader for fields whose type reports its own zero state.
pub fn zeroable<V>(field: &'static str, value: Option<&V>) -> Result<FieldValue, MapError>
where
    V: Zeroable + Serialize + ?Sized,
{
    match value {
        Some(value) if !value.is_zero() => json::to_json(field, value),
        _ => Ok(FieldValue::Empty),
    }
}

/// Reader for nullable wrappers exposing an external representation.
pub fn valuer<V>(field: &'static str, value: Option<&V>) -> Result<FieldValue, MapError>
where
    V: Valuer + ?Sized,
{
    let Some(value) = value else {
        return Ok(FieldValue::Empty);
    };
    let representation = value.value().map_err(|err| err.in_field(field))?;
    Ok(representation.map_or(FieldValue::Empty, FieldValue::from_json))
}

/// Reader for values converting themselves to a map.
///
/// The mapping is stored under the field's own key; a failure is returned verbatim.
pub fn to_map<V>(field: &'static str, value: Option<&V>) -> Result<FieldValue, MapError>
where
    V: ToMappable + ?Sized,
{
    match value {
        Some(value) => {
            let map = value.to_map().inspect_err(|err| {
                log::debug!("field `{field}` failed to convert itself: {err}");
            })?;
            Ok(FieldValue::Present(Value::Object(map)))
        }
        None => Ok(FieldValue::Empty),
    }
}
