use serde::{Deserialize, Serialize};

use crate::config::MapperConfig;
use crate::types::{FieldValue, ValueMap};

/// What to do with fields whose value is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Write the configured default value (which may be `null`) under the key.
    #[default]
    UseDefault,
    /// Leave the key out of the resulting map.
    Exclude,
}

/// Writes one extracted field into `out` according to `config`.
///
/// Present values are always written verbatim; the policy only decides about
/// empty ones.
pub fn apply(config: &MapperConfig, key: &str, value: FieldValue, out: &mut ValueMap) {
    match value {
        FieldValue::Present(value) => {
            out.insert(key.to_string(), value);
        }
        FieldValue::Empty => match config.policy {
            Policy::UseDefault => {
                out.insert(key.to_string(), config.default_value.clone());
            }
            Policy::Exclude => {
                log::trace!("excluding empty field `{key}`");
            }
        },
    }
}
