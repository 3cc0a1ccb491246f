use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::capabilities::Valuer;
use crate::errors::MapResult;
use crate::json;

/// Nullable scalar carrying a validity flag, as found on nullable database columns.
///
/// An invalid wrapper still holds a value, but it is never exposed: both its
/// [`Valuer`] representation and its serialized form are `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nullable<T> {
    pub value: T,
    pub valid: bool,
}

pub type NullString = Nullable<String>;
pub type NullBool = Nullable<bool>;
pub type NullInt64 = Nullable<i64>;
pub type NullFloat64 = Nullable<f64>;
pub type NullTime = Nullable<DateTime<Utc>>;

impl<T> Nullable<T> {
    /// A valid wrapper around `value`.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    /// An invalid wrapper that still carries a (hidden) value.
    pub fn invalid(value: T) -> Self {
        Self { value, valid: false }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn get(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> Nullable<T> {
    pub fn null() -> Self {
        Self::default()
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::null(),
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

impl<T: Serialize> Valuer for Nullable<T> {
    fn value(&self) -> MapResult<Option<Value>> {
        match self.get() {
            Some(value) => Ok(json::to_json("value", value)?.into_option()),
            None => Ok(None),
        }
    }
}
