//! Opt-in capabilities a field value (or a whole record) can provide.
//!
//! A field picks its capability at registration time with `#[recmap(...)]`:
//! `zeroable`, `valuer` or `to_map`. Fields without one are serialized as is.

use chrono::{DateTime, TimeZone};
use serde_json::Value;

use crate::errors::{MapError, MapResult};
use crate::types::ValueMap;

/// A value that can report whether it is in its zero/empty state.
pub trait Zeroable {
    fn is_zero(&self) -> bool;
}

/// External representation of a value, used by nullable wrappers.
///
/// `Ok(None)` means the wrapper currently holds no valid value. An error aborts
/// the conversion of the record the value belongs to.
pub trait Valuer {
    fn value(&self) -> MapResult<Option<Value>>;
}

/// A value that knows how to convert itself to a map.
///
/// Conversions call this instead of doing any generic extraction, and a
/// failure aborts the whole conversion.
pub trait ToMappable {
    fn to_map(&self) -> Result<ValueMap, MapError>;
}

macro_rules! zeroable_numbers {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Zeroable for $ty {
                fn is_zero(&self) -> bool {
                    *self == $zero
                }
            }
        )*
    };
}

zeroable_numbers!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, i128 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, u128 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
);

impl Zeroable for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Zeroable for str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl Zeroable for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zeroable for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zeroable for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// The Unix epoch is the zero instant.
impl<Tz: TimeZone> Zeroable for DateTime<Tz> {
    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }
}

impl Valuer for Value {
    fn value(&self) -> MapResult<Option<Value>> {
        Ok((!self.is_null()).then(|| self.clone()))
    }
}

impl ToMappable for ValueMap {
    fn to_map(&self) -> Result<ValueMap, MapError> {
        Ok(self.clone())
    }
}
