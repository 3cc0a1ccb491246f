//! Field values as JSON.
//!
//! `serde_json` writes non-finite floats as `null`, which would make a present
//! value indistinguishable from an empty one. [`to_json`] tells the two apart
//! by re-serializing any `null` result through [`NullCheck`].

use serde::Serialize;
use serde::ser::{self, Impossible, Serializer};
use thiserror::Error;

use crate::errors::{MapError, MapResult};
use crate::types::FieldValue;

/// Serializes the value of `field`.
///
/// Genuine nulls (`None`, `()`, `Value::Null`) are [`FieldValue::Empty`]; a NaN
/// or infinite float is a [`MapError::NonFinite`].
pub(crate) fn to_json<V: Serialize + ?Sized>(field: &'static str, value: &V) -> MapResult<FieldValue> {
    let json = serde_json::to_value(value).map_err(|source| MapError::Serialize { field, source })?;
    if !json.is_null() {
        return Ok(FieldValue::Present(json));
    }
    match value.serialize(NullCheck) {
        Ok(()) => Ok(FieldValue::Empty),
        Err(NotNull::NonFinite) => Err(MapError::NonFinite { field }),
        Err(NotNull::Other) => Err(MapError::Serialize {
            field,
            source: ser::Error::custom("value serialized to null but is not null"),
        }),
    }
}

/// Why a value is not a genuine null.
#[derive(Debug, Error)]
enum NotNull {
    #[error("non-finite float")]
    NonFinite,
    #[error("value is not null")]
    Other,
}

impl ser::Error for NotNull {
    fn custom<T: std::fmt::Display>(_msg: T) -> Self {
        NotNull::Other
    }
}

/// Accepts only values that serialize as a top-level null.
struct NullCheck;

impl Serializer for NullCheck {
    type Ok = ();
    type Error = NotNull;
    type SerializeSeq = Impossible<(), NotNull>;
    type SerializeTuple = Impossible<(), NotNull>;
    type SerializeTupleStruct = Impossible<(), NotNull>;
    type SerializeTupleVariant = Impossible<(), NotNull>;
    type SerializeMap = Impossible<(), NotNull>;
    type SerializeStruct = Impossible<(), NotNull>;
    type SerializeStructVariant = Impossible<(), NotNull>;

    fn serialize_bool(self, _v: bool) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_i8(self, _v: i8) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_i16(self, _v: i16) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_i32(self, _v: i32) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_i64(self, _v: i64) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_u8(self, _v: u8) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_u16(self, _v: u16) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_u32(self, _v: u32) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_u64(self, _v: u64) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_f32(self, v: f32) -> Result<(), NotNull> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), NotNull> {
        if v.is_finite() { Err(NotNull::Other) } else { Err(NotNull::NonFinite) }
    }

    fn serialize_char(self, _v: char) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_str(self, _v: &str) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_none(self) -> Result<(), NotNull> {
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<(), NotNull> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), NotNull> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), NotNull> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Result<(), NotNull> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<(), NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeTupleStruct, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct, NotNull> {
        Err(NotNull::Other)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, NotNull> {
        Err(NotNull::Other)
    }
}
