use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::config::MapperConfig;
use crate::errors::MapError;
use crate::extract::extract;
use crate::policy::Policy;
use crate::scan::{AnnotationTable, scan};
use crate::types::{Record, ValueMap};

/// Converter bound to one record type.
///
/// The annotation table for the active tag is built when the mapper is created
/// and rebuilt by [`Mapper::set_tag`]; every conversion reuses it.
///
/// # Example
///
/// ```text
/// let mut mapper = Mapper::<Item>::new();
/// mapper.set_policy(Policy::Exclude).set_default("DEFAULT");
/// let map = mapper.convert(&item)?;
///
/// mapper.set_tag("custom_tag");
/// let renamed = mapper.convert(&item)?;
/// ```
pub struct Mapper<T: Record> {
    config: MapperConfig,
    table: AnnotationTable<T>,
}

impl<T: Record> Mapper<T> {
    /// Creates a mapper with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        let table = scan::<T>(&config.tag);
        Self { config, table }
    }

    /// Creates a mapper for the type of `sample`.
    pub fn for_record(sample: &T) -> Self {
        Self::for_record_with(sample, MapperConfig::default())
    }

    pub fn for_record_with(_sample: &T, config: MapperConfig) -> Self {
        Self::with_config(config)
    }

    /// Switches the annotation key and rescans the bound type.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.config.tag = tag.into();
        self.table = scan::<T>(&self.config.tag);
        self
    }

    pub fn set_default(&mut self, value: impl Into<Value>) -> &mut Self {
        self.config.default_value = value.into();
        self
    }

    pub fn set_policy(&mut self, policy: Policy) -> &mut Self {
        self.config.policy = policy;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.set_default(value);
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.set_policy(policy);
        self
    }

    pub fn tag(&self) -> &str {
        &self.config.tag
    }

    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    pub fn default_value(&self) -> &Value {
        &self.config.default_value
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn table(&self) -> &AnnotationTable<T> {
        &self.table
    }

    /// Converts `record` using the cached annotation table.
    pub fn convert(&self, record: &T) -> Result<ValueMap, MapError> {
        extract(record, &self.table, &self.config)
    }

    /// Converts a dynamically typed record.
    ///
    /// The record must be exactly `T`, a `Box<T>` or a `&'static T`; anything
    /// else is a [`MapError::TypeMismatch`]. No structural matching is attempted.
    pub fn convert_any(&self, record: &dyn AnyRecord) -> Result<ValueMap, MapError> {
        let any = record.as_any();
        let resolved = any
            .downcast_ref::<T>()
            .or_else(|| any.downcast_ref::<Box<T>>().map(|boxed| &**boxed))
            .or_else(|| any.downcast_ref::<&'static T>().copied());

        match resolved {
            Some(record) => self.convert(record),
            None => {
                let err = MapError::type_mismatch(T::type_name(), record.record_type_name());
                log::warn!("{err}");
                Err(err)
            }
        }
    }
}

impl<T: Record> Default for Mapper<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> fmt::Debug for Mapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("record", &T::type_name())
            .field("config", &self.config)
            .field("table", &self.table)
            .finish()
    }
}

/// Converts `record` with a freshly scanned table for `config.tag`.
///
/// Records that opted into whole-record conversion (`#[recmap(to_map)]`) are
/// converted by their own [`ToMappable`](crate::ToMappable) impl instead.
pub fn convert_to_map<T: Record>(record: &T, config: &MapperConfig) -> Result<ValueMap, MapError> {
    if let Some(result) = record.self_map() {
        return result;
    }
    let table = scan::<T>(&config.tag);
    extract(record, &table, config)
}

/// Something that converts `T` to a map: a bound [`Mapper`] or a plain function.
pub trait ToMapper<T: ?Sized> {
    fn to_map(&self, record: &T) -> Result<ValueMap, MapError>;
}

impl<T: Record> ToMapper<T> for Mapper<T> {
    fn to_map(&self, record: &T) -> Result<ValueMap, MapError> {
        self.convert(record)
    }
}

impl<T: ?Sized, F> ToMapper<T> for F
where
    F: Fn(&T) -> Result<ValueMap, MapError>,
{
    fn to_map(&self, record: &T) -> Result<ValueMap, MapError> {
        self(record)
    }
}

/// Object-safe view of any value, used for dynamically typed conversions.
pub trait AnyRecord: Any {
    fn as_any(&self) -> &dyn Any;

    fn record_type_name(&self) -> &'static str;
}

impl<T: Any> AnyRecord for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn record_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
