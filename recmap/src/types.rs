use serde_json::Value;

use crate::errors::MapError;
use crate::scan::{self, NestedGroup};

/// Output mapping produced by a conversion.
pub type ValueMap = serde_json::Map<String, Value>;

/// Reads one field of a record and reports its current value.
pub type FieldReader<T> = fn(&T) -> Result<FieldValue, MapError>;

/// Value read from a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The field holds a value that should be written verbatim.
    Present(Value),
    /// The field is null, reports itself as zero, or is an invalid nullable wrapper.
    Empty,
}

impl FieldValue {
    /// Wraps a JSON value, treating `null` as empty.
    pub fn from_json(value: Value) -> Self {
        if value.is_null() { Self::Empty } else { Self::Present(value) }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Empty => None,
        }
    }
}

/// Registration metadata emitted by `#[derive(Record)]`.
///
/// Lists every named field of the record in declaration order. The scanner
/// decides which of them end up in an [`AnnotationTable`](crate::AnnotationTable).
pub struct RecordDescriptor<T: 'static> {
    pub fields: Vec<FieldDescriptor<T>>,
}

impl<T: 'static> RecordDescriptor<T> {
    pub fn new(fields: Vec<FieldDescriptor<T>>) -> Self {
        Self { fields }
    }
}

pub struct FieldDescriptor<T: 'static> {
    /// Rust field name.
    pub name: &'static str,
    /// Whether the field is `pub`. Non-public fields are never mapped.
    pub public: bool,
    /// `(tag name, tag value)` pairs from `#[tag(...)]`.
    pub tags: &'static [(&'static str, &'static str)],
    pub access: FieldAccess<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Returns the annotation value of this field under the given tag name.
    pub fn tag(&self, tag: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, value)| *value)
    }
}

/// How a field is read, chosen at registration time.
pub enum FieldAccess<T: 'static> {
    /// Leaf field mapped to a single output key.
    Value(FieldReader<T>),
    /// Embedded record whose fields are flattened into the container's map.
    Embedded(Box<dyn EmbeddedRecord<T>>),
}

/// Type-erased handle on an embedded record field.
pub trait EmbeddedRecord<T>: Send + Sync {
    /// Scans the embedded record type for `tag`, producing a nested group bound
    /// to this field.
    fn scan(&self, tag: &str) -> Box<dyn NestedGroup<T>>;

    fn type_name(&self) -> &'static str;
}

/// Embedded record field of type `U` inside record `T`.
///
/// `get` dereferences the field once; `None` means the embedded record is absent
/// and its whole group contributes nothing to the output.
pub struct Embedded<T: 'static, U: 'static> {
    get: fn(&T) -> Option<&U>,
}

impl<T: 'static, U: Record> Embedded<T, U> {
    pub fn new(get: fn(&T) -> Option<&U>) -> Self {
        Self { get }
    }
}

impl<T: 'static, U: Record> EmbeddedRecord<T> for Embedded<T, U> {
    fn scan(&self, tag: &str) -> Box<dyn NestedGroup<T>> {
        scan::nested(self.get, scan::scan::<U>(tag))
    }

    fn type_name(&self) -> &'static str {
        U::type_name()
    }
}

/// A record type that can be converted to a [`ValueMap`].
///
/// This trait is implemented by `#[derive(Record)]`; hand-written impls only
/// need to provide [`Record::descriptor`].
pub trait Record: Sized + 'static {
    fn descriptor() -> RecordDescriptor<Self>;

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whole-record conversion override, used by [`convert_to_map`](crate::convert_to_map).
    ///
    /// Records deriving with `#[recmap(to_map)]` return their
    /// [`ToMappable`](crate::ToMappable) result here.
    fn self_map(&self) -> Option<Result<ValueMap, MapError>> {
        None
    }
}
