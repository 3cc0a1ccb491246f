use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by record conversions.
#[derive(Debug, Error)]
pub enum MapError {
    /// A dynamically typed conversion received a record of another type.
    #[error("mapper is set up to work with type {expected}, but {found} given")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A plain field value could not be turned into a JSON value.
    #[error("failed to serialize field `{field}`: {source}")]
    Serialize {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A present float is NaN or infinite and has no JSON representation.
    #[error("field `{field}` holds a non-finite number, which has no JSON representation")]
    NonFinite { field: &'static str },

    /// A value that converts itself to a map reported a failure.
    #[error("{message}")]
    Conversion { message: Cow<'static, str> },
}

impl MapError {
    /// Convenience helper for `ToMappable` implementations reporting a failure.
    pub fn conversion(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    /// Points a value-level error at the record field it was read from.
    pub(crate) fn in_field(self, field: &'static str) -> Self {
        match self {
            Self::Serialize { source, .. } => Self::Serialize { field, source },
            Self::NonFinite { .. } => Self::NonFinite { field },
            other => other,
        }
    }

    /// Builds a type mismatch error between the bound record type and the one given.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }
}

/// Convenience alias for conversion results.
pub type MapResult<T> = Result<T, MapError>;
