//! recmap core library.
//!
//! Converts typed records into flat `serde_json` maps, driven by per-field tag
//! annotations registered with `#[derive(Record)]`:
//!
//! - [`scan`] turns a record descriptor into an [`AnnotationTable`] for one tag.
//! - [`extract`] reads a live record through that table.
//! - [`policy`] decides what happens to empty values.
//! - [`Mapper`] ties the three together and caches the table per record type.
//!
//! # Example
//!
//! ```text
//! #[derive(Record)]
//! struct Item {
//!     #[tag(db = "id")]
//!     pub id: i64,
//!     #[tag(db = "note")]
//!     pub note: Option<String>,
//! }
//!
//! let mut mapper = Mapper::<Item>::new();
//! mapper.set_default("D");
//! let map = mapper.convert(&Item { id: 7, note: None })?;
//! // {"id": 7, "note": "D"}
//! ```

extern crate self as recmap;

pub mod capabilities;
pub mod config;
pub mod errors;
pub mod examples;
pub mod extract;
mod json;
pub mod mapper;
pub mod nullable;
pub mod policy;
pub mod scan;
pub mod types;

pub use capabilities::{ToMappable, Valuer, Zeroable};
pub use config::{ConfigError, DEFAULT_TAG, MapperConfig};
pub use errors::*;
pub use mapper::{AnyRecord, Mapper, ToMapper, convert_to_map};
pub use nullable::{NullBool, NullFloat64, NullInt64, NullString, NullTime, Nullable};
pub use policy::Policy;
pub use recmap_macros::Record;
pub use scan::{AnnotationTable, SKIP_MARKER};
pub use types::{FieldValue, Record, ValueMap};

// Re-export serde_json so generated code and callers agree on the value type.
pub use serde_json;
pub use serde_json::Value;
