//! Walkthroughs of the conversion API, exercised by `tests/examples.rs`.

pub mod example01_flat_record;
pub mod example02_embedded_records;
pub mod example03_custom_conversion;
