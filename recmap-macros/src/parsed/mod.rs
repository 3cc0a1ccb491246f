#[allow(unused_imports)]
use super::*;

mod field;
mod record;

#[allow(unused_imports)]
pub(crate) use field::{Capability, ParsedField};
pub(crate) use record::ParsedRecord;
