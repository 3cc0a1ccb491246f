#[allow(unused_imports)]
use super::*;

mod defs;
mod parsed_field_impl;

pub(crate) use defs::{Capability, ParsedField, TypeInfo};
