use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericArgument, Generics, Ident, LitStr, PathArguments,
    Result, Type, Visibility, parse_macro_input, spanned::Spanned,
};

mod parsed;

use parsed::ParsedRecord;

/// Registers a record type with recmap.
///
/// Generates an `impl recmap::Record` whose descriptor lists every named field
/// with its `#[tag(...)]` annotations and the capability selected by
/// `#[recmap(...)]`.
///
/// # Example
///
/// ```text
/// #[derive(Record)]
/// pub struct Item {
///     #[tag(db = "id", custom_tag = "id")]
///     pub id: i64,
///     #[tag(db = "updated")]
///     #[recmap(valuer)]
///     pub updated: NullTime,
///     #[recmap(flatten)]
///     pub base: Option<Box<Base>>,
///     #[tag(db = "-", custom_tag = "ignored")]
///     pub ignored: i32,
/// }
/// ```
#[proc_macro_derive(Record, attributes(recmap, tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ParsedRecord::from_input(&input) {
        Ok(parsed) => parsed.emit().into(),
        Err(err) => err.to_compile_error().into(),
    }
}
