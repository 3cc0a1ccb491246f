#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedRecord {
    name: Ident,
    generics: Generics,
    fields: Vec<ParsedField>,
    /// Whole-record conversion through `ToMappable`, from `#[recmap(to_map)]`.
    self_map: bool,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut self_map = false;

        for attr in &input.attrs {
            if attr.path().is_ident("recmap") {
                Self::parse_container_attr(attr, &mut self_map)?;
            } else if attr.path().is_ident("tag") {
                return Err(Error::new(attr.span(), "#[tag(...)] belongs on fields, not on the record"));
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut parsed = Vec::new();
                    for field in &named.named {
                        parsed.push(ParsedField::from_field(field)?);
                    }
                    parsed
                }
                _ => return Err(Error::new(input.ident.span(), "Record requires named fields")),
            },
            _ => return Err(Error::new(input.ident.span(), "Record can only be derived for structs")),
        };

        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(Error::new(
                lifetime.span(),
                "Record cannot be derived for types with lifetime parameters",
            ));
        }

        // Records are 'static: descriptors hold plain function pointers over them.
        let mut generics = input.generics.clone();
        let params: Vec<Ident> = generics.type_params().map(|param| param.ident.clone()).collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause.predicates.push(syn::parse_quote!(#param: 'static));
        }

        Ok(Self {
            name: input.ident.clone(),
            generics,
            fields,
            self_map,
        })
    }

    fn parse_container_attr(attr: &Attribute, self_map: &mut bool) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("to_map") {
                *self_map = true;
                Ok(())
            } else if meta.path.is_ident("flatten") || meta.path.is_ident("zeroable") || meta.path.is_ident("valuer") {
                Err(meta.error("this recmap attribute belongs on fields; records only accept #[recmap(to_map)]"))
            } else {
                Err(meta.error("unknown recmap attribute, expected to_map"))
            }
        })
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let name = &self.name;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let field_inits = self.fields.iter().map(|field| field.to_descriptor_tokens());

        let self_map = self.self_map.then(|| {
            quote! {
                fn self_map(
                    &self,
                ) -> ::std::option::Option<::std::result::Result<::recmap::ValueMap, ::recmap::MapError>> {
                    ::std::option::Option::Some(::recmap::ToMappable::to_map(self))
                }
            }
        });

        quote! {
            impl #impl_generics ::recmap::Record for #name #ty_generics #where_clause {
                fn descriptor() -> ::recmap::types::RecordDescriptor<Self> {
                    ::recmap::types::RecordDescriptor::new(::std::vec![#(#field_inits),*])
                }

                #self_map
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn collects_fields_in_declaration_order() {
        let input: DeriveInput = parse_quote! {
            struct ComplexItem {
                #[recmap(flatten)]
                pub item: SomeItem,
                #[recmap(flatten)]
                pub basic: Option<Box<BasicItem>>,
                #[tag(db = "author")]
                #[recmap(valuer)]
                pub author: NullString,
                pub generation: u32,
            }
        };
        let parsed = ParsedRecord::from_input(&input).expect("record parses");
        let names: Vec<&str> = parsed.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, vec!["item", "basic", "author", "generation"]);
        assert_eq!(parsed.fields[1].capability, Capability::Flatten);
        assert!(parsed.fields[1].ty.optional && parsed.fields[1].ty.boxed);
        assert_eq!(parsed.fields[2].capability, Capability::Valuer);
        assert!(!parsed.self_map);
    }

    #[test]
    fn container_to_map_emits_override() {
        let input: DeriveInput = parse_quote! {
            #[recmap(to_map)]
            struct Metainfo {
                pub tag: String,
            }
        };
        let parsed = ParsedRecord::from_input(&input).expect("record parses");
        assert!(parsed.self_map);
        assert!(parsed.emit().to_string().contains("fn self_map"));
    }

    #[test]
    fn generic_params_are_bound_static() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> {
                #[tag(db = "inner")]
                pub inner: T,
            }
        };
        let parsed = ParsedRecord::from_input(&input).expect("record parses");
        let where_clause = parsed.generics.where_clause.as_ref().expect("where clause");
        assert_eq!(where_clause.predicates.len(), 1);
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum Kind { A, B }
        };
        let err = ParsedRecord::from_input(&input).err().expect("enum rejected");
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Pair(i32, i32);
        };
        let err = ParsedRecord::from_input(&input).err().expect("tuple struct rejected");
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn rejects_lifetimes() {
        let input: DeriveInput = parse_quote! {
            struct Borrowed<'a> {
                #[tag(db = "name")]
                pub name: &'a str,
            }
        };
        assert!(ParsedRecord::from_input(&input).is_err());
    }

    #[test]
    fn rejects_field_capability_on_record() {
        let input: DeriveInput = parse_quote! {
            #[recmap(flatten)]
            struct Item {
                pub id: i64,
            }
        };
        let err = ParsedRecord::from_input(&input).err().expect("container flatten rejected");
        assert!(err.to_string().contains("belongs on fields"));
    }

    #[test]
    fn rejects_tag_on_record() {
        let input: DeriveInput = parse_quote! {
            #[tag(db = "items")]
            struct Item {
                pub id: i64,
            }
        };
        assert!(ParsedRecord::from_input(&input).is_err());
    }
}
