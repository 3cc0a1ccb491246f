#[allow(unused_imports)]
use super::*;

impl ParsedField {
    pub(crate) fn from_field(field: &Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Record requires named fields"))?;
        let name = ident.unraw().to_string();
        let public = matches!(field.vis, Visibility::Public(_));

        let mut tags = Vec::new();
        let mut capability: Option<Capability> = None;

        for attr in &field.attrs {
            if attr.path().is_ident("tag") {
                Self::parse_tag_attr(attr, &mut tags)?;
            } else if attr.path().is_ident("recmap") {
                Self::parse_recmap_attr(attr, &mut capability)?;
            }
        }

        let capability = capability.unwrap_or(Capability::Plain);
        let ty = classify_type(&field.ty);

        if capability == Capability::Flatten && !matches!(ty.inner, Type::Path(_)) {
            return Err(Error::new(
                field.ty.span(),
                "#[recmap(flatten)] requires a record type, optionally wrapped in Option and/or Box",
            ));
        }

        Ok(Self {
            ident,
            name,
            public,
            tags,
            capability,
            ty,
        })
    }

    /// Parses `#[tag(db = "id", custom_tag = "id")]`.
    fn parse_tag_attr(attr: &Attribute, tags: &mut Vec<(String, String)>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            let tag = meta
                .path
                .get_ident()
                .map(|ident| ident.unraw().to_string())
                .ok_or_else(|| meta.error("tag names must be plain identifiers, e.g. #[tag(db = \"id\")]"))?;
            let value: LitStr = meta.value()?.parse()?;
            if tags.iter().any(|(existing, _)| *existing == tag) {
                return Err(meta.error(format!("tag `{tag}` is already set on this field")));
            }
            tags.push((tag, value.value()));
            Ok(())
        })
    }

    /// Parses `#[recmap(flatten)]`, `#[recmap(zeroable)]`, `#[recmap(valuer)]` or `#[recmap(to_map)]`.
    fn parse_recmap_attr(attr: &Attribute, capability: &mut Option<Capability>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            let parsed = if meta.path.is_ident("flatten") {
                Capability::Flatten
            } else if meta.path.is_ident("zeroable") {
                Capability::Zeroable
            } else if meta.path.is_ident("valuer") {
                Capability::Valuer
            } else if meta.path.is_ident("to_map") {
                Capability::ToMap
            } else {
                return Err(meta.error("unknown recmap attribute, expected flatten, zeroable, valuer, or to_map"));
            };
            if let Some(existing) = capability {
                return Err(meta.error(format!(
                    "field already uses `{}`; a field takes one of flatten, zeroable, valuer, or to_map",
                    existing.keyword()
                )));
            }
            *capability = Some(parsed);
            Ok(())
        })
    }

    /// Expression reading the field as `Option<&Inner>` from `record`.
    fn access_tokens(&self) -> TokenStream2 {
        let ident = &self.ident;
        match (self.ty.optional, self.ty.boxed) {
            (false, false) => quote! { ::std::option::Option::Some(&record.#ident) },
            (false, true) => quote! { ::std::option::Option::Some(&*record.#ident) },
            (true, false) => quote! { record.#ident.as_ref() },
            (true, true) => quote! { record.#ident.as_deref() },
        }
    }

    pub(crate) fn to_descriptor_tokens(&self) -> TokenStream2 {
        let name = LitStr::new(&self.name, Span::call_site());
        let public = self.public;
        let tags = self.tags.iter().map(|(tag, value)| quote! { (#tag, #value) });
        let access = self.access_tokens();

        let access = match self.capability.reader() {
            Some(reader) => {
                let reader = format_ident!("{}", reader);
                quote! {
                    ::recmap::types::FieldAccess::<Self>::Value(
                        |record: &Self| ::recmap::extract::#reader(#name, #access)
                    )
                }
            }
            None => {
                let inner = &self.ty.inner;
                quote! {
                    ::recmap::types::FieldAccess::<Self>::Embedded(::std::boxed::Box::new(
                        ::recmap::types::Embedded::<Self, #inner>::new(|record| #access)
                    ))
                }
            }
        };

        quote! {
            ::recmap::types::FieldDescriptor::<Self> {
                name: #name,
                public: #public,
                tags: &[#(#tags),*],
                access: #access,
            }
        }
    }
}

/// Peels one `Option<_>` and then one `Box<_>` off a field type.
pub(crate) fn classify_type(ty: &Type) -> TypeInfo {
    let (optional, rest) = match single_generic(ty, "Option") {
        Some(inner) => (true, inner),
        None => (false, ty),
    };
    let (boxed, inner) = match single_generic(rest, "Box") {
        Some(inner) => (true, inner),
        None => (false, rest),
    };
    TypeInfo {
        optional,
        boxed,
        inner: inner.clone(),
    }
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
