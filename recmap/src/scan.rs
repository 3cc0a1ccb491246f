use std::fmt;

use crate::config::MapperConfig;
use crate::errors::MapError;
use crate::extract;
use crate::types::{FieldAccess, FieldReader, Record, ValueMap};

/// Reserved annotation value meaning "do not include this field".
pub const SKIP_MARKER: &str = "-";

/// Output keys of one record type under one tag, in declaration order.
///
/// Built once by [`scan`] and immutable afterwards. Embedded records are kept
/// as nested groups so their presence can be checked on every conversion.
pub struct AnnotationTable<T: 'static> {
    tag: String,
    entries: Vec<Entry<T>>,
}

pub enum Entry<T: 'static> {
    /// A leaf field written under `key`.
    Direct {
        key: &'static str,
        field: &'static str,
        read: FieldReader<T>,
    },
    /// An embedded record flattened into the parent map.
    Nested {
        field: &'static str,
        group: Box<dyn NestedGroup<T>>,
    },
}

/// Nested table bound to the field that holds the embedded record.
pub trait NestedGroup<T>: Send + Sync {
    /// Extracts the embedded record of `record` into `out`.
    ///
    /// An absent embedded record writes nothing, whatever the policy.
    fn extract_into(&self, record: &T, config: &MapperConfig, out: &mut ValueMap) -> Result<(), MapError>;

    /// Appends the output keys reachable through this group.
    fn collect_keys(&self, keys: &mut Vec<&'static str>);
}

struct Group<T: 'static, U: 'static> {
    get: fn(&T) -> Option<&U>,
    table: AnnotationTable<U>,
}

impl<T: 'static, U: 'static> NestedGroup<T> for Group<T, U> {
    fn extract_into(&self, record: &T, config: &MapperConfig, out: &mut ValueMap) -> Result<(), MapError> {
        match (self.get)(record) {
            Some(inner) => extract::extract_into(inner, &self.table, config, out),
            None => Ok(()),
        }
    }

    fn collect_keys(&self, keys: &mut Vec<&'static str>) {
        self.table.collect_keys(keys);
    }
}

pub(crate) fn nested<T: 'static, U: 'static>(
    get: fn(&T) -> Option<&U>,
    table: AnnotationTable<U>,
) -> Box<dyn NestedGroup<T>> {
    Box::new(Group { get, table })
}

/// Scans the descriptor of `T` for fields annotated under `tag`.
///
/// - embedded records are scanned recursively unless tagged with [`SKIP_MARKER`];
/// - non-public leaf fields are skipped;
/// - leaf fields without a (non-empty, non-skip) annotation are omitted.
///
/// Duplicate keys are kept as separate entries; during extraction the later
/// one wins.
pub fn scan<T: Record>(tag: &str) -> AnnotationTable<T> {
    let descriptor = T::descriptor();
    let mut entries = Vec::with_capacity(descriptor.fields.len());

    for field in descriptor.fields {
        let annotation = field.tag(tag);
        match field.access {
            FieldAccess::Embedded(embedded) => {
                if annotation == Some(SKIP_MARKER) {
                    continue;
                }
                entries.push(Entry::Nested {
                    field: field.name,
                    group: embedded.scan(tag),
                });
            }
            FieldAccess::Value(read) => {
                if !field.public {
                    continue;
                }
                match annotation {
                    Some(key) if !key.is_empty() && key != SKIP_MARKER => {
                        entries.push(Entry::Direct {
                            key,
                            field: field.name,
                            read,
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    let table = AnnotationTable {
        tag: tag.to_string(),
        entries,
    };
    log::debug!(
        "scanned {} for tag `{}`: {} entries, {} keys",
        T::type_name(),
        tag,
        table.entries.len(),
        table.keys().len()
    );
    table
}

impl<T: 'static> AnnotationTable<T> {
    /// Tag name this table was built for.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// Every output key reachable through this table, nested groups included.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn collect_keys(&self, keys: &mut Vec<&'static str>) {
        for entry in &self.entries {
            match entry {
                Entry::Direct { key, .. } => keys.push(*key),
                Entry::Nested { group, .. } => group.collect_keys(keys),
            }
        }
    }
}

impl<T: 'static> fmt::Debug for AnnotationTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            match entry {
                Entry::Direct { key, field, .. } => list.entry(&format_args!("{field} => {key}")),
                Entry::Nested { field, .. } => list.entry(&format_args!("{field} => <embedded>")),
            };
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Embedded, FieldDescriptor, FieldValue, RecordDescriptor};

    struct Leaf {
        code: i32,
    }

    impl Record for Leaf {
        fn descriptor() -> RecordDescriptor<Self> {
            RecordDescriptor::new(vec![FieldDescriptor {
                name: "code",
                public: true,
                tags: &[("db", "code"), ("alt", "-")],
                access: FieldAccess::Value(|leaf: &Leaf| Ok(FieldValue::Present(leaf.code.into()))),
            }])
        }
    }

    struct Holder {
        id: i32,
        leaf: Option<Leaf>,
        other: Leaf,
    }

    impl Record for Holder {
        fn descriptor() -> RecordDescriptor<Self> {
            RecordDescriptor::new(vec![
                FieldDescriptor {
                    name: "id",
                    public: true,
                    tags: &[("db", "id"), ("alt", "ident")],
                    access: FieldAccess::Value(|holder: &Holder| Ok(FieldValue::Present(holder.id.into()))),
                },
                FieldDescriptor {
                    name: "hidden",
                    public: false,
                    tags: &[("db", "hidden")],
                    access: FieldAccess::Value(|_: &Holder| Ok(FieldValue::Empty)),
                },
                FieldDescriptor {
                    name: "blank",
                    public: true,
                    tags: &[("db", "")],
                    access: FieldAccess::Value(|_: &Holder| Ok(FieldValue::Empty)),
                },
                FieldDescriptor {
                    name: "leaf",
                    public: true,
                    tags: &[],
                    access: FieldAccess::Embedded(Box::new(Embedded::<Holder, Leaf>::new(|holder| {
                        holder.leaf.as_ref()
                    }))),
                },
                FieldDescriptor {
                    name: "other",
                    public: true,
                    tags: &[("alt", "-")],
                    access: FieldAccess::Embedded(Box::new(Embedded::<Holder, Leaf>::new(|holder| {
                        Some(&holder.other)
                    }))),
                },
            ])
        }
    }

    #[test]
    fn scan_keeps_tagged_public_fields_in_order() {
        let table = scan::<Holder>("db");
        assert_eq!(table.tag(), "db");
        assert_eq!(table.keys(), vec!["id", "code", "code"]);
        assert_eq!(table.entries().len(), 3);
    }

    #[test]
    fn skip_marker_drops_embedded_group_and_leaf() {
        let table = scan::<Holder>("alt");
        // `other` is skipped as a whole; `leaf` is scanned but its only field is skipped.
        assert_eq!(table.keys(), vec!["ident"]);
        assert_eq!(table.entries().len(), 2);
    }

    #[test]
    fn unknown_tag_yields_only_embedded_groups() {
        let table = scan::<Holder>("json");
        assert!(table.keys().is_empty());
        assert!(!table.is_empty());
    }

    #[test]
    fn debug_lists_fields_and_keys() {
        let table = scan::<Leaf>("db");
        assert_eq!(format!("{table:?}"), "[code => code]");
    }
}
