#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedField {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) public: bool,
    /// `(tag name, tag value)` pairs in declaration order.
    pub(crate) tags: Vec<(String, String)>,
    pub(crate) capability: Capability,
    pub(crate) ty: TypeInfo,
}

/// How the field value is read, from `#[recmap(...)]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Capability {
    /// Serialized as is.
    Plain,
    Zeroable,
    Valuer,
    ToMap,
    /// Embedded record flattened into the parent map.
    Flatten,
}

impl Capability {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Capability::Plain => "plain",
            Capability::Zeroable => "zeroable",
            Capability::Valuer => "valuer",
            Capability::ToMap => "to_map",
            Capability::Flatten => "flatten",
        }
    }

    /// Reader function in `recmap::extract` for leaf capabilities.
    pub(crate) fn reader(self) -> Option<&'static str> {
        match self {
            Capability::Plain => Some("plain"),
            Capability::Zeroable => Some("zeroable"),
            Capability::Valuer => Some("valuer"),
            Capability::ToMap => Some("to_map"),
            Capability::Flatten => None,
        }
    }
}

/// Field type with at most one `Option` and one `Box` peeled off.
#[derive(Clone)]
pub(crate) struct TypeInfo {
    pub(crate) optional: bool,
    pub(crate) boxed: bool,
    pub(crate) inner: Type,
}
