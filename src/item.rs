//! item — the record model of the allow list.
//!
//! An Item is one allow-listed operation: its originating comment, a
//! variables template, the operation body and free-form metadata. Fragments
//! parsed from the same document ride along transiently; they are persisted
//! as independent sibling files, never embedded in the record document.
//!
//! Wire format (YAML, see store/save.rs): namespace/comment/vars are omitted
//! when empty, metadata is inlined, `key` and `frags` are never serialized.

use serde::{Deserialize, Serialize};

/// One allow-listed operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Optional grouping prefix; empty string means ungrouped.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    /// Operation name. Case-preserving for display; compared via `key()`.
    pub name: String,

    /// Free text preceding the operation, preserved verbatim (trimmed).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,

    /// The operation body (a single query/mutation/subscription), trimmed to
    /// end exactly at its closing brace.
    pub query: String,

    /// Variables template; persisted as pretty-printed JSON.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vars: String,

    #[serde(flatten)]
    pub metadata: Metadata,

    /// Fragments parsed from the same document. Transient: persisted as
    /// separate files under fragments/, keyed by (namespace, fragment name).
    #[serde(skip)]
    pub frags: Vec<Frag>,
}

impl Item {
    /// Lookup/equality key: always the lowercased name.
    #[inline]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// True when the item carries nothing (the `get_by_name` miss value).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.query.is_empty()
    }
}

/// Free-form metadata carried by a record; opaque to the store beyond
/// round-tripping. Inlined into the record document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Order::is_empty")]
    pub order: Order,
}

/// Iteration hint used by the gateway to walk parameterized query variants:
/// a variable name plus an ordered list of its values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub var: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Order {
    pub fn is_empty(&self) -> bool {
        self.var.is_empty() && self.values.is_empty()
    }
}

/// A named fragment body parsed out of a submitted document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frag {
    pub name: String,
    pub value: String,
}
