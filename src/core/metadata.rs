//! core::metadata
//!
//! Metadata attribute schema and the record-list <-> map adapter.
//!
//! # Schema Design
//!
//! Selection-relevant attributes are modeled as explicit optional fields
//! rather than an open-ended dynamic map, so the selection policy can match
//! on them exhaustively. Everything else a catalog producer attached to a
//! record (`table-key-properties`, `replication-method`, ...) passes through
//! a flattened map untouched.
//!
//! # Adapter
//!
//! The catalog document stores metadata as a flat ordered list of
//! `{breadcrumb, metadata}` records. [`MetadataMap`] is the same data as an
//! insertion-ordered mapping keyed by breadcrumb, which is what the policy
//! and reconciler operate on. The adapter performs no reordering in either
//! direction; sorted iteration, when requested, is applied by the caller
//! over the map's keys.
//!
//! # Write Semantics
//!
//! Writing an attribute for a breadcrumb already in the map updates it in
//! place, keeping its position. Writing for an absent breadcrumb appends a
//! new entry at the end. This matches the document-order behavior catalogs
//! round-trip through, including the root entry being appended when the
//! producer omitted it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::breadcrumb::Breadcrumb;

/// Errors from metadata record conversion.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata record {index} is not an object")]
    RecordNotObject { index: usize },

    #[error("metadata record {index} has no breadcrumb")]
    MissingBreadcrumb { index: usize },

    #[error("metadata record {index} has a malformed breadcrumb: {found}")]
    MalformedBreadcrumb { index: usize, found: String },

    #[error("metadata record {index} has no metadata attributes")]
    MissingAttributes { index: usize },

    #[error("metadata record {index} has invalid attributes: {message}")]
    InvalidAttributes { index: usize, message: String },
}

/// How the catalog producer classified a field for extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// Always extracted; selection is not user-togglable.
    Automatic,
    /// Available for selection.
    Available,
    /// Cannot be extracted.
    Unsupported,
}

/// One breadcrumb's metadata attributes.
///
/// `None` means the key is absent from the record, which is distinct from an
/// explicit `false`: `selected: None` is "no user override", while
/// `selected: Some(false)` is a recorded deselection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Producer's inclusion classification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<Inclusion>,

    /// Producer's default selection for the field.
    #[serde(rename = "selected-by-default", skip_serializing_if = "Option::is_none")]
    pub selected_by_default: Option<bool>,

    /// User override; absent means no explicit override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    /// Producer attributes this tool does not interpret, passed through
    /// unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attributes {
    /// Whether the producer marked this field as automatically included.
    pub fn is_automatic(&self) -> bool {
        self.inclusion == Some(Inclusion::Automatic)
    }
}

/// Insertion-ordered mapping from breadcrumb to attributes.
///
/// Built from and flattened back to the document's flat record list; see the
/// module docs for ordering and write semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    entries: Vec<(Breadcrumb, Attributes)>,
}

impl MetadataMap {
    /// Build a map from the document's flat record list.
    ///
    /// Each record must be an object carrying a `breadcrumb` (array of
    /// strings) and a `metadata` attribute object. Anything else is a
    /// structural error. A duplicated breadcrumb keeps its first position
    /// and takes the later record's attributes.
    pub fn from_records(records: &[Value]) -> Result<Self, MetadataError> {
        let mut map = MetadataMap::default();
        for (index, record) in records.iter().enumerate() {
            let record = record
                .as_object()
                .ok_or(MetadataError::RecordNotObject { index })?;
            let raw = record
                .get("breadcrumb")
                .ok_or(MetadataError::MissingBreadcrumb { index })?;
            let breadcrumb: Breadcrumb = serde_json::from_value(raw.clone()).map_err(|_| {
                MetadataError::MalformedBreadcrumb {
                    index,
                    found: raw.to_string(),
                }
            })?;
            let attrs = record
                .get("metadata")
                .ok_or(MetadataError::MissingAttributes { index })?;
            let attrs: Attributes = serde_json::from_value(attrs.clone()).map_err(|e| {
                MetadataError::InvalidAttributes {
                    index,
                    message: e.to_string(),
                }
            })?;
            match map.position(&breadcrumb) {
                Some(i) => map.entries[i].1 = attrs,
                None => map.entries.push((breadcrumb, attrs)),
            }
        }
        Ok(map)
    }

    /// Flatten the map back into the document's record-list form.
    pub fn into_records(self) -> Vec<Value> {
        self.entries
            .into_iter()
            .map(|(breadcrumb, attrs)| {
                serde_json::json!({
                    "breadcrumb": breadcrumb,
                    "metadata": attrs,
                })
            })
            .collect()
    }

    /// Attributes for a breadcrumb, if present.
    pub fn get(&self, breadcrumb: &Breadcrumb) -> Option<&Attributes> {
        self.position(breadcrumb).map(|i| &self.entries[i].1)
    }

    /// Write the `selected` attribute for a breadcrumb.
    ///
    /// Overwrites in place when the breadcrumb exists; appends a fresh entry
    /// otherwise. Other attributes on the entry are untouched.
    pub fn write_selected(&mut self, breadcrumb: Breadcrumb, value: bool) {
        match self.position(&breadcrumb) {
            Some(i) => self.entries[i].1.selected = Some(value),
            None => {
                let attrs = Attributes {
                    selected: Some(value),
                    ..Attributes::default()
                };
                self.entries.push((breadcrumb, attrs));
            }
        }
    }

    /// Iterate entries in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&Breadcrumb, &Attributes)> {
        self.entries.iter().map(|(b, a)| (b, a))
    }

    /// Iterate entries in map order with mutable attributes.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Breadcrumb, &mut Attributes)> {
        self.entries.iter_mut().map(|(b, a)| (&*b, a))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, breadcrumb: &Breadcrumb) -> Option<usize> {
        self.entries.iter().position(|(b, _)| b == breadcrumb)
    }
}
