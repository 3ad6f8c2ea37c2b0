//! core::breadcrumb
//!
//! Breadcrumbs: structural paths into a stream's field tree.
//!
//! # Design
//!
//! A breadcrumb is an ordered sequence of path segments. The empty sequence
//! is the root and denotes the stream itself. Breadcrumbs compare by value,
//! and segment order matters: `("properties", "a")` and `("a", "properties")`
//! are different nodes.
//!
//! # Labels
//!
//! [`Breadcrumb::label`] produces the human-readable form shown in field
//! prompts: segments joined with `.`, schema-object markers (`properties.`)
//! removed, array markers (`.items`) rendered as `[]`. The transformation is
//! not guaranteed injective for arbitrary paths, so label-to-breadcrumb
//! translation is always served by the reverse lookup recorded while choices
//! are built, never by inverting this function.
//!
//! # Example
//!
//! ```
//! use catalog_select::core::breadcrumb::Breadcrumb;
//!
//! let b = Breadcrumb::new(["properties", "addresses", "items", "properties", "zip"]);
//! assert_eq!(b.label(), "addresses[].zip");
//! assert!(!b.is_root());
//! assert!(Breadcrumb::root().is_root());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural path into a stream's field tree.
///
/// Serialized as a plain JSON array of strings, matching the catalog
/// document's `breadcrumb` representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breadcrumb(Vec<String>);

impl Breadcrumb {
    /// Build a breadcrumb from path segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Breadcrumb(segments.into_iter().map(Into::into).collect())
    }

    /// The root breadcrumb: the empty path, denoting the stream itself.
    pub fn root() -> Self {
        Breadcrumb(Vec::new())
    }

    /// Whether this is the root breadcrumb.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The path segments, in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Human-readable label for field prompts.
    ///
    /// Joins segments with `.`, removes every literal `properties.`, and
    /// replaces every literal `.items` with `[]`. The root breadcrumb never
    /// reaches this resolver; streams are labeled by their name instead.
    pub fn label(&self) -> String {
        let name = self.0.join(".");
        let name = name.replace("properties.", "");
        name.replace(".items", "[]")
    }
}

impl fmt::Display for Breadcrumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
