//! core::catalog
//!
//! Catalog document types and file/stream I/O.
//!
//! # Document Shape
//!
//! A catalog is a JSON object with a `streams` array. Each stream carries a
//! `stream` name, an opaque `schema`, and a `metadata` array of
//! `{breadcrumb, metadata}` records. Producer extras at both levels
//! (`tap_stream_id`, `key_properties`, ...) pass through a flattened map.
//!
//! # I/O Discipline
//!
//! The document is read to completion before any mutation begins, and the
//! output file is written only after every stream has been reconciled. A
//! failure mid-run therefore leaves the input untouched and no output file
//! behind.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from catalog document I/O.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Read(String),

    #[error("invalid catalog document: {0}")]
    Parse(String),

    #[error("failed to write catalog: {0}")]
    Write(String),
}

/// A catalog: an ordered sequence of streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Streams, in document order.
    pub streams: Vec<Stream>,

    /// Top-level keys this tool does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One discoverable stream and its selection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// Stream name.
    pub stream: String,

    /// Field schema; opaque to selection.
    pub schema: Value,

    /// Flat metadata record list, in document order.
    pub metadata: Vec<Value>,

    /// Producer extras (`tap_stream_id`, `key_properties`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Catalog {
    /// Parse a catalog from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
        serde_json::from_reader(reader).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|e| CatalogError::Read(e.to_string()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Write the catalog to a file with 2-space indentation.
    pub fn write_to_path(&self, path: &Path) -> Result<(), CatalogError> {
        let file = File::create(path).map_err(|e| CatalogError::Write(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| CatalogError::Write(e.to_string()))?;
        writeln!(writer).map_err(|e| CatalogError::Write(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| CatalogError::Write(e.to_string()))
    }
}

impl Stream {
    /// Whether the stream's root metadata currently marks it selected.
    ///
    /// Reads the raw record list so it can be answered before the stream's
    /// metadata map is built.
    pub fn is_selected(&self) -> bool {
        self.metadata
            .iter()
            .find(|record| {
                record
                    .get("breadcrumb")
                    .and_then(Value::as_array)
                    .is_some_and(Vec::is_empty)
            })
            .and_then(|record| record.get("metadata"))
            .and_then(|attrs| attrs.get("selected"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
