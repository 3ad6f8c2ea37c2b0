//! catalog-select - Interactive stream and field selection for
//! data-pipeline catalogs
//!
//! catalog-select is a single-binary tool that edits a catalog document - a
//! declaration of discoverable data streams and their fields - by toggling,
//! per stream and per field, whether it is included in extraction.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, resolves input,
//!   delegates to the engine)
//! - [`engine`] - Orchestrates the stream and field selection pass
//! - [`core`] - Domain types: breadcrumbs, metadata, policy, reconciliation,
//!   the catalog document
//! - [`ui`] - User interaction: prompts and output
//!
//! # Correctness Invariants
//!
//! 1. Automatic fields are always selected and never carry a user override
//! 2. Explicit deselections are only recorded where a default or prior
//!    override must be negated
//! 3. Reconciliation never drops a breadcrumb, and re-running it with the
//!    same choices changes nothing
//! 4. The output document is written only after every stream has been
//!    reconciled; a failed run leaves no output behind

pub mod cli;
pub mod core;
pub mod engine;
pub mod ui;
