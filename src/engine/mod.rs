//! engine
//!
//! Catalog selection orchestrator.
//!
//! # Orchestration
//!
//! One pass over the catalog, two levels:
//!
//! - **Streams**: one multi-select over all stream names, pre-checked from
//!   each stream's current root selection. A deselected stream gets
//!   `selected = false` on its root and its fields are left untouched.
//! - **Fields** (selected streams only): the field selection policy builds
//!   the choice list, the provider returns the user's picks, the reverse
//!   lookup translates them back to breadcrumbs, and the reconciler
//!   rewrites the stream's metadata.
//!
//! Each stream's metadata map is built inside the loop and flattened back
//! before the next stream is touched; no map outlives its stream. Streams
//! are always *processed* in document order; `sort` only affects the order
//! choices are presented in.
//!
//! # Context
//!
//! All run-scoped state (sort flag, verbosity) is carried in an explicit
//! [`Context`] built by the CLI layer and passed down.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::breadcrumb::Breadcrumb;
use crate::core::catalog::Catalog;
use crate::core::metadata::{MetadataError, MetadataMap};
use crate::core::policy::{FieldChoices, PolicyError};
use crate::core::reconcile::reconcile;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{Choice, MultiSelect, PromptError, SelectionProvider};

/// Run-scoped context threaded through the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Present streams and fields in sorted order rather than document
    /// order.
    pub sort: bool,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Errors from a selection run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Drive stream and field selection across the whole catalog.
///
/// Mutates the catalog's metadata in place; the caller writes the document
/// out afterwards. Any error aborts the run before anything is written.
pub fn configure_catalog(
    catalog: &mut Catalog,
    provider: &mut dyn SelectionProvider,
    ctx: &Context,
) -> Result<(), EngineError> {
    output::print("Catalog configuration starting...", ctx.verbosity);

    let chosen_streams = choose_streams(catalog, provider, ctx)?;

    for stream in &mut catalog.streams {
        let mut mdata = MetadataMap::from_records(&stream.metadata)?;

        if chosen_streams.contains(&stream.stream) {
            mdata.write_selected(Breadcrumb::root(), true);

            let fields = FieldChoices::build(&mdata, ctx.sort);
            let prompt = MultiSelect {
                message: format!("Select fields from stream: `{}`", stream.stream),
                name: "fields".to_string(),
                choices: fields.choices().to_vec(),
            };
            let picked = provider.multi_select(&prompt)?;
            let chosen = fields.resolve(&picked)?;
            output::debug(
                format!(
                    "stream `{}`: {} of {} fields chosen",
                    stream.stream,
                    chosen.len(),
                    fields.choices().len()
                ),
                ctx.verbosity,
            );
            reconcile(&mut mdata, &chosen);
        } else {
            mdata.write_selected(Breadcrumb::root(), false);
        }

        stream.metadata = mdata.into_records();
    }

    output::print("Catalog configuration saved.", ctx.verbosity);
    Ok(())
}

/// Prompt for the set of streams to include.
fn choose_streams(
    catalog: &Catalog,
    provider: &mut dyn SelectionProvider,
    ctx: &Context,
) -> Result<HashSet<String>, EngineError> {
    let mut entries: Vec<(&str, bool)> = catalog
        .streams
        .iter()
        .map(|s| (s.stream.as_str(), s.is_selected()))
        .collect();
    if ctx.sort {
        entries.sort_by_key(|(name, _)| *name);
    }

    let prompt = MultiSelect {
        message: "Select Streams".to_string(),
        name: "streams".to_string(),
        choices: entries
            .into_iter()
            .map(|(name, checked)| Choice {
                label: name.to_string(),
                checked,
                disabled: None,
            })
            .collect(),
    };
    Ok(provider.multi_select(&prompt)?.into_iter().collect())
}
