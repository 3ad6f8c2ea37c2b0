//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse arguments and resolve the input source (file vs piped stdin)
//! - Choose the selection provider (terminal vs defaults)
//! - Delegate to [`crate::engine`] and write the result
//!
//! The CLI layer is thin. All selection decisions live in the engine and
//! core; all prompting lives in [`crate::ui`].

pub mod args;

pub use args::Cli;

use std::io::{self, IsTerminal};

use anyhow::{anyhow, Context as _, Result};

use crate::core::catalog::Catalog;
use crate::engine;
use crate::ui::output::Verbosity;
use crate::ui::prompts::{DefaultsProvider, SelectionProvider, TerminalProvider};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    // The document is read to completion before any prompt is shown or any
    // mutation begins.
    let mut catalog = read_catalog(&cli)?;

    let ctx = engine::Context {
        sort: cli.sort,
        verbosity,
    };
    let mut provider = make_provider(&cli)?;
    engine::configure_catalog(&mut catalog, provider.as_mut(), &ctx)?;

    catalog
        .write_to_path(&cli.output)
        .with_context(|| format!("failed to write catalog to {}", cli.output.display()))?;
    Ok(())
}

/// Load the catalog from `--input`, or from stdin when input is piped.
fn read_catalog(cli: &Cli) -> Result<Catalog> {
    if let Some(path) = cli.input.as_deref() {
        Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))
    } else if !io::stdin().is_terminal() {
        Catalog::from_reader(io::stdin().lock()).context("failed to load catalog from stdin")
    } else {
        Err(anyhow!(
            "--input is required when no catalog is piped on stdin"
        ))
    }
}

/// Pick the selection provider for this run.
fn make_provider(cli: &Cli) -> Result<Box<dyn SelectionProvider>> {
    if cli.interactive() {
        let provider = TerminalProvider::new()
            .context("cannot prompt for selections; pass --no-interactive to accept catalog defaults")?;
        Ok(Box::new(provider))
    } else {
        Ok(Box::new(DefaultsProvider))
    }
}
