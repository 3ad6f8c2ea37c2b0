//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--output` / `-o`: destination file (required)
//! - `--input` / `-i`: source file; read from stdin instead when input is
//!   piped, in which case the flag is not required
//! - `--sort` / `-s`: sorted iteration for stream and field choices
//! - `--quiet` / `-q`: minimal output
//! - `--debug`: verbose output
//! - `--no-interactive`: never prompt; accept each prompt's defaults
//!
//! The `--input` requiredness depends on whether stdin is a terminal, so it
//! is declared optional here and enforced after parsing, before any
//! document is read.

use clap::Parser;
use std::path::PathBuf;

/// Interactive stream and field selection for data-pipeline catalogs
#[derive(Parser, Debug)]
#[command(name = "catsel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Destination file for the configured catalog
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Source catalog file; read from stdin instead when input is piped
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Present streams and fields in sorted order rather than document order
    #[arg(short, long)]
    pub sort: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Never prompt; accept each prompt's pre-checked defaults
    #[arg(long)]
    pub no_interactive: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Whether selections should be prompted for interactively.
    pub fn interactive(&self) -> bool {
        !self.no_interactive
    }
}
