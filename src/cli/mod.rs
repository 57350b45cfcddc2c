//! Command-line interface for book-catalog.
//!
//! The binary is a thin interactive shell around [`Catalog`](crate::Catalog).
//! All indexing lives in the library; this module only collects and validates
//! input and renders results.
//!
//! ## Usage
//!
//! ```text
//! # Start a session seeded with the sample books
//! book-catalog shell
//!
//! # Empty catalog with 64 hash buckets, JSON book lines
//! book-catalog --format json shell --empty --capacity 64
//!
//! # Scripted session
//! printf '5\n9\n' | book-catalog shell
//! ```

use clap::{Parser, Subcommand};

pub mod shell;

#[derive(Parser)]
#[command(name = "book-catalog")]
#[command(version)]
#[command(about = "In-memory book catalog indexed by ISBN")]
#[command(
    long_about = "book-catalog keeps books in memory under two indexes at once:\n- a bucketed hash table that defines listing order and serves author scans\n- a binary search tree keyed by ISBN that serves lookups and sorted listing\n\nNothing is persisted; the catalog lives for one session."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for book listings
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive catalog session
    Shell(shell::ShellArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
