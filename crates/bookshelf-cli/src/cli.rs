//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::books::BooksCommand;

/// Bookshelf CLI for managing a book catalog in a document store.
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Store location URL, https:// or file:// (falls back to BOOKSHELF_STORE)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Project id for network stores (falls back to BOOKSHELF_PROJECT)
    #[arg(long, global = true)]
    pub project: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Book catalog operations
    Books(BooksCommand),
}
