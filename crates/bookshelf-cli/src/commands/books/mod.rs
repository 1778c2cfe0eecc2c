//! Books subcommand implementations.

mod add;
mod delete;
mod get;
mod list;
mod update;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::store::StoreOptions;

#[derive(Args, Debug)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub command: BooksSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BooksSubcommand {
    /// Add a new book to the catalog
    Add(add::AddArgs),

    /// Fetch a single book by id
    Get(get::GetArgs),

    /// Overwrite a book's fields
    Update(update::UpdateArgs),

    /// Delete a book by id
    Delete(delete::DeleteArgs),

    /// List books, ten per page
    List(list::ListArgs),
}

pub async fn handle(cmd: BooksCommand, store: &StoreOptions) -> Result<()> {
    match cmd.command {
        BooksSubcommand::Add(args) => add::run(args, store).await,
        BooksSubcommand::Get(args) => get::run(args, store).await,
        BooksSubcommand::Update(args) => update::run(args, store).await,
        BooksSubcommand::Delete(args) => delete::run(args, store).await,
        BooksSubcommand::List(args) => list::run(args, store).await,
    }
}
