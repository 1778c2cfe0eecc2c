//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use bookshelf_core::BookId;

use crate::output;
use crate::store::{self, StoreOptions};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Book id
    pub id: String,
}

pub async fn run(args: GetArgs, store: &StoreOptions) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book id")?;

    let repo = store::open_repository(store)?;
    let book = repo.read(id).await.context("Failed to get book")?;

    output::json_pretty(&book)?;

    Ok(())
}
