//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use bookshelf_core::BookId;

use crate::output;
use crate::store::{self, StoreOptions};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Book id
    pub id: String,
}

pub async fn run(args: DeleteArgs, store: &StoreOptions) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book id")?;

    let repo = store::open_repository(store)?;
    repo.delete(id).await.context("Failed to delete book")?;

    output::success(&format!("Deleted book {}", id));

    Ok(())
}
