//! Update command implementation.

use anyhow::{Context, Result};
use clap::Args;

use bookshelf_core::{Book, BookId};

use crate::output;
use crate::store::{self, StoreOptions};

/// Overwrite a stored book.
///
/// Updates replace every field: flags left unset write their defaults over
/// whatever the store held before. There is no partial update.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Book id
    pub id: String,

    /// Title
    #[arg(long)]
    pub title: String,

    /// Author
    #[arg(long)]
    pub author: String,

    /// Publication date, free-form
    #[arg(long, default_value = "")]
    pub published_date: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Display name of the adding user
    #[arg(long, default_value = "")]
    pub created_by: String,

    /// Id of the adding user
    #[arg(long, default_value = "")]
    pub created_by_id: String,

    /// Cover image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

pub async fn run(args: UpdateArgs, store: &StoreOptions) -> Result<()> {
    let id: BookId = args.id.parse().context("Invalid book id")?;

    let book = Book {
        id: Some(id),
        title: args.title,
        author: args.author,
        published_date: args.published_date,
        description: args.description,
        created_by: args.created_by,
        created_by_id: args.created_by_id,
        image_url: args.image_url,
    };

    let repo = store::open_repository(store)?;
    repo.update(&book).await.context("Failed to update book")?;

    output::success(&format!("Updated book {}", id));

    Ok(())
}
