//! Add command implementation.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use bookshelf_core::Book;

use crate::output;
use crate::store::{self, StoreOptions};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title (required unless --json is given)
    #[arg(long)]
    pub title: Option<String>,

    /// Author (required unless --json is given)
    #[arg(long)]
    pub author: Option<String>,

    /// Publication date, free-form
    #[arg(long, default_value = "")]
    pub published_date: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Display name of the adding user
    #[arg(long, default_value = "")]
    pub created_by: String,

    /// Id of the adding user; required for the book to appear in
    /// per-user listings
    #[arg(long, default_value = "")]
    pub created_by_id: String,

    /// Cover image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// JSON file with book fields (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,
}

pub async fn run(args: AddArgs, store: &StoreOptions) -> Result<()> {
    let repo = store::open_repository(store)?;

    let book = if let Some(ref path) = args.json {
        let mut book: Book = parse_json(path)?;
        // Ids are store-assigned; one in the input is ignored.
        book.id = None;
        book
    } else {
        Book {
            id: None,
            title: args.title.context("--title is required (or pass --json)")?,
            author: args.author.context("--author is required (or pass --json)")?,
            published_date: args.published_date,
            description: args.description,
            created_by: args.created_by,
            created_by_id: args.created_by_id,
            image_url: args.image_url,
        }
    };

    let id = repo.create(&book).await.context("Failed to create book")?;

    // Output the created book's id
    println!("{}", id);
    output::success(&format!("Created book {}", id));

    Ok(())
}

fn parse_json(path: &str) -> Result<Book> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        serde_json::from_str(&buf).context("Invalid JSON from stdin")
    } else {
        let content = std::fs::read_to_string(path).context("Failed to read JSON file")?;
        serde_json::from_str(&content).context("Invalid JSON in file")
    }
}
