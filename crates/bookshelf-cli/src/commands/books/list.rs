//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::store::{self, StoreOptions};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list books added by this user id
    #[arg(long)]
    pub user: Option<String>,

    /// Continuation token from the previous page
    #[arg(long)]
    pub page_token: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, store: &StoreOptions) -> Result<()> {
    let repo = store::open_repository(store)?;

    let page = match &args.user {
        Some(user) => repo
            .list_by_user(user, args.page_token.as_deref())
            .await
            .context("Failed to list books")?,
        None => repo
            .list(args.page_token.as_deref())
            .await
            .context("Failed to list books")?,
    };

    if page.items.is_empty() {
        eprintln!("{}", "No books found.".dimmed());
    }

    for book in &page.items {
        if args.pretty {
            output::json_pretty(book)?;
        } else {
            output::json(book)?;
        }
    }

    if let Some(token) = &page.next_token {
        eprintln!();
        eprintln!("{}: {}", "Next page token".dimmed(), token);
    }

    Ok(())
}
