//! LIST command - List and search bookmarks.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{
    Bookmark, Envelope, HumanReadable, format_timestamp, make_request_with_headers, output,
    truncate,
};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Bookmarks per page (all when omitted)
    #[arg(long)]
    pub per_page: Option<i64>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<i64>,

    /// Case-insensitive substring of title or url
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// One page of bookmarks plus the total match count.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub total: Option<i64>,
    pub bookmarks: Vec<Bookmark>,
}

impl HumanReadable for ListOutput {
    fn print_human(&self) {
        println!("{}", "Bookmarks".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.bookmarks.is_empty() {
            println!("  {}", "(No bookmarks)".dimmed());
            return;
        }

        for bookmark in &self.bookmarks {
            println!(
                "  {:>6}  {}  {}",
                bookmark.id.to_string().yellow(),
                truncate(&bookmark.title, 32).bold(),
                truncate(&bookmark.url, 48).blue()
            );
            println!(
                "          {}",
                format_timestamp(&bookmark.created_at).dimmed()
            );
        }

        println!();
        if let Some(total) = self.total {
            println!(
                "  Showing {} of {} matching bookmark(s)",
                self.bookmarks.len(),
                total
            );
        }
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(per_page) = args.per_page {
        query.push(("per_page", per_page.to_string()));
    }
    if let Some(page) = args.page {
        query.push(("page", page.to_string()));
    }
    if let Some(search) = args.search {
        query.push(("search", search));
    }

    let url = format!("{}/bookmarks", base_url);
    let (headers, body): (_, Envelope<Vec<Bookmark>>) =
        make_request_with_headers(client.get(&url).query(&query)).await?;

    let total = headers
        .get("x-total")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    output(
        &ListOutput {
            total,
            bookmarks: body.data,
        },
        human,
    )
}
