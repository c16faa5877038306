//! ADD command - Create a bookmark.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{Bookmark, BookmarkBody, Envelope, HumanReadable, make_request, output, print_bookmark};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Bookmark title
    pub title: String,

    /// Absolute URL to bookmark
    pub url: String,
}

impl HumanReadable for Envelope<Bookmark> {
    fn print_human(&self) {
        println!("{}", "Bookmark saved".green().bold());
        println!();
        print_bookmark(&self.data);
    }
}

/// Execute the add command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: AddArgs,
) -> Result<()> {
    let url = format!("{}/bookmarks", base_url);
    let body = BookmarkBody {
        title: &args.title,
        url: &args.url,
    };

    let response: Envelope<Bookmark> = make_request(client.post(&url).json(&body)).await?;

    output(&response, human)
}
