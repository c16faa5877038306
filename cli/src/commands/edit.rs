//! EDIT command - Replace a bookmark's title and url.

use anyhow::Result;
use clap::Args;

use super::{Bookmark, BookmarkBody, Envelope, make_request, output};

/// Arguments for the edit command.
#[derive(Args)]
pub struct EditArgs {
    /// Bookmark ID
    pub id: i64,

    /// New title
    pub title: String,

    /// New URL
    pub url: String,
}

/// Execute the edit command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: EditArgs,
) -> Result<()> {
    let url = format!("{}/bookmarks/{}", base_url, args.id);
    let body = BookmarkBody {
        title: &args.title,
        url: &args.url,
    };

    let response: Envelope<Bookmark> = make_request(client.patch(&url).json(&body)).await?;

    output(&response, human)
}
