//! EXISTS command - Check whether a url is bookmarked.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{Envelope, HumanReadable, make_request, output};

/// Arguments for the exists command.
#[derive(Args)]
pub struct ExistsArgs {
    /// URL to look up (exact match)
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Existence {
    pub id: i64,
    pub found: bool,
}

impl HumanReadable for Envelope<Existence> {
    fn print_human(&self) {
        if self.data.found {
            println!(
                "{} (id {})",
                "Bookmarked".green().bold(),
                self.data.id.to_string().yellow()
            );
        } else {
            println!("{}", "Not bookmarked".dimmed());
        }
    }
}

/// Execute the exists command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ExistsArgs,
) -> Result<()> {
    let url = format!("{}/bookmarks/exists", base_url);
    let response: Envelope<Existence> =
        make_request(client.get(&url).query(&[("url", args.url.as_str())])).await?;

    output(&response, human)
}
