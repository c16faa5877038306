//! DELETE command - Delete a bookmark.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Bookmark ID to delete
    pub id: i64,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Response from deleting a bookmark.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteResponse {
    pub data: String,
}

impl HumanReadable for DeleteResponse {
    fn print_human(&self) {
        println!("{}", self.data.green().bold());
    }
}

/// Execute the delete command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: DeleteArgs,
) -> Result<()> {
    // Confirmation prompt for interactive use
    if human && !args.yes {
        eprint!(
            "{} Are you sure you want to delete bookmark {}? [y/N] ",
            "Warning:".yellow().bold(),
            args.id
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = format!("{}/bookmarks/{}", base_url, args.id);
    let response: DeleteResponse = make_request(client.delete(&url)).await?;

    output(&response, human)
}
