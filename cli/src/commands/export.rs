//! EXPORT command - Download a Netscape bookmark file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::server_error;

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Execute the export command.
///
/// The document is written as-is; `--human` only affects the status line
/// printed after writing to a file.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ExportArgs,
) -> Result<()> {
    let url = format!("{}/bookmarks/export/html", base_url);
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(server_error(status.as_u16(), body).into());
    }

    match args.output {
        Some(path) => {
            std::fs::write(&path, &body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if human {
                println!(
                    "{} {}",
                    "Exported bookmarks to".green().bold(),
                    path.display()
                );
            } else {
                println!(
                    "{}",
                    serde_json::json!({ "path": path.display().to_string(), "bytes": body.len() })
                );
            }
        }
        None => print!("{}", body),
    }

    Ok(())
}
