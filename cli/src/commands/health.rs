//! HEALTH command - Show server and database status.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, output, server_error};

/// Arguments for the health command.
#[derive(Args)]
pub struct HealthArgs {}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct HealthChecks {
    pub postgres: String,
}

fn colored_status(status: &str) -> colored::ColoredString {
    if status == "up" {
        status.green().bold()
    } else {
        status.red().bold()
    }
}

impl HumanReadable for HealthResponse {
    fn print_human(&self) {
        println!("{} {}", "Status:".cyan(), colored_status(&self.status));
        println!("  {} {}", "postgres:".cyan(), colored_status(&self.checks.postgres));
    }
}

/// Execute the health command.
///
/// A 503 still carries a health report, so it is printed rather than treated
/// as a request failure. The command fails when the service is down.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    _args: HealthArgs,
) -> Result<()> {
    let url = format!("{}/health", base_url);
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let report: HealthResponse = match serde_json::from_str(&body) {
        Ok(report) => report,
        Err(_) => return Err(server_error(status.as_u16(), body).into()),
    };

    output(&report, human)?;

    if report.status != "up" {
        anyhow::bail!("service is {}", report.status);
    }
    Ok(())
}
