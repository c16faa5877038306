//! Command implementations for the bookmarks CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod add;
pub mod delete;
pub mod edit;
pub mod exists;
pub mod export;
pub mod health;
pub mod list;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Success envelope returned by the server: `{"data": ...}`.
#[derive(Debug, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A bookmark as returned by the server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and edit.
#[derive(Debug, Serialize)]
pub struct BookmarkBody<'a> {
    pub title: &'a str,
    pub url: &'a str,
}

/// Build the HTTP client.
pub fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("bookmarks-cli/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Make an HTTP request and decode a JSON success body.
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    make_request_with_headers(request)
        .await
        .map(|(_, body)| body)
}

/// Like [`make_request`], also returning the response headers.
pub async fn make_request_with_headers<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<(HeaderMap, T), CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        let headers = response.headers().clone();
        let body = response.json::<T>().await?;
        Ok((headers, body))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(server_error(status.as_u16(), body))
    }
}

/// Turn an error response into `CliError::Server`, preferring the
/// `{"error": ...}` message when the body has one.
pub fn server_error(status: u16, body: String) -> CliError {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| json.get("error").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or(body);

    CliError::Server { status, message }
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print one bookmark as an indented block.
pub fn print_bookmark(bookmark: &Bookmark) {
    use colored::Colorize;

    println!("  {} {}", "ID:".cyan(), bookmark.id);
    println!("  {} {}", "Title:".cyan(), bookmark.title);
    println!("  {} {}", "URL:".cyan(), bookmark.url);
    println!(
        "  {} {}",
        "Created:".cyan(),
        format_timestamp(&bookmark.created_at)
    );
    println!(
        "  {} {}",
        "Updated:".cyan(),
        format_timestamp(&bookmark.updated_at)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_prefers_json_message() {
        let err = server_error(409, r#"{"error":"bookmark for this url already exists"}"#.into());
        assert_eq!(
            err.to_string(),
            "Server error (409): bookmark for this url already exists"
        );

        let err = server_error(502, "Bad Gateway".into());
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long bookmark title", 10), "a long ...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}
