//! Command-line client for the bookmark catalog.
//!
//! Commands:
//! - list: List and search bookmarks
//! - add: Create a bookmark
//! - edit: Replace a bookmark's title and url
//! - delete: Delete a bookmark
//! - exists: Check whether a url is bookmarked
//! - export: Download a Netscape bookmark file
//! - health: Show server and database status
//!
//! Configuration via environment:
//! - BOOKMARKS_URL: Base URL of the bookmark server (default: http://localhost:8080)

mod commands;

use clap::{Parser, Subcommand};

use commands::{
    add::AddArgs, delete::DeleteArgs, edit::EditArgs, exists::ExistsArgs, export::ExportArgs,
    health::HealthArgs, list::ListArgs,
};

/// Bookmark catalog CLI
///
/// Manage bookmarks from the command line. Prints JSON by default; pass
/// --human for formatted output.
#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Bookmark server URL
    #[arg(
        long,
        env = "BOOKMARKS_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookmarks, newest first
    List(ListArgs),

    /// Create a bookmark
    Add(AddArgs),

    /// Replace the title and url of a bookmark
    Edit(EditArgs),

    /// Delete a bookmark
    Delete(DeleteArgs),

    /// Check whether a url is already bookmarked
    Exists(ExistsArgs),

    /// Export all bookmarks as a Netscape bookmark file
    Export(ExportArgs),

    /// Show server health
    Health(HealthArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let base_url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&client, base_url, cli.human, args).await,
        Commands::Add(args) => commands::add::execute(&client, base_url, cli.human, args).await,
        Commands::Edit(args) => commands::edit::execute(&client, base_url, cli.human, args).await,
        Commands::Delete(args) => {
            commands::delete::execute(&client, base_url, cli.human, args).await
        }
        Commands::Exists(args) => {
            commands::exists::execute(&client, base_url, cli.human, args).await
        }
        Commands::Export(args) => {
            commands::export::execute(&client, base_url, cli.human, args).await
        }
        Commands::Health(args) => {
            commands::health::execute(&client, base_url, cli.human, args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
