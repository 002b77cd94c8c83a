//! CLI command implementations
//!
//! Each subcommand has its own module with an args struct and a `run()`.

use clap::Subcommand;

pub mod chat;
pub mod health;
pub mod index;
pub mod ingest;
pub mod list;
pub mod mcp;
pub mod search;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank profiles for a staffing query
    Search(search::SearchArgs),

    /// Recommend candidates for a staffing query
    Chat(chat::ChatArgs),

    /// Upsert profiles from a .json or .csv file
    Ingest(ingest::IngestArgs),

    /// List all profiles in store order
    List(list::ListArgs),

    /// Rebuild the similarity index
    Index(index::IndexArgs),

    /// Check the embedding/generation provider
    Health(health::HealthArgs),

    /// MCP server over stdio
    Mcp(mcp::McpArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Chat(args) => chat::run(ctx, args),
        Commands::Ingest(args) => ingest::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Index(args) => index::run(ctx, args),
        Commands::Health(args) => health::run(ctx, args),
        Commands::Mcp(args) => mcp::run(ctx, args),
    }
}
