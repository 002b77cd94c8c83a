use clap::Parser;

use roster::cli::commands::mcp::McpCommand;
use roster::cli::{Cli, Commands, OutputFormat};

#[test]
fn parse_search_with_k() {
    let cli = Cli::try_parse_from(["roster", "search", "rust backend", "-k", "3"]).unwrap();
    match cli.command {
        Commands::Search(args) => {
            assert_eq!(args.query, "rust backend");
            assert_eq!(args.k, Some(3));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_chat() {
    let cli = Cli::try_parse_from(["roster", "--robot", "chat", "who knows kafka?"]).unwrap();
    assert_eq!(cli.output_format(), OutputFormat::Json);
    assert!(matches!(cli.command, Commands::Chat(ref args) if args.query == "who knows kafka?" && args.k.is_none()));
}

#[test]
fn parse_ingest_path() {
    let cli = Cli::try_parse_from(["roster", "ingest", "people.csv"]).unwrap();
    match cli.command {
        Commands::Ingest(args) => assert_eq!(args.file.to_str(), Some("people.csv")),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_mcp_serve_debug() {
    let cli = Cli::try_parse_from(["roster", "mcp", "serve", "--debug"]).unwrap();
    match cli.command {
        Commands::Mcp(args) => {
            assert!(matches!(args.command, McpCommand::Serve(ref serve) if serve.debug));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["roster", "list", "--available", "-vv", "--format", "plain"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.output_format(), OutputFormat::Plain);
}

#[test]
fn search_requires_query() {
    assert!(Cli::try_parse_from(["roster", "search"]).is_err());
}

#[test]
fn k_must_be_numeric() {
    assert!(Cli::try_parse_from(["roster", "search", "x", "-k", "many"]).is_err());
}
