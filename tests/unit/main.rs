mod cli_command_parse_tests;
mod config_tests;
mod ingest_tests;
mod projection_tests;
