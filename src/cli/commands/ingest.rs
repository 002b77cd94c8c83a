//! roster ingest - Upsert profiles from an upload file

use std::path::PathBuf;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Profile file (.json or .csv)
    pub file: PathBuf,
}

pub fn run(ctx: &AppContext, args: &IngestArgs) -> Result<()> {
    let outcome = ctx.ingest_file(&args.file)?;

    match ctx.output_format {
        OutputFormat::Json => emit_robot(&robot_ok(outcome)),
        OutputFormat::Plain => {
            println!("{}\t{}", outcome.added, outcome.total);
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("Ingest complete")
                .kv("Records", &outcome.added.to_string())
                .kv("Total profiles", &outcome.total.to_string());
            if let Some(stored) = &outcome.stored {
                layout.kv("Archived as", stored);
            }
            emit_human(layout);
            Ok(())
        }
    }
}
