//! roster index - Rebuild the similarity index

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct IndexArgs {}

pub fn run(ctx: &AppContext, _args: &IndexArgs) -> Result<()> {
    let status = ctx.reindex()?;

    match ctx.output_format {
        OutputFormat::Json => {
            let mut response = robot_ok(status);
            if !status.index_present && status.profiles > 0 {
                response = response.with_warning("embedding provider unavailable; keyword ranking only");
            }
            emit_robot(&response)
        }
        OutputFormat::Plain => {
            println!(
                "{}\t{}\t{}",
                status.profiles,
                status.index_present,
                status.dim.unwrap_or(0)
            );
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("Index rebuilt")
                .kv("Profiles", &status.profiles.to_string())
                .kv("Semantic index", if status.index_present { "present" } else { "absent" });
            if let Some(dim) = status.dim {
                layout.kv("Dimension", &dim.to_string());
            }
            emit_human(layout);
            Ok(())
        }
    }
}
