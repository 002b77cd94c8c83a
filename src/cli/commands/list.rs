//! roster list - All profiles in store order

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only profiles whose availability is "available"
    #[arg(long)]
    pub available: bool,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let mut profiles = ctx.engine()?.profiles();
    if args.available {
        profiles.retain(|p| p.is_available());
    }

    match ctx.output_format {
        OutputFormat::Json => emit_robot(&robot_ok(profiles)),
        OutputFormat::Plain => {
            for p in &profiles {
                println!("{}\t{}\t{}\t{}", p.id, p.name, p.title, p.availability);
            }
            Ok(())
        }
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout.title(&format!("{} profiles", profiles.len()));
            for p in &profiles {
                layout.kv(&format!("#{}", p.id), &format!("{} - {} ({})", p.name, p.title, p.availability));
            }
            emit_human(layout);
            Ok(())
        }
    }
}
