//! roster health - Provider reachability

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, emit_json};
use crate::error::Result;
use crate::provider::HealthProbe;

#[derive(Args, Debug)]
pub struct HealthArgs {}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub provider: bool,
}

pub fn check(ctx: &AppContext) -> HealthReport {
    HealthReport {
        status: "ok",
        provider: ctx.provider().is_healthy(),
    }
}

pub fn run(ctx: &AppContext, _args: &HealthArgs) -> Result<()> {
    let report = check(ctx);
    match ctx.output_format {
        OutputFormat::Json => emit_json(&report),
        OutputFormat::Plain => {
            println!("{}\t{}", report.status, report.provider);
            Ok(())
        }
        OutputFormat::Human => {
            let provider = if report.provider {
                console::style("reachable").green()
            } else {
                console::style("unreachable").yellow()
            };
            println!("Service: {}", report.status);
            println!("Provider: {provider} ({})", ctx.config.provider.base_url);
            Ok(())
        }
    }
}
