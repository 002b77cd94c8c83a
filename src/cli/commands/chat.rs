//! roster chat - Recommend candidates for a query

use clap::Args;
use console::style;

use crate::answer::Answer;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Staffing query
    pub query: String,

    /// Candidates to consider (defaults to search.default_k)
    #[arg(short)]
    pub k: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &ChatArgs) -> Result<()> {
    let k = args.k.unwrap_or(ctx.config.search.default_k);
    let answer = ctx.engine()?.answer(&args.query, k);

    match ctx.output_format {
        OutputFormat::Json => {
            let generated = answer.generated;
            let mut response = robot_ok(answer);
            if !generated {
                response = response.with_warning("generation provider unavailable; templated answer");
            }
            emit_robot(&response)
        }
        OutputFormat::Plain => {
            println!("{}", answer.text);
            Ok(())
        }
        OutputFormat::Human => {
            emit_human(human_layout(&answer));
            Ok(())
        }
    }
}

fn human_layout(answer: &Answer) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.push_line(answer.text.clone()).blank();
    if !answer.candidates.is_empty() {
        layout.section("Candidates");
        for c in &answer.candidates {
            layout.bullet(&format!("{} ({}, {} yrs, {})", c.name, c.title, c.experience_years, c.availability));
        }
    }
    if !answer.generated {
        layout
            .blank()
            .push_line(style("(templated answer: generation provider unavailable)").dim().to_string());
    }
    layout
}
