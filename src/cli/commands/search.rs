//! roster search - Rank profiles for a query

use std::time::Instant;

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::SearchResults;
use crate::cli::output::Formattable;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Staffing query, e.g. "python data engineer with insurance experience"
    pub query: String,

    /// Number of profiles to return (defaults to search.default_k)
    #[arg(short)]
    pub k: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let k = args.k.unwrap_or(ctx.config.search.default_k);
    let engine = ctx.engine()?;

    let started = Instant::now();
    let ranking = engine.search_scored(&args.query, k);
    let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let results = SearchResults::new(args.query.clone(), ranking).with_duration(elapsed);
    println!("{}", results.format(ctx.output_format));
    Ok(())
}
