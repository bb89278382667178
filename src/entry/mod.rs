mod plan;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::BenchArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

pub use plan::RunPlan;

/// Process entry: one full benchmark cycle per selected strategy.
///
/// Request failures never turn into an error here; only setup problems do.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, or when the runtime,
/// HTTP client, or resource sampling cannot be set up.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose);

    let plan = build_plan(&args)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(execute_plan(&plan))
}

fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let matches = BenchArgs::command().get_matches();
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
