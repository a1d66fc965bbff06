use std::io::{self, BufWriter};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use sheet::cli::CliArgs;
use sheet::config::SheetConfig;
use sheet::pipeline::Pipeline;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config = args.load_config();
    sheet::tracing::init(config.as_ref().is_ok_and(|c| c.log_to_file));

    let result = config
        .context("could not load configuration")
        .and_then(|config| run(args, &config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("sheet: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs, config: &SheetConfig) -> Result<()> {
    let run = args
        .into_run_config(config)
        .context("invalid command line")?;

    let input = io::stdin().lock();
    let mut output = BufWriter::new(io::stdout().lock());
    let summary = Pipeline::new(run.commands, run.delimiters, run.limits)
        .run(input, &mut output)
        .context("processing failed")?;

    tracing::debug!(?summary, "done");
    Ok(())
}
