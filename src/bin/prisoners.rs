use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use env_logger::Env;

use prisoners::cli::{Cli, Invocation};
use prisoners::{run_worker, Report, Simulation};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let invocation = cli
        .invocation()
        .unwrap_or_else(|e| Cli::command().error(ErrorKind::ValueValidation, e).exit());
    let batch = cli
        .config()
        .and_then(|config| config.batch())
        .context("couldn't resolve simulation parameters")?;

    match invocation {
        Invocation::Worker { slot, share } => {
            let successes = run_worker(batch, slot, share)?;
            println!("{}", successes);
        }
        Invocation::Simulate { mode, trials } => {
            let simulation = Simulation::new(batch)?;
            let tally = simulation
                .run(mode, trials)
                .with_context(|| format!("{} failed", mode.label().to_lowercase()))?;
            let report = Report::from_tally(&tally, batch.params)?;
            println!("{}", report);
        }
    }
    Ok(())
}
