use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::exec::Mode;
use crate::split::RemainderPolicy;

const EXAMPLES: &str = "\
Examples:
  simulate 1000 with 2 threads:      prisoners 1000 t 2
  simulate 1234 with 3 processes:    prisoners 1234 p 3
  simulate 1234 sequentially:        prisoners 1234 s
  simulate 1234 on a rayon pool:     prisoners 1234 r";

/// Monte Carlo estimate of the 100 prisoners problem under the
/// cycle-following strategy.
#[derive(Debug, Parser)]
#[command(name = "prisoners", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Number of simulations to run
    pub trials: u64,

    /// s = sequential, t = threads, p = processes, r = rayon pool
    #[arg(value_enum)]
    pub mode: ModeArg,

    /// Number of threads or processes (defaults to the CPU count for r)
    pub workers: Option<usize>,

    /// Prisoners (and boxes) per trial [default: 100]
    #[arg(long)]
    pub prisoners: Option<usize>,

    /// Boxes each prisoner may open [default: half the prisoners]
    #[arg(long)]
    pub cycle_bound: Option<usize>,

    /// Fixed seed for reproducible runs; otherwise each worker seeds from the OS
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hand leftover trials to the first workers instead of dropping them
    #[arg(long)]
    pub spread_remainder: bool,

    /// TOML file with prisoners, cycle_bound, seed and remainder keys
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    #[value(name = "s")]
    Sequential,
    #[value(name = "t")]
    Threads,
    #[value(name = "p")]
    Processes,
    #[value(name = "r")]
    Rayon,
    /// child process spawned by `p`, prints its success count
    #[value(name = "w", hide = true)]
    Worker,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Simulate { mode: Mode, trials: u64 },
    Worker { slot: usize, share: u64 },
}

impl Cli {
    pub fn invocation(&self) -> Result<Invocation> {
        let workers = |name: &str| match self.workers {
            Some(0) => Err(Error::InvalidParams(format!("need at least one {}", name))),
            Some(n) => Ok(n),
            None => Err(Error::InvalidParams(format!(
                "mode {:?} needs a {} count",
                self.mode, name
            ))),
        };
        let simulate = |mode| Invocation::Simulate {
            mode,
            trials: self.trials,
        };

        match self.mode {
            ModeArg::Sequential => match self.workers {
                None => Ok(simulate(Mode::Sequential)),
                Some(_) => Err(Error::InvalidParams(
                    "sequential mode takes no worker count".to_string(),
                )),
            },
            ModeArg::Threads => Ok(simulate(Mode::Threads(workers("thread")?))),
            ModeArg::Processes => Ok(simulate(Mode::Processes(workers("process")?))),
            ModeArg::Rayon => match self.workers {
                None => Ok(simulate(Mode::Rayon(num_cpus::get()))),
                Some(_) => Ok(simulate(Mode::Rayon(workers("rayon thread")?))),
            },
            ModeArg::Worker => match self.workers {
                Some(slot) => Ok(Invocation::Worker {
                    slot,
                    share: self.trials,
                }),
                None => Err(Error::InvalidParams("worker needs a slot".to_string())),
            },
        }
    }

    /// The config file, if any, with flags layered on top.
    pub fn config(&self) -> Result<Config> {
        let file = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        Ok(file.merge(self.overrides()))
    }

    fn overrides(&self) -> Config {
        Config {
            prisoners: self.prisoners,
            cycle_bound: self.cycle_bound,
            seed: self.seed,
            remainder: self.spread_remainder.then_some(RemainderPolicy::Spread),
        }
    }
}
