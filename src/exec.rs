//! Runs a batch of trials sequentially, on scoped threads, on a rayon pool, or
//! across child processes.
//!
//! Every mode splits the request the same way and gives each worker slot its
//! own stream, so with a fixed seed all parallel modes produce the same
//! per-worker counts.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crossbeam::thread;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::aggregate::run_trials;
use crate::error::{Error, Result};
use crate::rng::Seed;
use crate::split::{RemainderPolicy, WorkSplit};
use crate::trial::TrialParams;

/// Mode argument selecting the hidden child worker.
pub const WORKER_MODE: &str = "w";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Sequential,
    Threads(usize),
    Processes(usize),
    Rayon(usize),
}

impl Mode {
    pub fn workers(self) -> usize {
        match self {
            Mode::Sequential => 1,
            Mode::Threads(n) | Mode::Processes(n) | Mode::Rayon(n) => n,
        }
    }

    /// Heading of the final report.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Sequential => "Sequence (Single Thread / Process)",
            Mode::Threads(_) => "All threads",
            Mode::Processes(_) => "All processes",
            Mode::Rayon(_) => "All rayon workers",
        }
    }

    /// Name each worker announces itself with.
    pub fn task(self) -> &'static str {
        match self {
            Mode::Sequential => "Sequence",
            Mode::Threads(_) => "Thread",
            Mode::Processes(_) => "Process",
            Mode::Rayon(_) => "Rayon worker",
        }
    }
}

/// Everything a worker needs besides its slot and share.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Batch {
    pub params: TrialParams,
    pub seed: Seed,
    pub remainder: RemainderPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    pub mode: Mode,
    pub requested: u64,
    /// successes per worker slot
    pub per_worker: Vec<u64>,
    pub shares: Vec<u64>,
}

impl Tally {
    pub fn successes(&self) -> u64 {
        self.per_worker.iter().sum()
    }

    pub fn trials(&self) -> u64 {
        self.shares.iter().sum()
    }
}

/// One worker's share: builds the slot's stream and counts successes.
pub fn run_worker(batch: Batch, slot: usize, share: u64) -> Result<u64> {
    let mut rng = batch.seed.rng_for(slot)?;
    let successes = run_trials(batch.params, share, &mut rng);
    debug!("worker {}: {}/{} found", slot + 1, successes, share);
    Ok(successes)
}

#[derive(Clone, Debug)]
pub struct Simulation {
    pub batch: Batch,
    /// executable re-run for each worker process
    pub program: PathBuf,
}

impl Simulation {
    /// Worker processes re-run the current executable.
    pub fn new(batch: Batch) -> Result<Self> {
        let program = std::env::current_exe().map_err(|source| Error::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })?;
        Ok(Simulation { batch, program })
    }

    pub fn with_program<P: Into<PathBuf>>(batch: Batch, program: P) -> Self {
        Simulation {
            batch,
            program: program.into(),
        }
    }

    pub fn run(&self, mode: Mode, requested: u64) -> Result<Tally> {
        let split = WorkSplit::new(requested, mode.workers(), self.batch.remainder)?;
        if split.dropped() > 0 {
            warn!(
                "{} of {} trials don't divide among {} workers and are dropped",
                split.dropped(),
                requested,
                split.workers()
            );
        }
        if split.total() <= 1 {
            return Err(Error::TooFewTrials {
                trials: split.total(),
            });
        }

        let per_worker = match mode {
            Mode::Sequential => vec![run_worker(self.batch, 0, split.shares[0])?],
            Mode::Threads(_) => self.run_threads(mode, &split)?,
            Mode::Rayon(_) => self.run_rayon(mode, &split)?,
            Mode::Processes(_) => self.run_processes(mode, &split)?,
        };
        Ok(Tally {
            mode,
            requested,
            per_worker,
            shares: split.shares,
        })
    }

    fn run_threads(&self, mode: Mode, split: &WorkSplit) -> Result<Vec<u64>> {
        let batch = self.batch;
        run_scoped(mode, split, move |slot, share| run_worker(batch, slot, share))
    }

    fn run_rayon(&self, mode: Mode, split: &WorkSplit) -> Result<Vec<u64>> {
        let batch = self.batch;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(split.workers())
            .build()?;
        info!("rayon pool with {} threads", pool.current_num_threads());
        for (slot, &share) in split.shares.iter().enumerate() {
            announce(mode, slot, share);
        }
        pool.install(|| {
            split
                .shares
                .par_iter()
                .enumerate()
                .map(|(slot, &share)| run_worker(batch, slot, share))
                .collect()
        })
    }

    fn run_processes(&self, mode: Mode, split: &WorkSplit) -> Result<Vec<u64>> {
        let mut children: Vec<Child> = Vec::with_capacity(split.workers());
        for (slot, &share) in split.shares.iter().enumerate() {
            announce(mode, slot, share);
            let spawned = Command::new(&self.program)
                .args(worker_args(self.batch, slot, share))
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .spawn();
            match spawned {
                Ok(child) => {
                    info!("spawned worker process {} (pid {})", slot + 1, child.id());
                    children.push(child);
                }
                Err(source) => {
                    stop_children(children);
                    return Err(Error::Spawn { slot, source });
                }
            }
        }

        let mut per_worker = Vec::with_capacity(children.len());
        let mut pending = children.into_iter().zip(&split.shares).enumerate();
        while let Some((slot, (child, &share))) = pending.next() {
            match collect_child(&self.program, slot, child, share) {
                Ok(successes) => per_worker.push(successes),
                Err(e) => {
                    stop_children(pending.map(|(_, (child, _))| child));
                    return Err(e);
                }
            }
        }
        Ok(per_worker)
    }
}

/// Runs `work` for every slot of `split` on its own scoped thread.
fn run_scoped<F>(mode: Mode, split: &WorkSplit, work: F) -> Result<Vec<u64>>
where
    F: Fn(usize, u64) -> Result<u64> + Copy + Send,
{
    thread::scope(|scope| {
        let handles: Vec<_> = split
            .shares
            .iter()
            .enumerate()
            .map(|(slot, &share)| {
                announce(mode, slot, share);
                scope.spawn(move |_| work(slot, share))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| Error::WorkerPanicked)
                    .and_then(|successes| successes)
            })
            .collect::<Result<Vec<u64>>>()
    })
    .map_err(|_| Error::WorkerPanicked)?
}

/// Kills and reaps workers that are no longer wanted.
fn stop_children<I: IntoIterator<Item = Child>>(children: I) {
    for mut child in children {
        warn!("stopping worker process {}", child.id());
        let _ = child.kill();
        let _ = child.wait();
    }
}

fn announce(mode: Mode, slot: usize, share: u64) {
    println!(
        "{} {}, number of simulations to perform: {}",
        mode.task(),
        slot + 1,
        share
    );
}

/// Command line for a child worker running `share` trials in `slot`.
pub fn worker_args(batch: Batch, slot: usize, share: u64) -> Vec<String> {
    let mut args = vec![
        share.to_string(),
        WORKER_MODE.to_string(),
        slot.to_string(),
        "--prisoners".to_string(),
        batch.params.prisoners.to_string(),
        "--cycle-bound".to_string(),
        batch.params.cycle_bound.to_string(),
    ];
    if let Seed::Fixed(seed) = batch.seed {
        args.push("--seed".to_string());
        args.push(seed.to_string());
    }
    args
}

fn collect_child(program: &Path, slot: usize, child: Child, share: u64) -> Result<u64> {
    let output = child.wait_with_output().map_err(|source| Error::Io {
        path: program.to_path_buf(),
        source,
    })?;
    if !output.status.success() {
        return Err(Error::WorkerFailed {
            slot,
            status: output.status,
        });
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    match text.parse::<u64>() {
        Ok(successes) if successes <= share => Ok(successes),
        _ => Err(Error::WorkerOutput { slot, output: text }),
    }
}
