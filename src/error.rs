use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't seed from the system entropy source: {0}")]
    Entropy(#[from] rand::Error),

    #[error("failed to spawn worker process {slot}: {source}")]
    Spawn {
        slot: usize,
        source: std::io::Error,
    },

    #[error("worker process {slot} exited with {status}")]
    WorkerFailed { slot: usize, status: ExitStatus },

    #[error("worker process {slot} reported {output:?}, expected a success count")]
    WorkerOutput { slot: usize, output: String },

    #[error("a worker thread panicked")]
    WorkerPanicked,

    #[error("couldn't build rayon pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("need at least 2 trials to estimate variance, got {trials}")]
    TooFewTrials { trials: u64 },

    #[error("{successes} successes out of {trials} trials")]
    SuccessesExceedTrials { successes: u64, trials: u64 },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("couldn't parse config {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
