use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// What to do with the trials left over when the request doesn't divide
/// evenly among the workers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainderPolicy {
    /// every worker runs `trials / workers`; the rest are dropped
    #[default]
    Truncate,
    /// the first `trials % workers` workers run one extra trial
    Spread,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkSplit {
    pub requested: u64,
    /// trials per worker slot
    pub shares: Vec<u64>,
}

impl WorkSplit {
    pub fn new(requested: u64, workers: usize, policy: RemainderPolicy) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidParams(
                "need at least one worker".to_string(),
            ));
        }
        let per_worker = requested / workers as u64;
        let remainder = (requested % workers as u64) as usize;
        let shares = (0..workers)
            .map(|slot| match policy {
                RemainderPolicy::Spread if slot < remainder => per_worker + 1,
                _ => per_worker,
            })
            .collect();
        Ok(WorkSplit { requested, shares })
    }

    pub fn workers(&self) -> usize {
        self.shares.len()
    }

    /// Trials that will actually run.
    pub fn total(&self) -> u64 {
        self.shares.iter().sum()
    }

    pub fn dropped(&self) -> u64 {
        self.requested - self.total()
    }
}
