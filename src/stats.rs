//! Estimates drawn from a success count.
//!
//! Each trial is a Bernoulli variable, so the sum of squares equals the
//! success count and the sample variance reduces to
//! `successes * (1 - mean) / (trials - 1)`.

use statrs::function::harmonic::harmonic;

use crate::error::{Error, Result};
use crate::trial::TrialParams;

/// z-score of a two-sided 95% interval under the normal approximation
pub const Z_95: f64 = 1.96;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    pub successes: u64,
    pub trials: u64,
    pub mean: f64,
    pub variance: f64,
    pub ci95: (f64, f64),
}

impl Stats {
    pub fn compute(successes: u64, trials: u64) -> Result<Self> {
        if trials <= 1 {
            return Err(Error::TooFewTrials { trials });
        }
        if successes > trials {
            return Err(Error::SuccessesExceedTrials { successes, trials });
        }

        let n = trials as f64;
        let sum = successes as f64;
        let mean = sum / n;
        let variance = sum * (1.0 - mean) / (n - 1.0);
        let half_width = Z_95 * (variance / n).sqrt();
        Ok(Stats {
            successes,
            trials,
            mean,
            variance,
            ci95: (mean - half_width, mean + half_width),
        })
    }

    pub fn ci_contains(&self, p: f64) -> bool {
        self.ci95.0 <= p && p <= self.ci95.1
    }
}

/// Closed-form success probability of the cycle-following strategy.
///
/// When `2 * bound >= n` at most one cycle can be longer than the bound, and
/// a cycle of length `k` appears with probability `1/k`, so the strategy fails
/// with probability `H(n) - H(bound)`. Returns `None` below that threshold.
pub fn exact_probability(params: TrialParams) -> Option<f64> {
    let n = params.prisoners;
    let bound = params.cycle_bound;
    // a lone prisoner never opens a second box
    if bound >= n || n == 1 {
        return Some(1.0);
    }
    if 2 * bound < n {
        return None;
    }
    Some(1.0 - (harmonic(n as u64) - harmonic(bound as u64)))
}
