//! Monte Carlo simulation of the 100 prisoners problem.
//!
//! Each trial shuffles the boxes implicitly and tracks the cycles of the
//! permutation with a [`DisjointSet`]; the prisoners all succeed when no cycle
//! is longer than the number of boxes each may open.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod report;
pub mod rng;
pub mod split;
pub mod stats;
pub mod trial;
pub mod union_find;

pub use aggregate::run_trials;
pub use config::Config;
pub use error::{Error, Result};
pub use exec::{run_worker, Batch, Mode, Simulation, Tally};
pub use report::Report;
pub use rng::Seed;
pub use split::{RemainderPolicy, WorkSplit};
pub use stats::{exact_probability, Stats};
pub use trial::{run_trial, run_trial_with, Outcome, TrialParams};
pub use union_find::DisjointSet;
