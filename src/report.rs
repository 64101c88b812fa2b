use std::fmt;

use crate::error::Result;
use crate::exec::Tally;
use crate::stats::{exact_probability, Stats};
use crate::trial::TrialParams;

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub label: String,
    pub stats: Stats,
    /// trials asked for, which exceeds `stats.trials` when the split dropped some
    pub requested: u64,
    /// closed-form probability, when one is known for the parameters
    pub exact: Option<f64>,
}

impl Report {
    pub fn new<S: Into<String>>(label: S, successes: u64, trials: u64) -> Result<Self> {
        Ok(Report {
            label: label.into(),
            stats: Stats::compute(successes, trials)?,
            requested: trials,
            exact: None,
        })
    }

    pub fn from_tally(tally: &Tally, params: TrialParams) -> Result<Self> {
        let mut report = Report::new(tally.mode.label(), tally.successes(), tally.trials())?;
        report.requested = tally.requested;
        report.exact = exact_probability(params);
        Ok(report)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f)?;
        writeln!(f, "Statistics of {}:", self.label)?;
        writeln!(f, "Number of simulations: {}", stats.trials)?;
        if self.requested > stats.trials {
            writeln!(
                f,
                "Requested simulations: {} ({} dropped)",
                self.requested,
                self.requested - stats.trials
            )?;
        }
        writeln!(f, "Parameter Estimate = {:.6}", stats.mean)?;
        writeln!(f, "Variance is {:.6}", stats.variance)?;
        write!(f, "95% CI: {{{:.6}, {:.6}}}", stats.ci95.0, stats.ci95.1)?;
        if let Some(exact) = self.exact {
            let verdict = if stats.ci_contains(exact) {
                "inside"
            } else {
                "outside"
            };
            write!(f, "\nExact value = {:.6} ({} the 95% CI)", exact, verdict)?;
        }
        Ok(())
    }
}
