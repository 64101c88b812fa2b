//! Problem parameters from an optional TOML file, overridden by flags.
//!
//! ```toml
//! prisoners = 100
//! cycle_bound = 50
//! seed = 42
//! remainder = "spread"
//! ```
//!
//! Missing keys fall back to the classic setup: 100 prisoners, half the boxes
//! each, OS-seeded streams, remainder trials dropped.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exec::Batch;
use crate::rng::Seed;
use crate::split::RemainderPolicy;
use crate::trial::{TrialParams, DEFAULT_PRISONERS};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub prisoners: Option<usize>,
    pub cycle_bound: Option<usize>,
    pub seed: Option<u64>,
    pub remainder: Option<RemainderPolicy>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Keys set in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            prisoners: overrides.prisoners.or(self.prisoners),
            cycle_bound: overrides.cycle_bound.or(self.cycle_bound),
            seed: overrides.seed.or(self.seed),
            remainder: overrides.remainder.or(self.remainder),
        }
    }

    pub fn batch(&self) -> Result<Batch> {
        let prisoners = self.prisoners.unwrap_or(DEFAULT_PRISONERS);
        let params = match self.cycle_bound {
            Some(cycle_bound) => TrialParams::new(prisoners, cycle_bound)?,
            None => TrialParams::classic(prisoners)?,
        };
        Ok(Batch {
            params,
            seed: Seed::from_option(self.seed),
            remainder: self.remainder.unwrap_or_default(),
        })
    }
}
