//! Run configuration and roster files.
//!
//! ```
//! use grade_distribute::DistributionConfig;
//!
//! let config = DistributionConfig::from_toml_str(r#"
//!     seed = 42
//!     accept_partial = true
//! "#).unwrap();
//!
//! assert_eq!(config.seed, Some(42));
//! assert!(config.accept_partial);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::DistributionEngine;
use crate::error::ConfigError;
use crate::model::roster::Roster;
use crate::shuffle::RandomShuffler;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DistributionConfig {
    /// Random seed for reproducible distributions.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Commit results that still have problem groups.
    #[serde(default)]
    pub accept_partial: bool,

    /// Replace an existing distribution without asking.
    #[serde(default)]
    pub overwrite: bool,

    /// Where the accepted distribution is written.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl DistributionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_accept_partial(mut self, accept_partial: bool) -> Self {
        self.accept_partial = accept_partial;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn shuffler(&self) -> RandomShuffler {
        match self.seed {
            Some(seed) => RandomShuffler::seeded(seed),
            None => RandomShuffler::from_entropy(),
        }
    }

    pub fn engine(&self) -> DistributionEngine<RandomShuffler> {
        DistributionEngine::new(self.shuffler())
    }
}

impl Roster {
    /// Loads and validates a roster from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let roster: Roster = toml::from_str(s)?;
        roster.validate()?;
        Ok(roster)
    }
}
