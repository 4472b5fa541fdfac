//! Persisting an accepted distribution.
//!
//! A commit records the whole distribution or nothing. Results with problem
//! groups are only recorded when the caller explicitly accepts a partial
//! distribution.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CommitError;
use crate::result::DistributionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Every group must be assigned.
    Complete,
    /// Problem groups are left for manual assignment.
    Partial,
}

impl Acceptance {
    pub fn check(self, result: &DistributionResult) -> Result<(), CommitError> {
        match self {
            Acceptance::Complete if !result.is_complete() => Err(CommitError::UnacknowledgedProblems {
                count: result.problem_groups.len(),
            }),
            _ => Ok(()),
        }
    }
}

pub trait DistributionCommitter {
    /// Whether a previously committed distribution would be replaced.
    fn has_distribution(&self) -> bool;

    fn commit(&mut self, result: &DistributionResult, acceptance: Acceptance) -> Result<(), CommitError>;
}

/// What a committer stores: the distribution and whether it was partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedDistribution {
    pub partial: bool,
    pub result: DistributionResult,
}

impl CommittedDistribution {
    fn new(result: &DistributionResult) -> CommittedDistribution {
        CommittedDistribution { partial: !result.is_complete(), result: result.clone() }
    }
}

#[derive(Debug, Default)]
pub struct MemoryCommitter {
    committed: Option<CommittedDistribution>,
    commits: usize,
    fail_next: Option<String>,
}

impl MemoryCommitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed(&self) -> Option<&CommittedDistribution> {
        self.committed.as_ref()
    }

    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Makes the next commit fail with `reason`, leaving stored state alone.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }
}

impl DistributionCommitter for MemoryCommitter {
    fn has_distribution(&self) -> bool {
        self.committed.is_some()
    }

    fn commit(&mut self, result: &DistributionResult, acceptance: Acceptance) -> Result<(), CommitError> {
        acceptance.check(result)?;
        if let Some(reason) = self.fail_next.take() {
            return Err(CommitError::Rejected(reason));
        }
        self.committed = Some(CommittedDistribution::new(result));
        self.commits += 1;
        Ok(())
    }
}

/// Stores the distribution as a JSON document.
///
/// The document is written next to the target and renamed over it, so
/// readers see either the old distribution or the new one.
#[derive(Debug, Clone)]
pub struct JsonFileCommitter {
    path: PathBuf,
}

impl JsonFileCommitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileCommitter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<CommittedDistribution>, CommitError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DistributionCommitter for JsonFileCommitter {
    fn has_distribution(&self) -> bool {
        self.path.exists()
    }

    fn commit(&mut self, result: &DistributionResult, acceptance: Acceptance) -> Result<(), CommitError> {
        acceptance.check(result)?;
        let contents = serde_json::to_string_pretty(&CommittedDistribution::new(result))?;
        let staging = self.staging_path();
        fs::write(&staging, contents)?;
        if let Err(err) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Ok(())
    }
}
