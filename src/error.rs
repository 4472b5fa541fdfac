use thiserror::Error;

use crate::model::entity::{GraderId, GroupId};
use crate::result::DistributionResult;

/// Caller errors that stop a run before any group is placed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DistributionError {
    #[error("grading pool is empty but {groups} groups need a grader")]
    EmptyPool { groups: usize },
    #[error("duplicate grader id: {0}")]
    DuplicateGrader(GraderId),
    #[error("duplicate group id: {0}")]
    DuplicateGroup(GroupId),
    #[error("group has no members: {0}")]
    EmptyGroup(GroupId),
    #[error("grader adjustments are out of range for load planning")]
    AdjustmentOverflow,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("grader is not in the grading pool: {0}")]
    UnknownGrader(GraderId),
    #[error("group is not on the roster: {0}")]
    UnknownGroup(GroupId),
    #[error("group is not waiting for manual assignment: {0}")]
    NotAProblemGroup(GroupId),
    #[error("grader {grader} has a blacklisted member in group {group}")]
    Conflict { grader: GraderId, group: GroupId },
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("{count} groups are unassigned and the partial distribution was not acknowledged")]
    UnacknowledgedProblems { count: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("commit rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid roster: {0}")]
    Roster(#[from] DistributionError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Carries the computed result so the commit can be retried without a new run.
    #[error("commit failed: {source}")]
    Commit {
        source: CommitError,
        result: Box<DistributionResult>,
    },
}
