//! Caller-side workflow around a distribution run.
//!
//! Confirm replacing any existing distribution, run the engine, let a
//! reviewer look at the report, and commit only when the reviewer accepts.

use tracing::{debug, info, warn};

use crate::commit::{Acceptance, DistributionCommitter};
use crate::engine::DistributionEngine;
use crate::error::SessionError;
use crate::model::roster::Roster;
use crate::result::{DistributionReport, DistributionResult};
use crate::shuffle::Shuffler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Discard,
}

/// The confirmation step between computing and committing a distribution.
pub trait Reviewer {
    fn confirm_overwrite(&mut self) -> bool;

    fn review(&mut self, report: &DistributionReport) -> Decision;
}

/// Decides without asking: complete results are accepted, partial ones
/// only when `accept_partial` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoReviewer {
    pub accept_partial: bool,
    pub overwrite: bool,
}

impl Reviewer for AutoReviewer {
    fn confirm_overwrite(&mut self) -> bool {
        self.overwrite
    }

    fn review(&mut self, report: &DistributionReport) -> Decision {
        if !report.has_problems() || self.accept_partial {
            Decision::Accept
        } else {
            Decision::Discard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed(DistributionResult),
    Discarded(DistributionResult),
    /// An existing distribution was kept; the engine never ran.
    Kept,
}

pub struct DistributionSession<S: Shuffler, C: DistributionCommitter, R: Reviewer> {
    engine: DistributionEngine<S>,
    committer: C,
    reviewer: R,
}

impl<S: Shuffler, C: DistributionCommitter, R: Reviewer> DistributionSession<S, C, R> {
    pub fn new(engine: DistributionEngine<S>, committer: C, reviewer: R) -> Self {
        DistributionSession { engine, committer, reviewer }
    }

    pub fn committer(&self) -> &C {
        &self.committer
    }

    pub fn committer_mut(&mut self) -> &mut C {
        &mut self.committer
    }

    pub fn into_committer(self) -> C {
        self.committer
    }

    pub fn run(&mut self, roster: &Roster) -> Result<Outcome, SessionError> {
        if self.committer.has_distribution() && !self.reviewer.confirm_overwrite() {
            info!("existing distribution kept");
            return Ok(Outcome::Kept);
        }

        let pool = roster.pool().len();
        info!(graders = pool, groups = roster.groups.len(), "distributing groups");
        let result = self.engine.run(roster)?;

        for problem in &result.problem_groups {
            debug!(group = %problem.group, reason = %problem.reason, "group left unassigned");
        }
        if !result.is_complete() {
            warn!(
                problems = result.problem_groups.len(),
                assigned = result.total_assigned(),
                "some groups could not be placed without a blacklist conflict"
            );
        }

        let report = result.report();
        match self.reviewer.review(&report) {
            Decision::Accept => {
                let acceptance = if result.is_complete() {
                    Acceptance::Complete
                } else {
                    Acceptance::Partial
                };
                self.commit(result, acceptance)
            }
            Decision::Discard => {
                info!("distribution discarded");
                Ok(Outcome::Discarded(result))
            }
        }
    }

    /// Commits an already computed result.
    ///
    /// Also the retry path after a failed commit: the failed result travels
    /// back inside [`SessionError::Commit`].
    pub fn commit(&mut self, result: DistributionResult, acceptance: Acceptance) -> Result<Outcome, SessionError> {
        match self.committer.commit(&result, acceptance) {
            Ok(()) => {
                info!(
                    assigned = result.total_assigned(),
                    problems = result.problem_groups.len(),
                    "distribution committed"
                );
                Ok(Outcome::Committed(result))
            }
            Err(source) => {
                warn!(error = %source, "commit failed");
                Err(SessionError::Commit { source, result: Box::new(result) })
            }
        }
    }
}
