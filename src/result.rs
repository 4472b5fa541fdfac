use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::conflict::conflicts;
use crate::error::ResolveError;
use crate::model::entity::{GraderId, GroupId};
use crate::model::roster::Roster;

/// Why a group was left for manual assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemReason {
    NoConflictFreeGrader,
    NoRemainingCapacity,
}

impl fmt::Display for ProblemReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemReason::NoConflictFreeGrader => f.write_str("no grader without a blacklist conflict"),
            ProblemReason::NoRemainingCapacity => f.write_str("no grader with remaining capacity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemGroup {
    pub group: GroupId,
    pub reason: ProblemReason,
}

/// Outcome of one distribution run.
///
/// Every grader of the pool is a key of `assignments`, even with nothing
/// assigned. A group is either in exactly one grader's list or in
/// `problem_groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub assignments: BTreeMap<GraderId, Vec<GroupId>>,
    pub problem_groups: Vec<ProblemGroup>,
}

impl DistributionResult {
    pub fn graders(&self) -> impl Iterator<Item = &GraderId> {
        self.assignments.keys()
    }

    pub fn assigned_to(&self, grader: &str) -> Option<&[GroupId]> {
        self.assignments.get(grader).map(Vec::as_slice)
    }

    pub fn assigned_count(&self, grader: &str) -> usize {
        self.assignments.get(grader).map_or(0, Vec::len)
    }

    pub fn total_assigned(&self) -> usize {
        self.assignments.values().map(Vec::len).sum()
    }

    pub fn group_count(&self) -> usize {
        self.total_assigned() + self.problem_groups.len()
    }

    pub fn is_complete(&self) -> bool {
        self.problem_groups.is_empty()
    }

    pub fn grader_of(&self, group: &str) -> Option<&GraderId> {
        self.assignments
            .iter()
            .find(|(_, groups)| groups.iter().any(|g| g == group))
            .map(|(grader, _)| grader)
    }

    pub fn report(&self) -> DistributionReport {
        let graders = self
            .assignments
            .iter()
            .map(|(grader, groups)| GraderLine {
                grader: grader.clone(),
                count: groups.len(),
                groups: groups.clone(),
            })
            .collect();
        let problems = self
            .problem_groups
            .iter()
            .map(|problem| ProblemLine {
                group: problem.group.clone(),
                reason: problem.reason.to_string(),
            })
            .collect();
        DistributionReport { graders, problems }
    }

    /// Hands a problem group to a grader chosen by hand.
    ///
    /// The grader must be in this result's pool and must not blacklist any
    /// member of the group.
    pub fn resolve_manually(&mut self, group: &str, grader: &str, roster: &Roster) -> Result<(), ResolveError> {
        if !self.assignments.contains_key(grader) {
            return Err(ResolveError::UnknownGrader(grader.to_string()));
        }
        let position = self
            .problem_groups
            .iter()
            .position(|problem| problem.group == group)
            .ok_or_else(|| ResolveError::NotAProblemGroup(group.to_string()))?;
        let grader_entry = roster
            .grader(grader)
            .ok_or_else(|| ResolveError::UnknownGrader(grader.to_string()))?;
        let group_entry = roster
            .group(group)
            .ok_or_else(|| ResolveError::UnknownGroup(group.to_string()))?;
        if conflicts(grader_entry, group_entry) {
            return Err(ResolveError::Conflict {
                grader: grader.to_string(),
                group: group.to_string(),
            });
        }

        let problem = self.problem_groups.remove(position);
        self.assignments
            .entry(grader.to_string())
            .or_default()
            .push(problem.group);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraderLine {
    pub grader: GraderId,
    pub count: usize,
    pub groups: Vec<GroupId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemLine {
    pub group: GroupId,
    pub reason: String,
}

/// Human-facing summary of a result, shown before the caller accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionReport {
    pub graders: Vec<GraderLine>,
    pub problems: Vec<ProblemLine>,
}

impl DistributionReport {
    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.graders {
            writeln!(f, "{}: {} [{}]", line.grader, line.count, line.groups.iter().join(", "))?;
        }
        if self.has_problems() {
            writeln!(f, "{} groups need manual assignment:", self.problems.len())?;
            for line in &self.problems {
                writeln!(f, "  {}: {}", line.group, line.reason)?;
            }
        }
        Ok(())
    }
}
