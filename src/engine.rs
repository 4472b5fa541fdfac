//! Two-phase distribution of groups over the grading pool.
//!
//! Groups that conflict with anyone in the pool are placed first, one at a
//! time, each against a fresh random order of graders. The remaining groups
//! are then dealt out by capacity, and the floor-division leftovers go one
//! per grader whose target is not negative.

use std::collections::VecDeque;

use crate::conflict::{ConflictIndex, Index};
use crate::error::DistributionError;
use crate::model::entity::{Grader, Group};
use crate::model::roster::Roster;
use crate::planner::{compute_targets, Capacity};
use crate::result::{DistributionResult, ProblemGroup, ProblemReason};
use crate::shuffle::{RandomShuffler, Shuffler};

struct State {
    targets: Vec<Capacity>,
    remaining: Vec<Capacity>,
    assigned: Vec<Vec<Index>>,
    problems: Vec<(Index, ProblemReason)>,
}

impl State {
    fn new(targets: Vec<Capacity>) -> State {
        let assigned = vec![Vec::new(); targets.len()];
        State { remaining: targets.clone(), targets, assigned, problems: Vec::new() }
    }

    /// Graders that may take a leftover group: those not planned below zero,
    /// or the whole pool if every target is negative.
    fn overflow_pool(&self) -> Vec<Index> {
        let eligible: Vec<Index> = (0..self.targets.len()).filter(|&g| self.targets[g] >= 0).collect();
        if eligible.is_empty() {
            (0..self.targets.len()).collect()
        } else {
            eligible
        }
    }

    fn has_capacity(&self, grader: Index) -> bool {
        self.remaining[grader] > 0
    }

    fn assign(&mut self, group: Index, grader: Index) {
        self.remaining[grader] -= 1;
        self.assigned[grader].push(group);
    }

    fn assign_overflow(&mut self, group: Index, grader: Index) {
        self.assigned[grader].push(group);
    }

    fn into_result(self, pool: &[&Grader], groups: &[Group]) -> DistributionResult {
        let assignments = pool
            .iter()
            .zip(self.assigned)
            .map(|(grader, assigned)| {
                let ids = assigned.into_iter().map(|g| groups[g].id.clone()).collect();
                (grader.id.clone(), ids)
            })
            .collect();
        let problem_groups = self
            .problems
            .into_iter()
            .map(|(g, reason)| ProblemGroup { group: groups[g].id.clone(), reason })
            .collect();
        DistributionResult { assignments, problem_groups }
    }
}

pub struct DistributionEngine<S: Shuffler> {
    shuffler: S,
}

impl DistributionEngine<RandomShuffler> {
    pub fn seeded(seed: u64) -> Self {
        DistributionEngine::new(RandomShuffler::seeded(seed))
    }

    pub fn from_entropy() -> Self {
        DistributionEngine::new(RandomShuffler::from_entropy())
    }
}

impl<S: Shuffler> DistributionEngine<S> {
    pub fn new(shuffler: S) -> Self {
        DistributionEngine { shuffler }
    }

    /// Assigns every group of `roster` to a participating grader or reports
    /// it as a problem group.
    ///
    /// # Errors
    ///
    /// Fails without placing anything when the roster is malformed or when
    /// groups exist but no grader participates.
    pub fn run(&mut self, roster: &Roster) -> Result<DistributionResult, DistributionError> {
        roster.validate()?;
        let pool = roster.pool();
        let groups = &roster.groups;
        if pool.is_empty() && groups.is_empty() {
            return Ok(DistributionResult::default());
        }

        let targets = compute_targets(groups.len(), &pool)?;
        let index = ConflictIndex::build(&pool, groups);
        let planned = pool
            .iter()
            .map(|grader| targets.get(&grader.id).unwrap_or_default())
            .collect();
        let mut state = State::new(planned);

        let mut order: Vec<Index> = (0..groups.len()).collect();
        self.shuffler.shuffle(&mut order);
        let (constrained, unconstrained): (Vec<Index>, Vec<Index>) =
            order.into_iter().partition(|&group| index.is_constrained(group));

        self.place_constrained(&constrained, &index, &mut state);
        self.fill_unconstrained(unconstrained, &mut state);

        Ok(state.into_result(&pool, groups))
    }

    fn shuffled_pool(&mut self, size: usize) -> Vec<Index> {
        let mut graders: Vec<Index> = (0..size).collect();
        self.shuffler.shuffle(&mut graders);
        graders
    }

    fn place_constrained(&mut self, constrained: &[Index], index: &ConflictIndex, state: &mut State) {
        for &group in constrained {
            let graders = self.shuffled_pool(index.pool_size());
            let eligible = graders
                .into_iter()
                .find(|&grader| !index.conflicts_with(group, grader) && state.has_capacity(grader));
            match eligible {
                Some(grader) => state.assign(group, grader),
                None => {
                    let reason = if index.conflicts_with_all(group) {
                        ProblemReason::NoConflictFreeGrader
                    } else {
                        ProblemReason::NoRemainingCapacity
                    };
                    state.problems.push((group, reason));
                }
            }
        }
    }

    fn fill_unconstrained(&mut self, unconstrained: Vec<Index>, state: &mut State) {
        let mut queue: VecDeque<Index> = unconstrained.into();
        let graders = self.shuffled_pool(state.remaining.len());

        for &grader in &graders {
            while state.has_capacity(grader) {
                let Some(group) = queue.pop_front() else { break };
                state.assign(group, grader);
            }
        }

        // Rounding leftovers: one per grader not planned below zero.
        let mut graders = state.overflow_pool();
        while !queue.is_empty() {
            self.shuffler.shuffle(&mut graders);
            for &grader in &graders {
                let Some(group) = queue.pop_front() else { break };
                state.assign_overflow(group, grader);
            }
        }
    }
}
