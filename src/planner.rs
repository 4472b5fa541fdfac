//! Per-grader load targets.
//!
//! The average is taken over the group count with every adjustment backed
//! out, then each grader's own adjustment is added back on top. Targets are
//! returned unclamped; a non-positive target simply means no capacity.

use std::borrow::Borrow;
use std::collections::HashMap;

use itertools::Itertools;

use crate::error::DistributionError;
use crate::model::entity::{Grader, GraderId};

pub type Capacity = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    average: Capacity,
    targets: HashMap<GraderId, Capacity>,
}

impl Targets {
    pub fn get(&self, grader: &str) -> Option<Capacity> {
        self.targets.get(grader).copied()
    }

    pub fn average(&self) -> Capacity {
        self.average
    }

    /// Sum of the raw targets, negative ones included. Saturates.
    pub fn total(&self) -> Capacity {
        self.targets.values().fold(0, |sum, target| sum.saturating_add(*target))
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GraderId, Capacity)> {
        self.targets.iter().map(|(id, target)| (id, *target))
    }
}

pub fn compute_targets<G: Borrow<Grader>>(
    group_count: usize,
    graders: &[G],
) -> Result<Targets, DistributionError> {
    if graders.is_empty() {
        return Err(DistributionError::EmptyPool { groups: group_count });
    }
    if let Some(id) = graders.iter().map(|g| &g.borrow().id).duplicates().next() {
        return Err(DistributionError::DuplicateGrader(id.clone()));
    }

    let overflow = || DistributionError::AdjustmentOverflow;
    let adjustments = graders
        .iter()
        .try_fold(0 as Capacity, |sum, g| sum.checked_add(g.borrow().adjustment))
        .ok_or_else(overflow)?;
    let adjusted_total = Capacity::try_from(group_count)
        .ok()
        .and_then(|total| total.checked_sub(adjustments))
        .ok_or_else(overflow)?;
    let average = adjusted_total.div_euclid(graders.len() as Capacity);

    let targets = graders
        .iter()
        .map(|g| {
            let grader = g.borrow();
            let target = average.checked_add(grader.adjustment).ok_or_else(overflow)?;
            Ok((grader.id.clone(), target))
        })
        .collect::<Result<_, DistributionError>>()?;
    Ok(Targets { average, targets })
}
