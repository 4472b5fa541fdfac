use std::borrow::Borrow;
use std::collections::HashSet;

use itertools::Itertools;

use crate::model::entity::{Grader, Group};

pub type Index = usize;

/// True when any member of `group` is on `grader`'s blacklist.
pub fn conflicts(grader: &Grader, group: &Group) -> bool {
    group.members.iter().any(|member| grader.blacklist.contains(member))
}

/// True when `group` conflicts with at least one grader in `pool`.
pub fn is_constrained<G: Borrow<Grader>>(group: &Group, pool: &[G]) -> bool {
    pool.iter().any(|grader| conflicts(grader.borrow(), group))
}

/// Conflicts between every group and every pool grader, computed once per run.
///
/// Groups and graders are addressed by their position in the slices the
/// index was built from.
#[derive(Debug, Clone)]
pub struct ConflictIndex {
    pool_size: usize,
    conflicts: Vec<HashSet<Index>>,
}

impl ConflictIndex {
    pub fn build<G: Borrow<Grader>>(pool: &[G], groups: &[Group]) -> ConflictIndex {
        let by_group: Vec<HashSet<Index>> = groups
            .iter()
            .map(|group| {
                pool.iter()
                    .enumerate()
                    .filter(|&(_, grader)| conflicts(grader.borrow(), group))
                    .map(|(grader_index, _)| grader_index)
                    .collect()
            })
            .collect();
        ConflictIndex { pool_size: pool.len(), conflicts: by_group }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn group_count(&self) -> usize {
        self.conflicts.len()
    }

    pub fn conflicts_with(&self, group: Index, grader: Index) -> bool {
        self.conflicts
            .get(group)
            .map_or(false, |graders| graders.contains(&grader))
    }

    pub fn is_constrained(&self, group: Index) -> bool {
        self.conflicts.get(group).map_or(false, |graders| !graders.is_empty())
    }

    /// Every grader in the pool blacklists someone in the group.
    pub fn conflicts_with_all(&self, group: Index) -> bool {
        self.conflicts
            .get(group)
            .map_or(false, |graders| graders.len() == self.pool_size)
    }

    pub fn conflicting_graders(&self, group: Index) -> Vec<Index> {
        self.conflicts
            .get(group)
            .map(|graders| graders.iter().copied().sorted().collect())
            .unwrap_or_default()
    }
}
