pub mod entity {
    use std::collections::HashSet;

    use serde::{Deserialize, Serialize};

    pub type GraderId = String;
    pub type GroupId = String;
    pub type StudentId = String;

    fn participating_default() -> bool {
        true
    }

    /// A TA eligible for grading work.
    ///
    /// `adjustment` shifts this grader's share above (positive) or below
    /// (negative) the pool average. Students in `blacklist` are never handed
    /// to this grader.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Grader {
        pub id: GraderId,
        #[serde(default)]
        pub adjustment: i64,
        #[serde(default)]
        pub blacklist: HashSet<StudentId>,
        #[serde(default = "participating_default")]
        pub participating: bool,
    }

    impl Grader {
        pub fn new(id: impl Into<GraderId>) -> Grader {
            Grader {
                id: id.into(),
                adjustment: 0,
                blacklist: HashSet::new(),
                participating: true,
            }
        }

        pub fn with_adjustment(mut self, adjustment: i64) -> Grader {
            self.adjustment = adjustment;
            self
        }

        pub fn with_blacklist<I, S>(mut self, students: I) -> Grader
        where
            I: IntoIterator<Item = S>,
            S: Into<StudentId>,
        {
            self.blacklist.extend(students.into_iter().map(Into::into));
            self
        }

        /// Keeps the grader on the roster but out of this round's pool.
        pub fn excluded(mut self) -> Grader {
            self.participating = false;
            self
        }
    }

    /// One gradable submission: a single student or a team.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Group {
        pub id: GroupId,
        pub members: HashSet<StudentId>,
    }

    impl Group {
        pub fn new<I, S>(id: impl Into<GroupId>, members: I) -> Group
        where
            I: IntoIterator<Item = S>,
            S: Into<StudentId>,
        {
            Group {
                id: id.into(),
                members: members.into_iter().map(Into::into).collect(),
            }
        }

        /// A single-student submission named after the student.
        pub fn individual(student: impl Into<StudentId>) -> Group {
            let student = student.into();
            Group::new(student.clone(), [student])
        }
    }
}


pub mod roster {
    use itertools::Itertools;
    use serde::{Deserialize, Serialize};

    use super::entity::{Grader, Group};
    use crate::error::DistributionError;

    /// Snapshot of graders and groups taken before a distribution run.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Roster {
        #[serde(default)]
        pub graders: Vec<Grader>,
        #[serde(default)]
        pub groups: Vec<Group>,
    }

    impl Roster {
        pub fn new(graders: Vec<Grader>, groups: Vec<Group>) -> Roster {
            Roster { graders, groups }
        }

        /// Participating graders, in roster order.
        pub fn pool(&self) -> Vec<&Grader> {
            self.graders.iter().filter(|grader| grader.participating).collect()
        }

        pub fn grader(&self, id: &str) -> Option<&Grader> {
            self.graders.iter().find(|grader| grader.id == id)
        }

        pub fn group(&self, id: &str) -> Option<&Group> {
            self.groups.iter().find(|group| group.id == id)
        }

        pub fn validate(&self) -> Result<(), DistributionError> {
            if let Some(id) = self.graders.iter().map(|grader| &grader.id).duplicates().next() {
                return Err(DistributionError::DuplicateGrader(id.clone()));
            }
            if let Some(id) = self.groups.iter().map(|group| &group.id).duplicates().next() {
                return Err(DistributionError::DuplicateGroup(id.clone()));
            }
            if let Some(group) = self.groups.iter().find(|group| group.members.is_empty()) {
                return Err(DistributionError::EmptyGroup(group.id.clone()));
            }
            Ok(())
        }
    }

}
