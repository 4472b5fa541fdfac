//! Distribution of submission groups among graders.
//!
//! Every group goes to exactly one grader whose blacklist shares no student
//! with it, with load balanced around the pool average plus each grader's
//! adjustment. Groups that cannot be placed are reported rather than
//! dropped, and the caller decides whether a partial distribution is
//! committed.
//!
//! ```
//! use grade_distribute::{DistributionEngine, Grader, Group, Roster};
//!
//! let roster = Roster::new(
//!     vec![Grader::new("ta1").with_blacklist(["alice"]), Grader::new("ta2")],
//!     vec![Group::individual("alice"), Group::new("team-b", ["bob", "carol"])],
//! );
//! let result = DistributionEngine::seeded(7).run(&roster).unwrap();
//!
//! assert_eq!(result.grader_of("alice").map(String::as_str), Some("ta2"));
//! assert!(result.is_complete());
//! ```

pub mod commit;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod planner;
pub mod result;
pub mod session;
pub mod shuffle;

pub use commit::{Acceptance, CommittedDistribution, DistributionCommitter, JsonFileCommitter, MemoryCommitter};
pub use config::DistributionConfig;
pub use conflict::{conflicts, is_constrained, ConflictIndex};
pub use engine::DistributionEngine;
pub use error::{CommitError, ConfigError, DistributionError, ResolveError, SessionError};
pub use model::entity::{Grader, GraderId, Group, GroupId, StudentId};
pub use model::roster::Roster;
pub use planner::{compute_targets, Targets};
pub use result::{DistributionReport, DistributionResult, ProblemGroup, ProblemReason};
pub use session::{AutoReviewer, Decision, DistributionSession, Outcome, Reviewer};
pub use shuffle::{IdentityShuffler, RandomShuffler, Shuffler};
