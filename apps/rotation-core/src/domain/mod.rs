//! Domain layer: pure rotation and vote logic, no I/O.

pub mod ordinals;
pub mod pointer;
pub mod tally;
pub mod votes;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_ordinals;

pub use ordinals::{check_dense, plan_insert, plan_move, plan_remove, InsertPlan, MovePlan, Shift};
pub use pointer::{check_pointer, successor_ordinal};
pub use tally::{default_queue_threshold, effective_threshold, evaluate, VotePhase};
pub use votes::{RetractScope, SkipScope, VoteKind, Voter, VoterGame};
