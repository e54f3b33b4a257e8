//! Domain services. Each runs inside the caller's transaction.

pub mod catalog;
pub mod ledger;
pub mod pointer;
pub mod resolver;
pub mod sequencer;
pub mod waitlist;

pub use catalog::CatalogService;
pub use ledger::{RetractedVotes, VoteLedger};
pub use pointer::RotationPointer;
pub use resolver::{GameMapChange, VoteOutcome, VotePassed, VoteResolver};
pub use sequencer::OrdinalSequencer;
pub use waitlist::WaitlistService;
