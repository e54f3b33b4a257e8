//! Quorum evaluation.
//!
//! No vote phase is stored. Each cast re-tallies its scope and the phase is
//! derived from the count alone, so lowering a threshold only takes effect
//! on the next cast.

/// Where a vote scope stands after a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VotePhase {
    Accumulating { tally: u64, threshold: u32 },
    ThresholdCrossed { tally: u64, threshold: u32 },
}

impl VotePhase {
    pub fn crossed(&self) -> bool {
        matches!(self, VotePhase::ThresholdCrossed { .. })
    }
}

pub fn evaluate(tally: u64, threshold: u32) -> VotePhase {
    if tally >= u64::from(threshold) {
        VotePhase::ThresholdCrossed { tally, threshold }
    } else {
        VotePhase::Accumulating { tally, threshold }
    }
}

/// Smallest positive threshold among the queues sharing a rotation, falling
/// back to `default` when none of them sets one.
pub fn effective_threshold<I>(queue_thresholds: I, default: u32) -> u32
where
    I: IntoIterator<Item = Option<i32>>,
{
    queue_thresholds
        .into_iter()
        .flatten()
        .filter(|t| *t > 0)
        .map(|t| t as u32)
        .min()
        .unwrap_or(default)
}

/// Threshold a new queue starts with: two thirds of its size, rounded, and
/// never below one.
pub fn default_queue_threshold(size: i32) -> i32 {
    ((2 * size.max(0) + 1) / 3).max(1)
}
