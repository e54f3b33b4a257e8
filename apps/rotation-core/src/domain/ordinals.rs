//! Dense ordinal arithmetic for rotation membership.
//!
//! A rotation with `k` rows holds exactly the ordinals `1..=k`. Each mutation
//! is planned here as at most one contiguous [`Shift`] plus a final ordinal
//! for the row being inserted or moved; the storage layer executes the plan
//! without re-deriving any of it.

use crate::errors::domain::{DomainError, ValidationKind};

/// Move every ordinal in `from..=to` by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub from: i32,
    pub to: i32,
    pub delta: i32,
}

impl Shift {
    pub fn contains(&self, ordinal: i32) -> bool {
        (self.from..=self.to).contains(&ordinal)
    }

    pub fn apply(&self, ordinal: i32) -> i32 {
        if self.contains(ordinal) {
            ordinal + self.delta
        } else {
            ordinal
        }
    }

    pub fn len(&self) -> i32 {
        (self.to - self.from + 1).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where an inserted row lands and which siblings make room for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertPlan {
    pub ordinal: i32,
    pub shift: Option<Shift>,
}

/// How a move reorders the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePlan {
    /// Requested position equals the current one after clamping.
    Unchanged { ordinal: i32 },
    Move {
        from: i32,
        to: i32,
        shift: Shift,
    },
}

impl MovePlan {
    pub fn target(&self) -> i32 {
        match self {
            MovePlan::Unchanged { ordinal } => *ordinal,
            MovePlan::Move { to, .. } => *to,
        }
    }
}

fn reject_below_one(requested: i32) -> Result<(), DomainError> {
    if requested < 1 {
        return Err(DomainError::validation(
            ValidationKind::InvalidOrdinal,
            format!("Ordinal must be 1 or greater (got {requested})"),
        ));
    }
    Ok(())
}

/// Plan inserting a row at `requested` into a rotation of `count` rows.
///
/// Requests past the end are clamped to `count + 1`; anything below 1 is
/// rejected rather than clamped.
pub fn plan_insert(count: i32, requested: i32) -> Result<InsertPlan, DomainError> {
    reject_below_one(requested)?;
    let ordinal = requested.min(count + 1);
    let shift = (ordinal <= count).then_some(Shift {
        from: ordinal,
        to: count,
        delta: 1,
    });
    Ok(InsertPlan { ordinal, shift })
}

/// Plan closing the gap left by removing the row at `removed`.
pub fn plan_remove(count: i32, removed: i32) -> Option<Shift> {
    (removed < count).then_some(Shift {
        from: removed + 1,
        to: count,
        delta: -1,
    })
}

/// Plan moving the row at `current` to `requested` (clamped to `count`).
pub fn plan_move(count: i32, current: i32, requested: i32) -> Result<MovePlan, DomainError> {
    reject_below_one(requested)?;
    let target = requested.min(count.max(1));

    if target == current {
        return Ok(MovePlan::Unchanged { ordinal: current });
    }

    let shift = if target < current {
        Shift {
            from: target,
            to: current - 1,
            delta: 1,
        }
    } else {
        Shift {
            from: current + 1,
            to: target,
            delta: -1,
        }
    };

    Ok(MovePlan::Move {
        from: current,
        to: target,
        shift,
    })
}

/// Verify that `ordinals` is a permutation of `1..=len`.
pub fn check_dense(ordinals: &[i32]) -> Result<(), DomainError> {
    let mut sorted = ordinals.to_vec();
    sorted.sort_unstable();

    for (idx, ordinal) in sorted.iter().enumerate() {
        let expected = idx as i32 + 1;
        if *ordinal != expected {
            return Err(DomainError::invariant(format!(
                "Rotation ordinals are not dense: expected {expected}, found {ordinal} in {sorted:?}"
            )));
        }
    }
    Ok(())
}
