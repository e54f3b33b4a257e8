use crate::domain::ordinals::{check_dense, plan_insert, plan_move, plan_remove, MovePlan, Shift};
use crate::errors::domain::{DomainError, InfraErrorKind, ValidationKind};

#[test]
fn insert_into_empty_rotation_lands_at_one() {
    let plan = plan_insert(0, 1).unwrap();
    assert_eq!(plan.ordinal, 1);
    assert_eq!(plan.shift, None);
}

#[test]
fn insert_past_end_is_clamped_to_append() {
    let plan = plan_insert(3, 99).unwrap();
    assert_eq!(plan.ordinal, 4);
    assert_eq!(plan.shift, None);
}

#[test]
fn insert_in_middle_shifts_tail_up() {
    let plan = plan_insert(4, 2).unwrap();
    assert_eq!(plan.ordinal, 2);
    assert_eq!(
        plan.shift,
        Some(Shift {
            from: 2,
            to: 4,
            delta: 1
        })
    );
}

#[test]
fn insert_below_one_is_rejected() {
    for requested in [0, -1, i32::MIN] {
        let err = plan_insert(3, requested).unwrap_err();
        assert!(
            matches!(err, DomainError::Validation(ValidationKind::InvalidOrdinal, _)),
            "{requested} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn remove_last_needs_no_shift() {
    assert_eq!(plan_remove(3, 3), None);
    assert_eq!(plan_remove(1, 1), None);
}

#[test]
fn remove_first_shifts_rest_down() {
    assert_eq!(
        plan_remove(3, 1),
        Some(Shift {
            from: 2,
            to: 3,
            delta: -1
        })
    );
}

#[test]
fn move_to_front_shifts_block_up() {
    // 3 maps, move the last one to the front
    let plan = plan_move(3, 3, 1).unwrap();
    assert_eq!(
        plan,
        MovePlan::Move {
            from: 3,
            to: 1,
            shift: Shift {
                from: 1,
                to: 2,
                delta: 1
            }
        }
    );
}

#[test]
fn move_back_shifts_block_down() {
    let plan = plan_move(5, 2, 4).unwrap();
    assert_eq!(
        plan,
        MovePlan::Move {
            from: 2,
            to: 4,
            shift: Shift {
                from: 3,
                to: 4,
                delta: -1
            }
        }
    );
}

#[test]
fn move_is_clamped_to_last_position() {
    let plan = plan_move(3, 1, 10).unwrap();
    assert_eq!(plan.target(), 3);
}

#[test]
fn move_to_same_position_is_noop() {
    assert_eq!(
        plan_move(3, 2, 2).unwrap(),
        MovePlan::Unchanged { ordinal: 2 }
    );
    // Clamping can also land on the current position
    assert_eq!(
        plan_move(3, 3, 7).unwrap(),
        MovePlan::Unchanged { ordinal: 3 }
    );
}

#[test]
fn move_below_one_is_rejected() {
    let err = plan_move(3, 2, 0).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidOrdinal, _)
    ));
}

#[test]
fn shift_applies_only_inside_range() {
    let shift = Shift {
        from: 2,
        to: 3,
        delta: 1,
    };
    assert_eq!(shift.apply(1), 1);
    assert_eq!(shift.apply(2), 3);
    assert_eq!(shift.apply(3), 4);
    assert_eq!(shift.apply(4), 4);
    assert_eq!(shift.len(), 2);
    assert!(!shift.is_empty());
}

#[test]
fn dense_check_accepts_any_permutation() {
    assert!(check_dense(&[]).is_ok());
    assert!(check_dense(&[3, 1, 2]).is_ok());
}

#[test]
fn dense_check_rejects_gaps_and_duplicates() {
    for bad in [&[1, 3][..], &[1, 1, 2][..], &[0, 1][..], &[2][..]] {
        let err = check_dense(bad).unwrap_err();
        assert!(
            matches!(err, DomainError::Infra(InfraErrorKind::InvariantViolation, _)),
            "{bad:?} should fail, got {err:?}"
        );
    }
}
