//! Property: any sequence of membership commands leaves the rotation with
//! dense ordinals and exactly one flagged row (none when empty).

include!("../../common/proptest_prelude.rs");

use proptest::prelude::*;
use rotation_core::commands;
use rotation_core::AppError;

use crate::support::factory::{seed_map, RotationFixture};
use crate::support::test_state::build_test_state;

#[derive(Debug, Clone)]
enum Op {
    Add { map: usize, ordinal: i32 },
    Remove { map: usize },
    Move { map: usize, ordinal: i32 },
    Advance,
}

const POOL: usize = 5;

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL, 1..8i32).prop_map(|(map, ordinal)| Op::Add { map, ordinal }),
        2 => (0..POOL).prop_map(|map| Op::Remove { map }),
        2 => (0..POOL, 1..8i32).prop_map(|(map, ordinal)| Op::Move { map, ordinal }),
        1 => Just(Op::Advance),
    ]
}

async fn run_ops(ops: Vec<Op>) -> Result<(), AppError> {
    let state = build_test_state().await?;
    let rotation = commands::create_rotation(
        &state,
        &rotation_test_support::unique_helpers::unique_str("props"),
        false,
    )
    .await?;
    let mut maps = Vec::with_capacity(POOL);
    for _ in 0..POOL {
        maps.push(seed_map(&state).await?);
    }
    let fx = RotationFixture { rotation, maps };

    for op in ops {
        // Rejections (duplicate member, non-member) are expected; the
        // rotation must be consistent either way.
        let _ = match op {
            Op::Add { map, ordinal } => {
                commands::add_map_to_rotation(&state, fx.name(), fx.map(map), ordinal)
                    .await
                    .map(|_| ())
            }
            Op::Remove { map } => commands::remove_map_from_rotation(&state, fx.name(), fx.map(map))
                .await
                .map(|_| ()),
            Op::Move { map, ordinal } => {
                commands::set_map_ordinal(&state, fx.name(), fx.map(map), ordinal)
                    .await
                    .map(|_| ())
            }
            Op::Advance => commands::advance_rotation(&state, fx.name()).await.map(|_| ()),
        };

        let entries = commands::list_rotation_maps(&state, fx.name()).await?;
        let ordinals: Vec<i32> = entries.iter().map(|e| e.ordinal).collect();
        let expected: Vec<i32> = (1..=entries.len() as i32).collect();
        assert_eq!(ordinals, expected, "ordinals not dense after {op:?}");

        let flagged = entries.iter().filter(|e| e.is_next).count();
        let want = usize::from(!entries.is_empty());
        assert_eq!(flagged, want, "flag count wrong after {op:?}");
    }
    Ok(())
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn prop_commands_keep_rotation_consistent(ops in prop::collection::vec(op(), 1..20)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        rt.block_on(run_ops(ops)).expect("setup or listing failed");
    }
}
