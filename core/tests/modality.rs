use kotobako_core::{
    ContainerId, Exercise, ExerciseAction, ExerciseDef, ExerciseEvent, ExerciseKind, TokenDef,
    TokenId, ZoneDef, ZoneId,
};

fn linkers_def() -> ExerciseDef {
    ExerciseDef {
        kind: ExerciseKind::Categorize,
        prompt: "Sort the linkers".to_string(),
        tokens: vec![
            TokenDef {
                label: "because".to_string(),
                tag: Some("cause".to_string()),
            },
            TokenDef {
                label: "however".to_string(),
                tag: Some("contrast".to_string()),
            },
        ],
        zones: vec![
            ZoneDef {
                label: "Cause".to_string(),
                accepted_tag: Some("cause".to_string()),
            },
            ZoneDef {
                label: "Contrast".to_string(),
                accepted_tag: Some("contrast".to_string()),
            },
        ],
        expected: None,
    }
}

fn build_exercise() -> Exercise {
    Exercise::from_def(linkers_def()).expect("valid content")
}

fn token_id(exercise: &Exercise, label: &str) -> TokenId {
    exercise
        .tokens()
        .iter()
        .find(|token| token.label == label)
        .map(|token| token.id)
        .expect("token present")
}

#[test]
fn drag_and_tap_paths_converge_on_identical_state() {
    let script: &[(&str, ContainerId)] = &[
        ("because", ContainerId::Zone(ZoneId(0))),
        ("however", ContainerId::Zone(ZoneId(1))),
        ("because", ContainerId::Zone(ZoneId(1))),
        ("because", ContainerId::Pool),
    ];

    let mut via_drag = build_exercise();
    for &(label, destination) in script {
        let token = token_id(&via_drag, label);
        via_drag.apply(ExerciseAction::BeginDrag { token });
        via_drag.apply(ExerciseAction::DragHover {
            container: Some(destination),
        });
        let event = via_drag.apply(ExerciseAction::Drop {
            container: destination,
        });
        assert!(matches!(event, ExerciseEvent::Placed { .. }));
    }

    let mut via_tap = build_exercise();
    for &(label, destination) in script {
        let token = token_id(&via_tap, label);
        via_tap.apply(ExerciseAction::TapToken { token });
        let event = via_tap.apply(ExerciseAction::TapContainer {
            container: destination,
        });
        assert!(matches!(event, ExerciseEvent::Placed { .. }));
    }

    assert_eq!(via_drag.store(), via_tap.store());
    assert_eq!(via_drag.grade(), via_tap.grade());
    let drag_snapshot = via_drag.snapshot();
    let tap_snapshot = via_tap.snapshot();
    assert_eq!(drag_snapshot.pool, tap_snapshot.pool);
    assert_eq!(drag_snapshot.zones, tap_snapshot.zones);
}

#[test]
fn tapping_armed_token_again_disarms_without_moving() {
    let mut exercise = build_exercise();
    let token = token_id(&exercise, "because");
    assert_eq!(
        exercise.apply(ExerciseAction::TapToken { token }),
        ExerciseEvent::Armed(token)
    );
    assert_eq!(
        exercise.apply(ExerciseAction::TapToken { token }),
        ExerciseEvent::Disarmed
    );
    assert_eq!(exercise.armed(), None);
    assert_eq!(
        exercise.store().container_of(token),
        Ok(ContainerId::Pool)
    );
}

#[test]
fn arming_second_token_replaces_first() {
    let mut exercise = build_exercise();
    let because = token_id(&exercise, "because");
    let however = token_id(&exercise, "however");
    exercise.apply(ExerciseAction::TapToken { token: because });
    assert_eq!(
        exercise.apply(ExerciseAction::TapToken { token: however }),
        ExerciseEvent::Armed(however)
    );
    assert_eq!(exercise.armed(), Some(however));
}

#[test]
fn failed_commit_still_clears_selection() {
    let mut exercise = build_exercise();
    let token = token_id(&exercise, "because");
    exercise.apply(ExerciseAction::TapToken { token });
    let missing = ContainerId::Zone(ZoneId(9));
    let event = exercise.apply(ExerciseAction::TapContainer { container: missing });
    assert!(matches!(event, ExerciseEvent::Rejected(_)));
    assert_eq!(exercise.armed(), None);
    assert_eq!(exercise.store().container_of(token), Ok(ContainerId::Pool));
}

#[test]
fn tapping_destination_with_nothing_armed_hints() {
    let mut exercise = build_exercise();
    let event = exercise.apply(ExerciseAction::TapContainer {
        container: ContainerId::Zone(ZoneId(0)),
    });
    assert_eq!(event, ExerciseEvent::SelectFirstHint);
    assert_eq!(exercise.store().placed_count(), 0);
}

#[test]
fn hover_never_mutates_placements() {
    let mut exercise = build_exercise();
    let token = token_id(&exercise, "because");
    let before = exercise.store().clone();
    exercise.apply(ExerciseAction::BeginDrag { token });
    exercise.apply(ExerciseAction::DragHover {
        container: Some(ContainerId::Zone(ZoneId(0))),
    });
    exercise.apply(ExerciseAction::DragHover {
        container: Some(ContainerId::Zone(ZoneId(1))),
    });
    exercise.apply(ExerciseAction::DragHover { container: None });
    assert_eq!(exercise.store(), &before);
    exercise.apply(ExerciseAction::CancelDrag);
    assert_eq!(exercise.store(), &before);
}

#[test]
fn begin_drag_drops_stale_selection() {
    let mut exercise = build_exercise();
    let because = token_id(&exercise, "because");
    let however = token_id(&exercise, "however");
    exercise.apply(ExerciseAction::TapToken { token: because });
    exercise.apply(ExerciseAction::BeginDrag { token: however });
    assert_eq!(exercise.armed(), None);
    assert_eq!(exercise.dragging(), Some(however));
}

#[test]
fn reset_mints_fresh_token_ids() {
    let mut exercise = build_exercise();
    let old_ids: Vec<TokenId> = exercise.tokens().iter().map(|token| token.id).collect();
    let token = token_id(&exercise, "because");
    exercise.apply(ExerciseAction::TapToken { token });
    exercise.apply(ExerciseAction::TapContainer {
        container: ContainerId::Zone(ZoneId(0)),
    });
    assert_eq!(exercise.apply(ExerciseAction::Reset), ExerciseEvent::WasReset);
    assert_eq!(exercise.armed(), None);
    assert_eq!(exercise.store().placed_count(), 0);
    for token in exercise.tokens() {
        assert!(
            !old_ids.contains(&token.id),
            "reset reused id {:?}",
            token.id
        );
    }
    // A stale id from before the reset is rejected, not silently accepted.
    let event = exercise.apply(ExerciseAction::TapToken { token: old_ids[0] });
    assert!(matches!(event, ExerciseEvent::Rejected(_)));
}

#[test]
fn stray_drop_without_drag_is_inert() {
    let mut exercise = build_exercise();
    let before = exercise.store().clone();
    let event = exercise.apply(ExerciseAction::Drop {
        container: ContainerId::Zone(ZoneId(0)),
    });
    assert_eq!(event, ExerciseEvent::Nothing);
    assert_eq!(exercise.store(), &before);
}
