//! Integration tests for the choreography engine
//!
//! Tests the full path: input events → engine → auto-advance → progress,
//! on a manual clock so timing is deterministic.

use pretty_assertions::assert_eq;

use choreo::core::{ChoreographyEngine, ManualClock};
use choreo::types::{InputEvent, NormPoint, Phase, PillarRegistry, ReasonCode};
use choreo::{COMMIT_DURATION_MS, DIVE_DURATION_MS};

fn test_engine() -> (ChoreographyEngine, ManualClock) {
    let clock = ManualClock::new();
    let mut registry = PillarRegistry::new();
    registry.insert("execution", "#e8491d");
    registry.insert("design", "#1d7fe8");
    let engine = ChoreographyEngine::with_clock(registry, Box::new(clock.clone()));
    (engine, clock)
}

/// Scenario: commit from Idle runs the whole choreography
#[test]
fn test_full_commit_sequence() {
    let (mut engine, clock) = test_engine();

    let output = engine.apply(InputEvent::commit("execution", NormPoint::new(0.0, 0.0)));
    assert_eq!(output.phase, Phase::Commit);
    assert_eq!(output.selected_id.as_deref(), Some("execution"));

    // After 140 ms the machine dives, progress starting at zero
    clock.advance(COMMIT_DURATION_MS);
    engine.tick();
    assert_eq!(engine.phase(), Phase::Dive);
    assert_eq!(engine.dive_progress(), 0.0);

    // Progress reaches 1.0 exactly at +780 ms from dive start
    clock.advance(DIVE_DURATION_MS / 2);
    engine.tick();
    assert!((engine.dive_progress() - 0.5).abs() < 1e-9);

    clock.advance(DIVE_DURATION_MS / 2);
    engine.tick();
    assert_eq!(engine.dive_progress(), 1.0);
    assert_eq!(engine.phase(), Phase::Hold);
}

/// Scenario: hover a, hover b, unhover ends Idle with no hover
#[test]
fn test_hover_sequence_ends_idle() {
    let (mut engine, _) = test_engine();

    engine.apply(InputEvent::hover("a"));
    engine.apply(InputEvent::hover("b"));
    let output = engine.apply(InputEvent::unhover());

    assert_eq!(output.phase, Phase::Idle);
    assert_eq!(output.hovered_id, None);
}

/// Scenario: double commit with the same id is rejected silently
#[test]
fn test_double_commit_same_id_rejected() {
    let (mut engine, _) = test_engine();

    engine.apply(InputEvent::commit("execution", NormPoint::default()));
    let before = engine.state().clone();

    let output = engine.apply(InputEvent::commit("execution", NormPoint::default()));
    assert_eq!(output.reason, ReasonCode::R103_COMMIT_REJECTED_DUPLICATE);
    assert_eq!(engine.state(), &before);
}

/// Stale-timer immunity: reset before the 140 ms deadline, then let
/// the deadline pass. Phase must still be Idle.
#[test]
fn test_reset_defeats_pending_auto_advance() {
    let (mut engine, clock) = test_engine();

    engine.apply(InputEvent::commit("execution", NormPoint::default()));
    engine.apply(InputEvent::Reset);

    clock.advance(COMMIT_DURATION_MS * 10);
    let outputs = engine.tick();

    assert_eq!(engine.phase(), Phase::Idle);
    assert!(outputs
        .iter()
        .all(|o| o.reason == ReasonCode::R104_TIMER_STALE_DROPPED));
    assert!(engine.state().invariants_hold());
}

/// Fast reset/re-commit cycle: the fresh sequence advances, the stale
/// timer from the first commit does not corrupt it
#[test]
fn test_reset_recommit_cycle_is_clean() {
    let (mut engine, clock) = test_engine();

    engine.apply(InputEvent::commit("execution", NormPoint::default()));
    clock.advance(50);
    engine.tick();
    engine.apply(InputEvent::Reset);
    engine.apply(InputEvent::commit("design", NormPoint::new(0.7, 0.1)));

    clock.advance(COMMIT_DURATION_MS);
    engine.tick();

    assert_eq!(engine.phase(), Phase::Dive);
    assert_eq!(engine.state().selected_id.as_deref(), Some("design"));
    assert_eq!(
        engine.state().rupture_origin,
        Some(NormPoint::new(0.7, 0.1))
    );
    assert!(engine.state().invariants_hold());
}

/// Hover events during the committed phases never move the hover off
/// the committed pillar
#[test]
fn test_hover_pinned_through_whole_sequence() {
    let (mut engine, clock) = test_engine();
    engine.apply(InputEvent::commit("execution", NormPoint::default()));

    for _ in 0..3 {
        clock.advance(400);
        engine.tick();
        engine.apply(InputEvent::hover("design"));
        engine.apply(InputEvent::unhover());
        assert_eq!(engine.state().hovered_id.as_deref(), Some("execution"));
        assert!(engine.state().invariants_hold());
    }
    assert_eq!(engine.phase(), Phase::Hold);
}

/// Every operation from every phase yields a valid state (totality)
#[test]
fn test_operations_total_over_reachable_phases() {
    let ops: Vec<Box<dyn Fn() -> InputEvent>> = vec![
        Box::new(|| InputEvent::hover("execution")),
        Box::new(InputEvent::unhover),
        Box::new(|| InputEvent::commit("design", NormPoint::new(1.0, -1.0))),
        Box::new(|| InputEvent::Reset),
    ];

    // Drive into each reachable phase, then hit it with every operation
    for target in [
        Phase::Idle,
        Phase::Hover,
        Phase::Commit,
        Phase::Dive,
        Phase::Hold,
    ] {
        for op in &ops {
            let (mut engine, clock) = test_engine();
            match target {
                Phase::Idle => {}
                Phase::Hover => {
                    engine.apply(InputEvent::hover("execution"));
                }
                Phase::Commit => {
                    engine.apply(InputEvent::commit("execution", NormPoint::default()));
                }
                Phase::Dive => {
                    engine.apply(InputEvent::commit("execution", NormPoint::default()));
                    clock.advance(COMMIT_DURATION_MS);
                    engine.tick();
                }
                Phase::Hold => {
                    engine.apply(InputEvent::commit("execution", NormPoint::default()));
                    clock.advance(COMMIT_DURATION_MS);
                    engine.tick();
                    clock.advance(DIVE_DURATION_MS);
                    engine.tick();
                }
            }
            assert_eq!(engine.phase(), target);

            engine.apply(op());
            assert!(
                engine.state().invariants_hold(),
                "invariants broken applying op in {:?}",
                target
            );
        }
    }
}

/// Progress accessors are monotone and clamp at exactly 1.0
#[test]
fn test_progress_monotone_and_clamped() {
    let (mut engine, clock) = test_engine();
    engine.apply(InputEvent::commit("execution", NormPoint::default()));
    clock.advance(COMMIT_DURATION_MS);
    engine.tick();

    let mut last_dive = 0.0;
    let mut last_hold = 0.0;
    for _ in 0..50 {
        clock.advance(33);
        engine.tick();
        let dive = engine.dive_progress();
        let hold = engine.hold_progress();
        assert!(dive >= last_dive && dive <= 1.0);
        assert!(hold >= last_hold && hold <= 1.0);
        last_dive = dive;
        last_hold = hold;
    }
    assert_eq!(last_dive, 1.0);
    assert_eq!(last_hold, 1.0);
}

/// Input events survive the JSON wire format used by the API
#[test]
fn test_event_wire_format() {
    let commit = InputEvent::commit("execution", NormPoint::new(0.1, -0.2));
    let json = serde_json::to_string(&commit).unwrap();
    let back: InputEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, commit);

    let hover: InputEvent =
        serde_json::from_str(r#"{"type":"hover","id":"design"}"#).unwrap();
    assert_eq!(hover, InputEvent::hover("design"));
}
