//! Reveal timing and stale timer tests.
//!
//! Default pacing: step 1200ms, show 550ms, pad 200ms, next round 1100ms.

use std::time::Duration;

use recall_engine::core::{EngineConfig, RoundPhase, Symbol, TimingConfig};
use recall_engine::engine::GameEngine;
use recall_engine::schedule::Tick;

fn run_until_awaiting(engine: &mut GameEngine) {
    while engine.phase() == RoundPhase::Showing {
        let next = engine.next_deadline().expect("a reveal always has pending timers");
        engine.advance_to(next);
    }
}

fn answer_round(engine: &mut GameEngine) {
    let sequence: Vec<Symbol> = engine.state().sequence.iter().copied().collect();
    for symbol in sequence {
        engine.submit_input(symbol);
    }
}

/// Engine in the Showing phase of a round with `len` symbols, clock at its start.
fn showing_round(seed: u64, len: usize) -> GameEngine {
    let mut engine = GameEngine::with_seed(seed);
    engine.start();
    while engine.sequence_len() < len {
        run_until_awaiting(&mut engine);
        answer_round(&mut engine);
        engine.advance(Duration::from_millis(1100));
    }
    assert_eq!(engine.phase(), RoundPhase::Showing);
    engine
}

// =============================================================================
// Reveal pacing
// =============================================================================

/// Test the exact first-round timeline.
#[test]
fn test_first_round_timeline() {
    let mut engine = GameEngine::with_seed(1);
    engine.start();
    let symbol = engine.state().sequence[0];

    engine.advance_to(Tick(1199));
    assert!(!engine.engine_display().is_lit());
    assert_eq!(engine.state().shown_count, 0);

    engine.advance_to(Tick(1200));
    assert_eq!(engine.engine_display().symbol, Some(symbol));
    assert_eq!(engine.state().shown_count, 1);

    engine.advance_to(Tick(1749));
    assert_eq!(engine.engine_display().symbol, Some(symbol));

    engine.advance_to(Tick(1750));
    assert!(!engine.engine_display().is_lit());
    assert_eq!(engine.phase(), RoundPhase::Showing);

    engine.advance_to(Tick(1949));
    assert_eq!(engine.phase(), RoundPhase::Showing);

    engine.advance_to(Tick(1950));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
}

/// Test that each round replays the entire sequence from the start.
#[test]
fn test_full_sequence_replayed_each_round() {
    let mut engine = showing_round(21, 3);
    let origin = engine.now();
    let sequence: Vec<Symbol> = engine.state().sequence.iter().copied().collect();

    for (i, symbol) in sequence.iter().enumerate() {
        let shown_at = origin.after((i as u64 + 1) * 1200);
        engine.advance_to(shown_at);
        assert_eq!(engine.engine_display().symbol, Some(*symbol), "index {}", i);
        assert_eq!(engine.state().shown_count, i + 1);

        engine.advance_to(shown_at.after(550));
        assert!(!engine.engine_display().is_lit());
    }

    engine.advance_to(origin.after(3 * 1200 + 550 + 199));
    assert_eq!(engine.phase(), RoundPhase::Showing);
    engine.advance_to(origin.after(3 * 1200 + 550 + 200));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
}

/// Test that a large jump fires everything in order and lands in Awaiting.
#[test]
fn test_single_large_advance() {
    let mut engine = showing_round(22, 4);
    engine.advance(Duration::from_secs(30));

    assert_eq!(engine.phase(), RoundPhase::Awaiting);
    assert_eq!(engine.state().shown_count, 4);
    assert!(!engine.engine_display().is_lit());
}

/// Test custom pacing.
#[test]
fn test_custom_timing() {
    let timing = TimingConfig {
        step_interval_ms: 100,
        show_duration_ms: 40,
        trailing_pad_ms: 10,
        input_hold_ms: 20,
        flash_hold_ms: 20,
        next_round_delay_ms: 50,
    };
    let mut engine = GameEngine::new(EngineConfig::new().with_seed(3).with_timing(timing)).unwrap();
    engine.start();

    engine.advance_to(Tick(149));
    assert_eq!(engine.phase(), RoundPhase::Showing);
    engine.advance_to(Tick(150));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);

    answer_round(&mut engine);
    engine.advance_to(Tick(200));
    assert_eq!(engine.sequence_len(), 2);
    assert_eq!(engine.phase(), RoundPhase::Showing);

    // 2 * 100 + 40 + 10 after the round began at 200
    engine.advance_to(Tick(449));
    assert_eq!(engine.phase(), RoundPhase::Showing);
    engine.advance_to(Tick(450));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
}

/// Test that frame-sized steps keep pace with real time.
#[test]
fn test_frame_deltas_do_not_drift() {
    let mut engine = GameEngine::with_seed(5);
    engine.start();

    // 120 frames at 60 Hz is 2000.04ms
    for _ in 0..120 {
        engine.advance(Duration::from_micros(16_667));
    }
    assert_eq!(engine.now(), Tick(2000));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
}

/// Test that steps shorter than a millisecond still move the clock.
#[test]
fn test_sub_millisecond_steps_accumulate() {
    let mut engine = GameEngine::with_seed(6);
    engine.start();

    for _ in 0..2000 {
        engine.advance(Duration::from_micros(999));
    }
    assert_eq!(engine.now(), Tick(1998));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
}

/// Test that the clock never moves backwards.
#[test]
fn test_advance_to_past_is_noop() {
    let mut engine = GameEngine::with_seed(4);
    engine.start();
    engine.advance_to(Tick(1500));
    let before = engine.snapshot();

    engine.advance_to(Tick(100));
    assert_eq!(engine.now(), Tick(1500));
    assert_eq!(engine.snapshot(), before);
}

// =============================================================================
// Stale timers
// =============================================================================

/// Test that restarting mid-reveal silences the old schedule.
#[test]
fn test_restart_mid_reveal_ignores_old_schedule() {
    let mut engine = showing_round(31, 3);
    let old_origin = engine.now();

    // First symbol of the old reveal is lit
    engine.advance_to(old_origin.after(1300));
    assert!(engine.engine_display().is_lit());

    engine.start();
    let new_origin = engine.now();
    let new_symbol = engine.state().sequence[0];
    assert_eq!(engine.sequence_len(), 1);

    // Old reveal of index 1 would fire at old_origin + 2400
    engine.advance_to(old_origin.after(2450));
    assert!(!engine.engine_display().is_lit());
    assert_eq!(engine.state().shown_count, 0);
    assert_eq!(engine.phase(), RoundPhase::Showing);

    // New reveal
    engine.advance_to(new_origin.after(1200));
    assert_eq!(engine.engine_display().symbol, Some(new_symbol));
    assert_eq!(engine.state().shown_count, 1);

    engine.advance_to(new_origin.after(1950));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);

    // Old reveal of index 2 and the old finish pass without effect
    engine.advance_to(old_origin.after(3 * 1200 + 550 + 200 + 1));
    assert_eq!(engine.phase(), RoundPhase::Awaiting);
    assert!(!engine.engine_display().is_lit());
    assert_eq!(engine.state().shown_count, 1);
    assert_eq!(engine.sequence_len(), 1);
    assert_eq!(engine.input_len(), 0);

    engine.submit_input(new_symbol);
    assert_eq!(engine.score(), 1);
}

/// Test that restarting during the post-success delay cancels the advance.
#[test]
fn test_restart_cancels_pending_round_advance() {
    let mut engine = GameEngine::with_seed(32);
    engine.start();
    run_until_awaiting(&mut engine);
    answer_round(&mut engine);

    // Advance is due 1100ms from now
    engine.advance(Duration::from_millis(500));
    engine.start();
    let sequence = engine.state().sequence.clone();

    engine.advance(Duration::from_millis(700));
    assert_eq!(engine.sequence_len(), 1);
    assert_eq!(engine.state().sequence, sequence);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.phase(), RoundPhase::Showing);
}

/// Test that restarting mid-reveal does not let the old finish flip the phase early.
#[test]
fn test_old_finish_does_not_end_new_reveal() {
    // Three-symbol reveal finishes at +4350; restart at +4000
    let mut engine = showing_round(33, 3);
    let old_origin = engine.now();
    engine.advance_to(old_origin.after(4000));
    engine.start();

    engine.advance_to(old_origin.after(4350));
    assert_eq!(engine.phase(), RoundPhase::Showing);
    assert_eq!(engine.sequence_len(), 1);
}
