//! Integration tests for the countdown state machine.

use datewidget_core::timer::DEFAULT_DURATION_MS;
use datewidget_core::{CountdownTimer, Event, TimerState};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Tick,
    Reset,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        // Ticks dominate real sessions.
        6 => Just(Op::Tick),
        1 => Just(Op::Reset),
    ]
}

fn apply(timer: &mut CountdownTimer, op: Op) -> Option<Event> {
    match op {
        Op::Start => timer.start(),
        Op::Pause => timer.pause(),
        Op::Tick => timer.tick(),
        Op::Reset => timer.reset(),
    }
}

proptest! {
    #[test]
    fn remaining_stays_in_bounds(ops in prop::collection::vec(op(), 0..600)) {
        let mut timer = CountdownTimer::new();
        for op in ops {
            let before = timer.remaining_ms();
            let was_running = timer.is_running();
            apply(&mut timer, op);
            prop_assert!(timer.remaining_ms() <= DEFAULT_DURATION_MS);
            // Time only drains while running.
            if timer.remaining_ms() < before {
                prop_assert!(was_running);
            }
            if timer.remaining_ms() == 0 {
                prop_assert!(!timer.is_running());
            }
        }
    }

    #[test]
    fn pause_is_idempotent(ops in prop::collection::vec(op(), 0..300)) {
        let mut timer = CountdownTimer::new();
        for op in ops {
            apply(&mut timer, op);
        }
        timer.pause();
        let (state, remaining) = (timer.state(), timer.remaining_ms());
        prop_assert!(timer.pause().is_none());
        prop_assert_eq!(timer.state(), state);
        prop_assert_eq!(timer.remaining_ms(), remaining);
    }

    #[test]
    fn reset_is_deterministic(ops in prop::collection::vec(op(), 0..600)) {
        let mut timer = CountdownTimer::new();
        for op in ops {
            apply(&mut timer, op);
        }
        prop_assert!(timer.reset().is_some());
        prop_assert_eq!(timer.remaining_ms(), DEFAULT_DURATION_MS);
        prop_assert_eq!(timer.state(), TimerState::Idle);
    }
}

#[test]
fn thirty_ticks_reach_four_minutes() {
    let mut timer = CountdownTimer::new();
    timer.start();
    for _ in 0..30 {
        timer.tick();
    }
    assert_eq!(timer.remaining_ms(), 240_000);
    assert_eq!(timer.display(), "4:00");
}

#[test]
fn full_run_expires() {
    let mut timer = CountdownTimer::new();
    timer.start();
    let expirations = (0..270)
        .filter_map(|_| timer.tick())
        .filter(|e| matches!(e, Event::TimerExpired { .. }))
        .count();
    assert_eq!(expirations, 1);
    assert_eq!(timer.state(), TimerState::Expired);
    assert_eq!(timer.display(), "0:00");
}

#[test]
fn pause_mid_run_then_resume_continues() {
    let mut timer = CountdownTimer::new();
    timer.start();
    for _ in 0..100 {
        timer.tick();
    }
    timer.pause();
    timer.start();
    for _ in 0..170 {
        timer.tick();
    }
    assert_eq!(timer.state(), TimerState::Expired);
}

#[test]
fn events_serialize_with_type_tag() {
    let mut timer = CountdownTimer::new();
    let event = timer.start().unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "TimerStarted");
    assert_eq!(json["remaining_ms"], 270_000);
}
