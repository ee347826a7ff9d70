//! Property tests for the progress simulator and view-state machine.
//!
//! 1. Progress climbs by exactly one per tick and completes once per start
//! 2. Restarting mid-run never yields a second counter
//! 3. Overlay is raised exactly while a search is in flight
//! 4. Once Results is shown, SearchForm never comes back

use proptest::prelude::*;
use std::time::Duration;

use flightdeck_core::{
    BookingSession, FlightId, ProgressSimulator, Screen, Tick, ViewEvent, ViewMachine,
};

// ── Strategies ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Action {
    Submit,
    Tick(u8),
    Cancel,
    Select(u8),
    Back,
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Submit),
        (1u8..120).prop_map(Action::Tick),
        Just(Action::Cancel),
        (1u8..8).prop_map(Action::Select),
        Just(Action::Back),
    ]
}

fn arb_event() -> impl Strategy<Value = ViewEvent> {
    prop_oneof![
        Just(ViewEvent::Submit),
        Just(ViewEvent::SearchCompleted),
        Just(ViewEvent::Cancel),
        (1u8..7).prop_map(|i| ViewEvent::Select(FlightId::new(i.to_string()))),
        Just(ViewEvent::Back),
    ]
}

// ── 1. Monotonic counter ─────────────────────────────────────────────

proptest! {
    /// Every run starts at 0, moves by exactly 1 and completes once.
    #[test]
    fn counter_is_monotonic(extra_ticks in 0usize..50, interval_ms in 1u64..100) {
        let mut sim = ProgressSimulator::new(Duration::from_millis(interval_ms));
        sim.start();
        prop_assert_eq!(sim.progress(), 0);

        let mut last = 0u8;
        let mut completions = 0;
        for _ in 0..(100 + extra_ticks) {
            match sim.tick() {
                Tick::Advanced(p) => {
                    prop_assert_eq!(p, last + 1);
                    last = p;
                }
                Tick::Completed => {
                    prop_assert_eq!(last, 99);
                    last = 100;
                    completions += 1;
                }
                Tick::Idle => prop_assert_eq!(last, 100),
            }
        }
        prop_assert_eq!(completions, 1);
    }

    /// Arbitrary elapsed-time slices never skip the completion signal.
    #[test]
    fn advance_completes_once(slices in prop::collection::vec(0u64..500, 1..200)) {
        let mut sim = ProgressSimulator::new(Duration::from_millis(30));
        sim.start();
        let mut completions = 0;
        let mut last = 0u8;
        for ms in &slices {
            if sim.advance(Duration::from_millis(*ms)) == Tick::Completed {
                completions += 1;
            }
            prop_assert!(sim.progress() >= last);
            last = sim.progress();
        }
        let total: u64 = slices.iter().sum();
        prop_assert_eq!(completions, if total >= 3000 { 1 } else { 0 });
    }
}

// ── 2. Restart ───────────────────────────────────────────────────────

proptest! {
    /// Starting again mid-run resets the one counter.
    #[test]
    fn restart_has_single_counter(first_run in 0usize..99) {
        let mut sim = ProgressSimulator::default();
        sim.start();
        for _ in 0..first_run {
            sim.tick();
        }
        sim.start();

        let mut ticks = 0;
        while sim.tick() != Tick::Completed {
            ticks += 1;
            prop_assert!(ticks < 100);
        }
        prop_assert_eq!(ticks, 99);
    }
}

// ── 3 & 4. Session invariants ────────────────────────────────────────

proptest! {
    #[test]
    fn session_invariants_hold(actions in prop::collection::vec(arb_action(), 1..60)) {
        let mut session = BookingSession::default();
        let mut seen_results = false;

        for action in actions {
            match action {
                Action::Submit => { session.submit(); }
                Action::Tick(n) => {
                    for _ in 0..n {
                        session.tick();
                    }
                }
                Action::Cancel => { session.cancel_search(); }
                Action::Select(i) => { session.select(FlightId::new(i.to_string())); }
                Action::Back => { session.back(); }
            }

            prop_assert_eq!(session.overlay(), session.is_searching());
            if session.overlay() {
                prop_assert!(session.progress() < 100);
            }
            if matches!(session.screen(), Screen::Results | Screen::Details(_)) {
                seen_results = true;
            }
            if seen_results {
                prop_assert_ne!(session.screen(), &Screen::SearchForm);
            }
        }
    }

    /// Only Select enters Details and only Back leaves it for Results.
    #[test]
    fn machine_edges(events in prop::collection::vec(arb_event(), 1..80)) {
        let mut machine = ViewMachine::new();
        for event in events {
            let before = machine.state().clone();
            let changed = machine.dispatch(event.clone());
            let after = machine.state();

            if !changed {
                prop_assert_eq!(&before, after);
                continue;
            }
            match (&before.screen, &after.screen) {
                (Screen::SearchForm, Screen::Results) => {
                    prop_assert_eq!(&event, &ViewEvent::SearchCompleted);
                }
                (Screen::Results, Screen::Details(_)) => {
                    prop_assert!(matches!(event, ViewEvent::Select(_)));
                }
                (Screen::Details(_), Screen::Results) => {
                    prop_assert_eq!(&event, &ViewEvent::Back);
                }
                (Screen::Results | Screen::Details(_), Screen::SearchForm) => {
                    prop_assert!(false, "returned to the search form");
                }
                _ => {}
            }
        }
    }
}
