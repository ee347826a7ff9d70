//! Random key sequences keep the session and the screen consistent.

use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use flightdeck_core::{AirportDirectory, BookingSession, DirectoryStatus, Screen};
use flightdeck_tui::app::AppState;
use flightdeck_tui::{handle_key, ui};

#[derive(Debug, Clone)]
enum Step {
    Key(KeyCode),
    Ticks(u8),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => prop_oneof![
            Just(KeyCode::Enter),
            Just(KeyCode::Esc),
            Just(KeyCode::Tab),
            Just(KeyCode::BackTab),
            Just(KeyCode::Backspace),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Char('j')),
            Just(KeyCode::Char('k')),
            Just(KeyCode::Char('h')),
            Just(KeyCode::Char('l')),
            Just(KeyCode::Char('s')),
            Just(KeyCode::Char('f')),
            Just(KeyCode::Char('e')),
            Just(KeyCode::Char('?')),
            Just(KeyCode::Char('d')),
            Just(KeyCode::Char('1')),
            Just(KeyCode::Char('-')),
        ]
        .prop_map(Step::Key),
        1 => (1u8..=60).prop_map(Step::Ticks),
    ]
}

fn app() -> AppState {
    let (tx, _rx) = mpsc::channel();
    let (_tx2, rx2) = mpsc::channel();
    AppState::new(
        BookingSession::default(),
        AirportDirectory::bundled(),
        DirectoryStatus::Bundled,
        tx,
        rx2,
    )
}

proptest! {
    #[test]
    fn overlay_tracks_running_search(steps in prop::collection::vec(step_strategy(), 0..80)) {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut reached_results = false;

        for step in steps {
            match step {
                Step::Key(code) => handle_key(&mut app, KeyEvent::new(code, KeyModifiers::NONE)),
                Step::Ticks(n) => {
                    for _ in 0..n {
                        app.session.tick();
                    }
                }
            }

            prop_assert_eq!(app.session.overlay(), app.session.is_searching());
            if !matches!(app.session.screen(), Screen::SearchForm) {
                reached_results = true;
            }
            if reached_results {
                prop_assert!(!matches!(app.session.screen(), Screen::SearchForm));
            }
            prop_assert!(app.running);

            terminal.draw(|f| ui::draw(f, &app)).unwrap();
        }
    }
}
