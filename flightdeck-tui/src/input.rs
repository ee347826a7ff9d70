//! Keyboard input dispatch: search overlay, then popups, global keys, screen handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use flightdeck_core::criteria::parse_date;
use flightdeck_core::Screen;

use crate::app::{AppState, DateEntryState, ErrorCategory, FormField, Overlay, PickerState, ResultsFocus};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. A running search owns the keyboard; Esc cancels it.
    if app.session.overlay() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('x')) {
            app.cancel_search();
        }
        return;
    }

    // 2. Popups consume input next.
    match &app.overlay {
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::AirportPicker(_) => {
            handle_picker(app, key);
            return;
        }
        Overlay::DateEntry(_) => {
            handle_date_entry(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 3. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('r') => {
            if let Some(source) = app.refresh_source.clone() {
                app.request_directory(source);
            } else {
                app.set_warning("No airport URL configured");
            }
            return;
        }
        _ => {}
    }

    // 4. Screen-specific keys.
    match app.session.screen() {
        Screen::SearchForm => handle_form_key(app, key),
        Screen::Results => match app.results_focus {
            ResultsFocus::List => handle_results_key(app, key),
            ResultsFocus::Form => {
                if key.code == KeyCode::Esc {
                    app.results_focus = ResultsFocus::List;
                } else {
                    handle_form_key(app, key);
                }
            }
        },
        Screen::Details(_) => handle_details_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let field = app.form_focus;
    match key.code {
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
            app.form_focus = field.next();
        }
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
            app.form_focus = field.prev();
        }
        KeyCode::Enter => match field {
            FormField::Origin | FormField::Destination => open_picker(app, field),
            FormField::Departure | FormField::Return => open_date_entry(app, field),
            FormField::Submit => app.submit_search(),
        },
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('-') if field.is_date() => {
            app.shift_date(field, -1);
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('+') if field.is_date() => {
            app.shift_date(field, 1);
        }
        KeyCode::Delete | KeyCode::Backspace => app.clear_field(field),
        KeyCode::Char('s') => app.submit_search(),
        _ => {}
    }
}

fn open_picker(app: &mut AppState, target: FormField) {
    app.overlay = Overlay::AirportPicker(PickerState {
        target,
        query: String::new(),
        cursor: 0,
    });
}

fn open_date_entry(app: &mut AppState, target: FormField) {
    let input = app
        .date(target)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    app.overlay = Overlay::DateEntry(DateEntryState { target, input });
}

fn handle_picker(app: &mut AppState, key: KeyEvent) {
    let Overlay::AirportPicker(picker) = &mut app.overlay else {
        return;
    };
    let match_count = app.directory.search(&picker.query).len();

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Down => {
            if picker.cursor + 1 < match_count {
                picker.cursor += 1;
            }
        }
        KeyCode::Up => {
            picker.cursor = picker.cursor.saturating_sub(1);
        }
        KeyCode::Backspace => {
            picker.query.pop();
            picker.cursor = 0;
        }
        KeyCode::Char(c) => {
            picker.query.push(c);
            picker.cursor = 0;
        }
        KeyCode::Enter => {
            let target = picker.target;
            let chosen = app
                .directory
                .search(&picker.query)
                .get(picker.cursor)
                .map(|a| (a.code.clone(), a.city.clone()));
            match chosen {
                Some((code, city)) => {
                    debug!(field = ?target, %code, "airport chosen");
                    app.set_airport(target, Some(code.clone()));
                    app.overlay = Overlay::None;
                    app.form_focus = target.next();
                    app.set_status(format!("{}: {city} ({code})", target.label()));
                }
                None => app.set_warning("No airport to select"),
            }
        }
        _ => {}
    }
}

fn handle_date_entry(app: &mut AppState, key: KeyEvent) {
    let Overlay::DateEntry(entry) = &mut app.overlay else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Backspace => {
            entry.input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            if entry.input.len() < 10 {
                entry.input.push(c);
            }
        }
        KeyCode::Enter => {
            let target = entry.target;
            match parse_date(&entry.input) {
                Ok(date) => {
                    app.set_date(target, date);
                    app.overlay = Overlay::None;
                    app.form_focus = target.next();
                }
                Err(e) => {
                    let input = entry.input.clone();
                    app.push_error(
                        ErrorCategory::Input,
                        format!("Invalid date '{input}': {e} (use YYYY-MM-DD)"),
                        target.label().to_string(),
                    );
                }
            }
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    let count = app.session.results().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 && app.results_cursor + 1 < count {
                app.results_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.results_cursor = app.results_cursor.saturating_sub(1);
        }
        KeyCode::Enter => app.select_current(),
        KeyCode::Char('f') | KeyCode::Tab => {
            app.results_focus = ResultsFocus::Form;
            app.form_focus = FormField::Origin;
        }
        KeyCode::Char('s') => app.submit_search(),
        _ => {}
    }
}

fn handle_details_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.back(),
        KeyCode::Char('b') => app.set_warning("Booking is not available in this simulator"),
        _ => {}
    }
}
