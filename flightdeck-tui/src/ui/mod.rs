//! Top-level UI layout: one screen at a time plus a status bar.

pub mod details;
pub mod overlays;
pub mod results;
pub mod search_form;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

use flightdeck_core::Screen;

use crate::app::{AppState, Overlay};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    f.render_widget(Block::default().style(theme::background()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    match app.session.screen() {
        Screen::SearchForm => search_form::render(f, main_area, app),
        Screen::Results => results::render(f, main_area, app),
        Screen::Details(_) => details::render(f, main_area, app),
    }

    status_bar::render(f, status_area, app);

    // The search overlay sits above everything else.
    if app.session.overlay() {
        overlays::render_progress(f, main_area, app);
        return;
    }

    match &app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::AirportPicker(picker) => overlays::render_airport_picker(f, main_area, app, picker),
        Overlay::DateEntry(entry) => overlays::render_date_entry(f, main_area, entry),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
