//! Bottom status bar: key hints for the current screen, then the last message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use flightdeck_core::Screen;

use crate::app::{AppState, ResultsFocus, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" {}", hints(app)), theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints(app: &AppState) -> &'static str {
    if app.session.overlay() {
        return "Esc:cancel search";
    }
    match app.session.screen() {
        Screen::SearchForm => "Tab:next Enter:edit s:search ?:help q:quit",
        Screen::Results if app.results_focus == ResultsFocus::Form => {
            "Tab:next Enter:edit s:search Esc:list"
        }
        Screen::Results => "j/k:move Enter:select f:edit search ?:help",
        Screen::Details(_) => "Esc:back b:book ?:help",
    }
}
