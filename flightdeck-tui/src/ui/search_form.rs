//! Search form screen: the "Flight Booking" card.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use flightdeck_core::DirectoryStatus;

use crate::app::{AppState, FormField};
use crate::theme;

const CARD_WIDTH: u16 = 84;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let width = area.width.min(CARD_WIDTH);
    let card = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(" Flight Booking ")
        .title_style(theme::accent_bold());
    let inner = block.inner(card);
    f.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tab strip
            Constraint::Length(1),
            Constraint::Length(3), // airports
            Constraint::Length(3), // dates
            Constraint::Length(1),
            Constraint::Length(1), // button
            Constraint::Length(1),
            Constraint::Min(0), // notes
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(" Flights ", theme::highlight())),
        rows[0],
    );

    render_pair(f, rows[2], app, FormField::Origin, FormField::Destination);
    render_pair(f, rows[3], app, FormField::Departure, FormField::Return);

    let focused = app.form_focus == FormField::Submit;
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("  {}  ", FormField::Submit.label()),
            theme::button(focused),
        ))
        .alignment(Alignment::Center),
        rows[5],
    );

    f.render_widget(
        Paragraph::new(notes(app)).wrap(Wrap { trim: true }),
        rows[7],
    );
}

fn render_pair(f: &mut Frame, area: Rect, app: &AppState, left: FormField, right: FormField) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_field(f, cols[0], app, left, app.form_focus == left);
    render_field(f, cols[1], app, right, app.form_focus == right);
}

/// A labelled input box showing the field's value or its placeholder.
pub fn render_field(f: &mut Frame, area: Rect, app: &AppState, field: FormField, focused: bool) {
    let value = app.field_value(field);
    let filled = value.is_some();
    let text = value.unwrap_or_else(|| field.placeholder().to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", field.label()))
        .title_style(if focused { theme::accent_bold() } else { theme::muted() });

    let para = Paragraph::new(Span::styled(format!(" {text}"), theme::input(focused, filled)))
        .block(block);
    f.render_widget(para, area);
}

/// Advisory criteria issues and directory health, below the button.
fn notes(app: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let DirectoryStatus::Degraded { reason } = &app.directory_status {
        lines.push(Line::from(Span::styled(
            format!("Airport list unavailable: {reason}"),
            theme::negative(),
        )));
    }
    if app.directory_refreshing {
        lines.push(Line::from(Span::styled("Refreshing airports...", theme::muted())));
    }

    let issues = app.criteria_issues();
    let filled = app.session.criteria.origin.is_some()
        || app.session.criteria.destination.is_some()
        || app.session.criteria.departure.is_some();
    if filled {
        for issue in issues {
            lines.push(Line::from(Span::styled(format!("! {issue}"), theme::warning())));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] edit field  [Tab] next  [s] search  [?] help",
        theme::muted(),
    )));
    lines
}
