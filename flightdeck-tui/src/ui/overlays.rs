//! Overlay widgets: search progress, airport picker, date entry, help, error history.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use flightdeck_core::{DirectoryStatus, StageStatus};

use crate::app::{AppState, DateEntryState, PickerState};
use crate::theme;
use crate::ui::centered_rect;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Modal shown while a search runs.
pub fn render_progress(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(60, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Searching for flights... ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // gauge
            Constraint::Length(1),
            Constraint::Length(3), // stages
            Constraint::Min(0),
            Constraint::Length(1), // hint
        ])
        .split(inner);

    let progress = app.session.progress();
    let gauge = Gauge::default()
        .gauge_style(theme::accent())
        .percent(u16::from(progress))
        .label(format!("{progress}%"));
    f.render_widget(gauge, chunks[1]);

    let spinner = SPINNER[usize::from(progress) % SPINNER.len()];
    let lines: Vec<Line> = app
        .session
        .stages()
        .iter()
        .map(|(stage, status)| {
            let (marker, style) = match status {
                StageStatus::Complete => ("✓", theme::positive()),
                StageStatus::InProgress => (spinner, theme::active()),
                StageStatus::Pending => ("○", theme::muted()),
            };
            Line::from(vec![
                Span::styled(format!("  {marker} "), style),
                Span::styled(stage.label(), style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[3]);

    f.render_widget(
        Paragraph::new(Span::styled("  [Esc] cancel", theme::muted())),
        chunks[5],
    );
}

/// Airport picker: a filter box over the directory.
pub fn render_airport_picker(f: &mut Frame, area: Rect, app: &AppState, picker: &PickerState) {
    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} [Enter]choose [Esc]close ", picker.target.label()))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    if picker.query.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled("Search airport...", theme::muted()),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(picker.query.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]));
    }
    lines.push(Line::from(""));

    if app.directory.is_empty() {
        lines.push(Line::from(Span::styled(
            "No airports available.",
            theme::negative(),
        )));
        if let DirectoryStatus::Degraded { reason } = &app.directory_status {
            lines.push(Line::from(Span::styled(reason.as_str(), theme::muted())));
        }
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        return;
    }

    let matches = app.directory.search(&picker.query);
    if matches.is_empty() {
        lines.push(Line::from(Span::styled("No airport found.", theme::muted())));
        f.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let visible = (inner.height as usize).saturating_sub(2).max(1);
    let start = picker.cursor.saturating_sub(visible - 1);
    for (i, airport) in matches.iter().enumerate().skip(start).take(visible) {
        let selected = i == picker.cursor;
        let style = if selected {
            theme::highlight()
        } else {
            theme::text()
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", airport.code), theme::accent_bold()),
            Span::styled(format!("{} ", airport.city), style),
            Span::styled(format!("{}, {}", airport.name, airport.country), theme::muted()),
        ]));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

/// ISO date entry popup.
pub fn render_date_entry(f: &mut Frame, area: Rect, entry: &DateEntryState) {
    let popup = centered_rect(40, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} [Enter]set [Esc]cancel ", entry.target.label()))
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(Span::styled("Date (YYYY-MM-DD), empty to clear:", theme::muted())),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(entry.input.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];
    f.render_widget(Paragraph::new(text), inner);
}

/// Keyboard reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let section = |title: &'static str| Line::from(Span::styled(title, theme::accent_bold()));
    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<14}"), theme::accent()),
            Span::styled(what, theme::muted()),
        ])
    };

    let text = vec![
        section("Search form"),
        key("Tab / j / k", "move between fields"),
        key("Enter", "pick airport / type date / search"),
        key("h / l", "previous / next day"),
        key("Backspace", "clear field"),
        key("s", "search flights"),
        Line::from(""),
        section("Results"),
        key("j / k", "move"),
        key("Enter", "select flight"),
        key("f", "edit search"),
        Line::from(""),
        section("Details"),
        key("Esc", "back to results"),
        Line::from(""),
        section("Anywhere"),
        key("Esc", "cancel a running search"),
        key("r", "refresh airports"),
        key("e", "error history"),
        key("q", "quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::secondary())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(inner.height as usize)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
