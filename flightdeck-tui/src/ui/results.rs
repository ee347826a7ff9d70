//! Results screen: compact search strip on top, flight list below.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use flightdeck_core::Flight;
use flightdeck_core::flights::airline_badge;

use crate::app::{AppState, FormField, ResultsFocus};
use crate::theme;
use crate::ui::search_form::render_field;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_strip(f, chunks[0], app);
    render_list(f, chunks[1], app);
}

/// The search form squeezed into a single row so the user can re-search.
fn render_strip(f: &mut Frame, area: Rect, app: &AppState) {
    let editing = app.results_focus == ResultsFocus::Form;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(area);

    for (field, col) in FormField::ALL.iter().zip(cols.iter()) {
        let focused = editing && app.form_focus == *field;
        if *field == FormField::Submit {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme::panel_border(focused));
            f.render_widget(
                Paragraph::new(Span::styled(" Search ", theme::button(focused))).block(block),
                *col,
            );
        } else {
            render_field(f, *col, app, *field, focused);
        }
    }
}

fn render_list(f: &mut Frame, area: Rect, app: &AppState) {
    let results = app.session.results();
    let active = app.results_focus == ResultsFocus::List;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(format!(" {} ", app.session.screen().title()))
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let header = Line::from(vec![
        Span::styled(
            format!("Showing {} of {} results", results.len(), results.len()),
            theme::secondary(),
        ),
        Span::styled(
            format!("   {}", app.session.criteria.route()),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    if results.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No flights found.", theme::muted())),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, flight)| flight_item(flight, active && i == app.results_cursor))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.results_cursor.min(results.len() - 1)));
    // The state only drives scrolling; rows draw their own selection marker.
    f.render_stateful_widget(List::new(items), chunks[1], &mut state);
}

fn flight_item(flight: &Flight, selected: bool) -> ListItem<'static> {
    let marker = if selected { "> " } else { "  " };
    let select_style = if selected {
        theme::button(true)
    } else {
        theme::accent()
    };

    let top = Line::from(vec![
        Span::styled(marker, theme::accent_bold()),
        Span::styled(
            format!("[{}] ", airline_badge(&flight.airline)),
            theme::airline(&flight.airline),
        ),
        Span::styled(
            format!("{} - {}", flight.departure, flight.arrival),
            theme::title(),
        ),
        Span::styled(format!("   {}", flight.duration), theme::secondary()),
        Span::styled(format!("   {}", flight.stops), theme::muted()),
        Span::styled("   from ", theme::muted()),
        Span::styled(flight.price.clone(), theme::accent_bold()),
        Span::raw("  "),
        Span::styled("[Select]", select_style),
    ]);
    let bottom = Line::from(vec![
        Span::raw("       "),
        Span::styled(
            format!("{} • {}", flight.airline, flight.flight_number),
            theme::muted(),
        ),
    ]);

    ListItem::new(vec![top, bottom, Line::from("")])
}
