//! Details screen: outbound and inbound leg cards with the layover between.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use flightdeck_core::FlightLeg;
use flightdeck_core::flights::airline_badge;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(format!("← {}", app.session.screen().title()), theme::title()),
        Span::raw("    "),
        Span::styled(" [b] Book now ", theme::button(false)),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let Some(details) = app.session.details() else {
        f.render_widget(
            Paragraph::new(Span::styled("No flight selected.", theme::muted())),
            chunks[1],
        );
        return;
    };

    render_leg(f, chunks[1], "Outbound", &details.outbound);
    if let Some(layover) = &details.layover {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("  Layover: {}", layover.duration),
                theme::warning(),
            )),
            chunks[2],
        );
    }
    render_leg(f, chunks[3], "Return", &details.inbound);
}

fn render_leg(f: &mut Frame, area: Rect, title: &str, leg: &FlightLeg) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false))
        .title(format!(" {title} • {} ", leg.date))
        .title_style(theme::accent_bold());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Percentage(35),
        ])
        .split(inner);

    let (from_code, from_name) = leg.from_parts();
    let (to_code, to_name) = leg.to_parts();

    f.render_widget(
        Paragraph::new(endpoint(&leg.departure_time, from_code, from_name)),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("[{}] {}", airline_badge(&leg.airline), leg.airline),
                theme::airline(&leg.airline),
            )),
            Line::from(Span::styled(leg.flight_number.clone(), theme::secondary())),
            Line::from(Span::styled(leg.aircraft.clone(), theme::muted())),
            Line::from(Span::styled(format!("──── {} ────", leg.duration), theme::muted())),
        ])
        .alignment(Alignment::Center),
        cols[1],
    );
    f.render_widget(
        Paragraph::new(endpoint(&leg.arrival_time, to_code, to_name))
            .alignment(Alignment::Right),
        cols[2],
    );
}

fn endpoint(time: &str, code: &str, name: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(time.to_string(), theme::title())),
        Line::from(Span::styled(code.to_string(), theme::accent_bold())),
        Line::from(Span::styled(name.to_string(), theme::muted())),
    ]
}
