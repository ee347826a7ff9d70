//! End-to-end booking flow through `BookingSession`.
//!
//! Covers the four walkthroughs: search to results, degraded directory,
//! selecting a row, and returning from details.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use flightdeck_core::{
    AirportDirectory, AirportSource, BookingSession, DirectoryError, FlightId, Screen, Tick,
};
use flightdeck_core::flights::sample_details;

fn session_on_results() -> BookingSession {
    let mut session = BookingSession::default();
    session.submit();
    for _ in 0..100 {
        session.tick();
    }
    session
}

/// One-shot HTTP server answering a single request with `status` and `body`.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}/airports.json")
}

#[test]
fn search_runs_to_results() {
    let mut session = BookingSession::default();
    assert!(session.submit());
    assert_eq!(session.progress(), 0);

    let mut completions = 0;
    for _ in 0..100 {
        if session.tick() == Tick::Completed {
            completions += 1;
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(session.progress(), 100);
    assert_eq!(session.screen(), &Screen::Results);
    assert!(!session.overlay());
    assert_eq!(session.results().len(), 6);
}

#[test]
fn failed_fetch_leaves_empty_directory() {
    let url = serve_once("500 Internal Server Error", "{}");
    let (directory, status, err) = AirportDirectory::load(&AirportSource::Url(url));

    assert!(directory.is_empty());
    assert!(status.is_degraded());
    assert!(matches!(err, Some(DirectoryError::HttpStatus { status: 500, .. })));
    assert!(directory.lookup("JFK").is_none());
}

#[test]
fn unreachable_host_degrades() {
    // Bind then drop to get a port nobody is listening on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{port}/airports.json");
    let (directory, status, err) = AirportDirectory::load(&AirportSource::Url(url));

    assert!(directory.is_empty());
    assert!(status.is_degraded());
    assert!(matches!(err, Some(DirectoryError::Fetch { .. })));
}

#[test]
fn successful_fetch_replaces_directory() {
    let url = serve_once(
        "200 OK",
        r#"[{"name":"Heathrow Airport","code":"LHR","city":"London","country":"United Kingdom"}]"#,
    );
    let directory = AirportDirectory::fetch(&url).unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.lookup("lhr").unwrap().city, "London");
}

#[test]
fn selecting_any_row_shows_the_sample_details() {
    let mut session = session_on_results();
    assert!(session.select(FlightId::new("3")));
    assert_eq!(session.screen(), &Screen::Details(FlightId::new("3")));
    assert_eq!(session.selected(), Some(&FlightId::new("3")));
    assert_eq!(session.details(), Some(&sample_details()));
}

#[test]
fn back_returns_to_unchanged_results() {
    let mut session = session_on_results();
    let before = session.results().to_vec();

    session.select(FlightId::new("5"));
    assert!(session.back());

    assert_eq!(session.screen(), &Screen::Results);
    assert_eq!(session.results(), before.as_slice());
}

#[test]
fn search_again_from_results_keeps_results_screen() {
    let mut session = session_on_results();
    assert!(session.submit());
    assert_eq!(session.screen(), &Screen::Results);
    assert!(session.overlay());
    assert_eq!(session.progress(), 0);

    while session.is_searching() {
        session.tick();
    }
    assert_eq!(session.screen(), &Screen::Results);
    assert!(!session.overlay());
}

#[test]
fn wall_clock_drive_matches_tick_drive() {
    use std::time::Duration;

    let mut session = BookingSession::new(flightdeck_core::ProgressSimulator::new(
        Duration::from_millis(30),
    ));
    session.submit();
    assert_eq!(session.advance(Duration::from_millis(30 * 50)), Tick::Advanced(50));
    assert_eq!(session.advance(Duration::from_millis(30 * 50)), Tick::Completed);
    assert_eq!(session.screen(), &Screen::Results);
}
