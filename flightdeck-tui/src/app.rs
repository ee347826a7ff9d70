//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The directory worker communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::{Duration as DateDelta, Local, NaiveDate, NaiveDateTime};

use flightdeck_core::{
    AirportDirectory, AirportSource, BookingSession, CriteriaIssue, DirectoryError,
    DirectoryStatus, FlightId, Screen,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Fields of the search form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Origin,
    Destination,
    Departure,
    Return,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Origin,
        FormField::Destination,
        FormField::Departure,
        FormField::Return,
        FormField::Submit,
    ];

    pub fn index(self) -> usize {
        match self {
            FormField::Origin => 0,
            FormField::Destination => 1,
            FormField::Departure => 2,
            FormField::Return => 3,
            FormField::Submit => 4,
        }
    }

    pub fn next(self) -> FormField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Origin => "Where from?",
            FormField::Destination => "Where to?",
            FormField::Departure => "Departure Date",
            FormField::Return => "Return Date",
            FormField::Submit => "Search flights",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Origin => "Select origin",
            FormField::Destination => "Select destination",
            FormField::Departure => "Select departure date",
            FormField::Return => "Select return date",
            FormField::Submit => "",
        }
    }

    pub fn is_airport(self) -> bool {
        matches!(self, FormField::Origin | FormField::Destination)
    }

    pub fn is_date(self) -> bool {
        matches!(self, FormField::Departure | FormField::Return)
    }
}

/// Which part of the results screen has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsFocus {
    List,
    Form,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Directory,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Directory => "DIR",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Airport picker popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerState {
    pub target: FormField,
    pub query: String,
    pub cursor: usize,
}

/// Free-text date entry popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateEntryState {
    pub target: FormField,
    pub input: String,
}

/// Which popup (if any) is shown on top. The search progress overlay is not
/// listed here: it belongs to the booking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
    AirportPicker(PickerState),
    DateEntry(DateEntryState),
}

const ERROR_HISTORY_CAP: usize = 50;

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    pub session: BookingSession,
    pub directory: AirportDirectory,
    pub directory_status: DirectoryStatus,

    // Screen-local cursors
    pub form_focus: FormField,
    pub results_focus: ResultsFocus,
    pub results_cursor: usize,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub directory_refreshing: bool,
    pub refresh_source: Option<AirportSource>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        session: BookingSession,
        directory: AirportDirectory,
        directory_status: DirectoryStatus,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            running: true,
            session,
            directory,
            directory_status,
            form_focus: FormField::Origin,
            results_focus: ResultsFocus::List,
            results_cursor: 0,
            worker_tx,
            worker_rx,
            directory_refreshing: false,
            refresh_source: None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Swap in a freshly loaded directory.
    pub fn apply_directory(&mut self, directory: AirportDirectory, status: DirectoryStatus) {
        self.set_status(format!("{} airports available", directory.len()));
        self.directory = directory;
        self.directory_status = status;
        self.directory_refreshing = false;
    }

    /// A failed load empties the directory and marks it degraded.
    pub fn directory_failed(&mut self, source: String, error: String) {
        self.directory = AirportDirectory::empty();
        self.directory_status = DirectoryStatus::Degraded {
            reason: error.clone(),
        };
        self.directory_refreshing = false;
        self.push_error(
            ErrorCategory::Directory,
            format!("Airport list unavailable: {error}"),
            source,
        );
    }

    /// Record a startup load failure.
    pub fn note_directory_error(&mut self, source: String, error: &DirectoryError) {
        self.push_error(
            ErrorCategory::Directory,
            format!("Airport list unavailable: {error}"),
            source,
        );
    }

    /// Ask the worker to reload the directory from `source`.
    pub fn request_directory(&mut self, source: AirportSource) {
        if self.directory_refreshing {
            return;
        }
        let label = source.to_string();
        if self
            .worker_tx
            .send(WorkerCommand::LoadAirports { source })
            .is_ok()
        {
            self.directory_refreshing = true;
            self.set_status(format!("Loading airports from {label}..."));
        }
    }

    /// Current text for a form field: city for airports, ISO date for dates.
    pub fn field_value(&self, field: FormField) -> Option<String> {
        let c = &self.session.criteria;
        match field {
            FormField::Origin => c
                .origin
                .as_deref()
                .map(|code| self.directory.label(Some(code), field.placeholder()).to_string()),
            FormField::Destination => c
                .destination
                .as_deref()
                .map(|code| self.directory.label(Some(code), field.placeholder()).to_string()),
            FormField::Departure => c.departure.map(|d| d.format("%a %d %b %Y").to_string()),
            FormField::Return => c.return_date.map(|d| d.format("%a %d %b %Y").to_string()),
            FormField::Submit => None,
        }
    }

    pub fn set_airport(&mut self, field: FormField, code: Option<String>) {
        match field {
            FormField::Origin => self.session.criteria.origin = code,
            FormField::Destination => self.session.criteria.destination = code,
            _ => {}
        }
    }

    pub fn date(&self, field: FormField) -> Option<NaiveDate> {
        match field {
            FormField::Departure => self.session.criteria.departure,
            FormField::Return => self.session.criteria.return_date,
            _ => None,
        }
    }

    pub fn set_date(&mut self, field: FormField, date: Option<NaiveDate>) {
        match field {
            FormField::Departure => self.session.criteria.departure = date,
            FormField::Return => self.session.criteria.return_date = date,
            _ => {}
        }
    }

    /// Step a date field by `days`, starting from today when unset.
    pub fn shift_date(&mut self, field: FormField, days: i64) {
        if !field.is_date() {
            return;
        }
        let base = self
            .date(field)
            .unwrap_or_else(|| Local::now().date_naive() - DateDelta::days(days.signum()));
        self.set_date(field, Some(base + DateDelta::days(days)));
    }

    /// Clear whatever field has focus.
    pub fn clear_field(&mut self, field: FormField) {
        if field.is_airport() {
            self.set_airport(field, None);
        } else if field.is_date() {
            self.set_date(field, None);
        }
    }

    /// Advisory findings about the current criteria.
    pub fn criteria_issues(&self) -> Vec<CriteriaIssue> {
        self.session.criteria.issues()
    }

    /// Submit the search and report advisory issues without blocking.
    pub fn submit_search(&mut self) {
        if !self.session.submit() {
            return;
        }
        self.overlay = Overlay::None;
        self.results_focus = ResultsFocus::List;
        let issues = self.criteria_issues();
        if issues.is_empty() {
            self.set_status(format!("Searching {}...", self.session.criteria.route()));
        } else {
            let joined: Vec<String> = issues.iter().map(ToString::to_string).collect();
            self.set_warning(format!("Searching anyway: {}", joined.join("; ")));
        }
    }

    pub fn cancel_search(&mut self) {
        if self.session.cancel_search() {
            self.set_warning("Search cancelled");
        }
    }

    /// Open the highlighted result row.
    pub fn select_current(&mut self) {
        let Some(flight) = self.session.results().get(self.results_cursor) else {
            return;
        };
        let id: FlightId = flight.id.clone();
        self.session.select(id);
    }

    pub fn back(&mut self) {
        self.session.back();
    }

    pub fn on_results(&self) -> bool {
        matches!(self.session.screen(), Screen::Results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn test_app() -> AppState {
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

    #[test]
    fn form_field_cycle() {
        assert_eq!(FormField::Origin.next(), FormField::Destination);
        assert_eq!(FormField::Submit.next(), FormField::Origin);
        assert_eq!(FormField::Origin.prev(), FormField::Submit);
        for f in FormField::ALL {
            assert_eq!(FormField::ALL[f.index()], f);
        }
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn airport_field_shows_city() {
        let mut app = test_app();
        assert_eq!(app.field_value(FormField::Origin), None);
        app.set_airport(FormField::Origin, Some("DXB".into()));
        assert_eq!(app.field_value(FormField::Origin).as_deref(), Some("Dubai"));
    }

    #[test]
    fn unknown_code_shows_placeholder() {
        let mut app = test_app();
        app.set_airport(FormField::Destination, Some("ZZZ".into()));
        assert_eq!(
            app.field_value(FormField::Destination).as_deref(),
            Some("Select destination")
        );
    }

    #[test]
    fn shift_date_from_unset_starts_today() {
        let mut app = test_app();
        app.shift_date(FormField::Departure, 1);
        assert_eq!(app.date(FormField::Departure), Some(Local::now().date_naive()));
        app.shift_date(FormField::Departure, 1);
        assert_eq!(
            app.date(FormField::Departure),
            Some(Local::now().date_naive() + DateDelta::days(1))
        );
        app.clear_field(FormField::Departure);
        assert_eq!(app.date(FormField::Departure), None);
    }

    #[test]
    fn failed_directory_is_degraded_and_logged() {
        let mut app = test_app();
        app.directory_failed("http://example.invalid".into(), "timed out".into());
        assert!(app.directory.is_empty());
        assert!(app.directory_status.is_degraded());
        assert_eq!(app.error_history[0].category, ErrorCategory::Directory);
    }

    #[test]
    fn submit_with_issues_warns_but_searches() {
        let mut app = test_app();
        app.submit_search();
        assert!(app.session.overlay());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }
}
