//! View-state machine: which screen is visible and whether the progress
//! overlay covers it.

use std::fmt;

use tracing::debug;

use crate::flights::FlightId;

/// The three mutually exclusive screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    SearchForm,
    Results,
    Details(FlightId),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::SearchForm => "Flight Booking",
            Screen::Results => "Flight results",
            Screen::Details(_) => "Flight details",
        }
    }
}

/// Inputs to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Submit,
    SearchCompleted,
    Cancel,
    Select(FlightId),
    Back,
}

impl fmt::Display for ViewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewEvent::Submit => write!(f, "submit"),
            ViewEvent::SearchCompleted => write!(f, "search completed"),
            ViewEvent::Cancel => write!(f, "cancel"),
            ViewEvent::Select(id) => write!(f, "select {id}"),
            ViewEvent::Back => write!(f, "back"),
        }
    }
}

/// Screen plus the orthogonal overlay flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub overlay: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen: Screen::SearchForm,
            overlay: false,
        }
    }
}

/// Pure transition function. `None` means the event is not accepted in `state`.
pub fn transition(state: &ViewState, event: &ViewEvent) -> Option<ViewState> {
    use Screen::*;

    match (&state.screen, state.overlay, event) {
        // Submitting from a form-bearing screen raises the overlay.
        (SearchForm | Results, false, ViewEvent::Submit) => Some(ViewState {
            screen: state.screen.clone(),
            overlay: true,
        }),
        // Completion lands on Results, whether the search started on the form or on Results.
        (SearchForm | Results, true, ViewEvent::SearchCompleted) => Some(ViewState {
            screen: Results,
            overlay: false,
        }),
        (_, true, ViewEvent::Cancel) => Some(ViewState {
            screen: state.screen.clone(),
            overlay: false,
        }),
        (Results, false, ViewEvent::Select(id)) => Some(ViewState {
            screen: Details(id.clone()),
            overlay: false,
        }),
        (Details(_), false, ViewEvent::Back) => Some(ViewState {
            screen: Results,
            overlay: false,
        }),
        _ => None,
    }
}

/// Owns the current [`ViewState`] and applies events to it.
#[derive(Debug, Clone, Default)]
pub struct ViewMachine {
    state: ViewState,
}

impl ViewMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event. Returns false (state untouched) when it is not accepted.
    pub fn dispatch(&mut self, event: ViewEvent) -> bool {
        match transition(&self.state, &event) {
            Some(next) => {
                debug!(from = ?self.state, to = ?next, %event, "view transition");
                self.state = next;
                true
            }
            None => {
                debug!(state = ?self.state, %event, "view event ignored");
                false
            }
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn screen(&self) -> &Screen {
        &self.state.screen
    }

    pub fn overlay(&self) -> bool {
        self.state.overlay
    }
}
