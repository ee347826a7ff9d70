//! Flightdeck core: the behaviour behind the booking screens.
//!
//! - Airport directory (bundled list, JSON file, HTTP fetch)
//! - Search progress simulator with labelled loading stages
//! - View-state machine: search form, results, details, progress overlay
//! - Booking session tying the pieces together
//! - Static result and detail providers
//! - `config.toml` settings

pub mod airports;
pub mod config;
pub mod criteria;
pub mod flights;
pub mod progress;
pub mod session;
pub mod view;

pub use airports::{Airport, AirportDirectory, AirportSource, DirectoryError, DirectoryStatus};
pub use config::{BookingConfig, ConfigError};
pub use criteria::{CriteriaIssue, SearchCriteria};
pub use flights::{Flight, FlightDetails, FlightId, FlightLeg, FlightProvider, StaticFlights};
pub use progress::{LoadingStage, ProgressSimulator, StageStatus, Tick};
pub use session::BookingSession;
pub use view::{Screen, ViewEvent, ViewMachine, ViewState};

#[cfg(test)]
mod tests {
    use super::*;

    /// Directory results cross from the worker thread to the UI thread.
    #[allow(dead_code)]
    fn assert_send() {
        fn require_send<T: Send>() {}

        require_send::<AirportDirectory>();
        require_send::<DirectoryError>();
        require_send::<DirectoryStatus>();
        require_send::<AirportSource>();
        require_send::<BookingSession>();
    }
}
