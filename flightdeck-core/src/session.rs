//! Booking session: the object a front end drives.
//!
//! Ties the criteria, the progress simulator and the view machine together so
//! the overlay flag always mirrors whether a search is in flight.

use std::time::Duration;

use tracing::info;

use crate::criteria::SearchCriteria;
use crate::flights::{Flight, FlightDetails, FlightId, FlightProvider, StaticFlights};
use crate::progress::{LoadingStage, ProgressSimulator, StageStatus, Tick};
use crate::view::{Screen, ViewEvent, ViewMachine, ViewState};

pub struct BookingSession {
    pub criteria: SearchCriteria,
    progress: ProgressSimulator,
    view: ViewMachine,
    provider: Box<dyn FlightProvider>,
    results: Vec<Flight>,
    selected: Option<FlightId>,
    details: Option<FlightDetails>,
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new(ProgressSimulator::default())
    }
}

impl BookingSession {
    pub fn new(progress: ProgressSimulator) -> Self {
        Self::with_provider(progress, Box::new(StaticFlights))
    }

    pub fn with_provider(progress: ProgressSimulator, provider: Box<dyn FlightProvider>) -> Self {
        Self {
            criteria: SearchCriteria::default(),
            progress,
            view: ViewMachine::new(),
            provider,
            results: Vec::new(),
            selected: None,
            details: None,
        }
    }

    /// Start a simulated search. Ignored on the details screen and while a
    /// search is already running.
    pub fn submit(&mut self) -> bool {
        if !self.view.dispatch(ViewEvent::Submit) {
            return false;
        }
        let generation = self.progress.start();
        info!(generation, route = %self.criteria.route(), "search submitted");
        true
    }

    /// Abort the running search without showing results.
    pub fn cancel_search(&mut self) -> bool {
        if !self.progress.cancel() {
            return false;
        }
        self.view.dispatch(ViewEvent::Cancel)
    }

    /// Advance the simulator by one step.
    pub fn tick(&mut self) -> Tick {
        let outcome = self.progress.tick();
        self.on_tick(outcome);
        outcome
    }

    /// Feed elapsed wall-clock time to the simulator.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        let outcome = self.progress.advance(elapsed);
        self.on_tick(outcome);
        outcome
    }

    fn on_tick(&mut self, outcome: Tick) {
        if outcome != Tick::Completed {
            return;
        }
        self.results = self.provider.results(&self.criteria);
        self.view.dispatch(ViewEvent::SearchCompleted);
        info!(count = self.results.len(), "search results ready");
    }

    /// Choose a result row and open its details.
    pub fn select(&mut self, id: FlightId) -> bool {
        if !self.results.iter().any(|f| f.id == id) {
            return false;
        }
        if !self.view.dispatch(ViewEvent::Select(id.clone())) {
            return false;
        }
        self.details = Some(self.provider.details(&id));
        self.selected = Some(id);
        true
    }

    /// Leave the details screen. The result list is kept as it was.
    pub fn back(&mut self) -> bool {
        self.view.dispatch(ViewEvent::Back)
    }

    pub fn view(&self) -> &ViewState {
        self.view.state()
    }

    pub fn screen(&self) -> &Screen {
        self.view.screen()
    }

    pub fn overlay(&self) -> bool {
        self.view.overlay()
    }

    pub fn progress(&self) -> u8 {
        self.progress.progress()
    }

    pub fn is_searching(&self) -> bool {
        self.progress.is_running()
    }

    pub fn stages(&self) -> [(LoadingStage, StageStatus); 3] {
        let p = self.progress.progress();
        LoadingStage::ALL.map(|stage| (stage, stage.status(p)))
    }

    pub fn results(&self) -> &[Flight] {
        &self.results
    }

    pub fn selected(&self) -> Option<&FlightId> {
        self.selected.as_ref()
    }

    pub fn details(&self) -> Option<&FlightDetails> {
        self.details.as_ref()
    }
}
