//! Search progress simulator.
//!
//! A monotonic 0..=100 counter advanced one unit per tick. The simulator owns
//! no thread and no timer: the caller either calls [`ProgressSimulator::tick`]
//! directly or feeds wall-clock time through [`ProgressSimulator::advance`].
//! There is exactly one counter per simulator, so restarting a run can never
//! leave a second one ticking.

use std::time::Duration;

use tracing::debug;

/// Upper bound of the counter.
pub const PROGRESS_MAX: u8 = 100;

/// Default tick interval.
pub const DEFAULT_TICK: Duration = Duration::from_millis(30);

/// Outcome of a single tick (or a batch of ticks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running; nothing happened.
    Idle,
    /// Counter moved to this value and the run continues.
    Advanced(u8),
    /// Counter reached 100. Emitted once per run.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    interval: Duration,
    progress: u8,
    state: RunState,
    generation: u64,
    carry: Duration,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

impl ProgressSimulator {
    /// A zero interval is clamped to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            progress: 0,
            state: RunState::Idle,
            generation: 0,
            carry: Duration::ZERO,
        }
    }

    /// Reset to 0 and begin a new run, replacing any run in flight.
    /// Returns the run's generation number.
    pub fn start(&mut self) -> u64 {
        if self.state == RunState::Running {
            debug!(generation = self.generation, "restarting in-flight search progress");
        }
        self.progress = 0;
        self.carry = Duration::ZERO;
        self.state = RunState::Running;
        self.generation += 1;
        self.generation
    }

    /// Stop ticking without signalling completion. Returns whether a run was stopped.
    pub fn cancel(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        debug!(generation = self.generation, progress = self.progress, "search progress cancelled");
        self.state = RunState::Idle;
        self.carry = Duration::ZERO;
        true
    }

    /// Advance by one unit.
    pub fn tick(&mut self) -> Tick {
        if self.state != RunState::Running {
            return Tick::Idle;
        }
        self.progress += 1;
        if self.progress >= PROGRESS_MAX {
            self.progress = PROGRESS_MAX;
            self.state = RunState::Finished;
            self.carry = Duration::ZERO;
            debug!(generation = self.generation, "search progress complete");
            return Tick::Completed;
        }
        Tick::Advanced(self.progress)
    }

    /// Feed elapsed wall-clock time and run every tick that fits.
    ///
    /// Leftover time below one interval carries into the next call. Returns
    /// `Completed` if the run finished during this batch, otherwise the last
    /// tick's outcome.
    pub fn advance(&mut self, elapsed: Duration) -> Tick {
        if self.state != RunState::Running {
            return Tick::Idle;
        }
        self.carry += elapsed;
        let mut outcome = Tick::Idle;
        while self.carry >= self.interval {
            self.carry -= self.interval;
            outcome = self.tick();
            if outcome == Tick::Completed {
                break;
            }
        }
        outcome
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks still needed to finish the current run.
    pub fn remaining_ticks(&self) -> u32 {
        if self.is_running() {
            u32::from(PROGRESS_MAX - self.progress)
        } else {
            0
        }
    }
}

/// Status of one labelled loading stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Pending,
    InProgress,
    Complete,
}

/// The three milestones shown on the progress overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    SearchingFlights,
    AttachingRules,
    ServingResults,
}

impl LoadingStage {
    pub const ALL: [LoadingStage; 3] = [
        LoadingStage::SearchingFlights,
        LoadingStage::AttachingRules,
        LoadingStage::ServingResults,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LoadingStage::SearchingFlights => "Searching 400+ flights",
            LoadingStage::AttachingRules => "Attaching company rules",
            LoadingStage::ServingResults => "Serving best results",
        }
    }

    /// Progress value at which this stage starts and completes.
    fn bounds(self) -> (u8, u8) {
        match self {
            LoadingStage::SearchingFlights => (0, 33),
            LoadingStage::AttachingRules => (33, 66),
            LoadingStage::ServingResults => (66, PROGRESS_MAX),
        }
    }

    pub fn status(self, progress: u8) -> StageStatus {
        let (start, done) = self.bounds();
        if progress >= done {
            StageStatus::Complete
        } else if progress >= start {
            StageStatus::InProgress
        } else {
            StageStatus::Pending
        }
    }
}
