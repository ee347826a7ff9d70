//! Background worker thread: blocking airport loads run here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. The search
//! progress simulator does not live here; it is driven from the UI loop.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use flightdeck_core::{AirportDirectory, AirportSource};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    LoadAirports { source: AirportSource },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    AirportsLoaded {
        source: AirportSource,
        directory: AirportDirectory,
    },
    AirportsFailed {
        source: AirportSource,
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) -> JoinHandle<()> {
    thread::Builder::new()
        .name("flightdeck-worker".into())
        .spawn(move || {
            worker_loop(rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::LoadAirports { source }) => handle_load(source, &tx),
        }
    }
    debug!("worker stopped");
}

fn handle_load(source: AirportSource, tx: &Sender<WorkerResponse>) {
    let response = match AirportDirectory::try_load(&source) {
        Ok(directory) => {
            info!(%source, count = directory.len(), "airports refreshed");
            WorkerResponse::AirportsLoaded { source, directory }
        }
        Err(e) => {
            warn!(%source, error = %e, "airport refresh failed");
            WorkerResponse::AirportsFailed {
                source,
                error: e.to_string(),
            }
        }
    };
    let _ = tx.send(response);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn worker_stops_when_sender_dropped() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();
        let (resp_tx, _resp_rx) = mpsc::channel();

        let handle = spawn_worker(cmd_rx, resp_tx);
        drop(cmd_tx);
        handle.join().unwrap();
    }

    #[test]
    fn bundled_load_round_trips() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx);

        cmd_tx
            .send(WorkerCommand::LoadAirports {
                source: AirportSource::Bundled,
            })
            .unwrap();
        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::AirportsLoaded { directory, .. } => assert_eq!(directory.len(), 10),
            other => panic!("expected AirportsLoaded, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn missing_file_reports_failure() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_worker(cmd_rx, resp_tx);

        cmd_tx
            .send(WorkerCommand::LoadAirports {
                source: AirportSource::File(PathBuf::from("/nonexistent/airports.json")),
            })
            .unwrap();
        match resp_rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            WorkerResponse::AirportsFailed { error, .. } => {
                assert!(error.contains("/nonexistent/airports.json"))
            }
            other => panic!("expected AirportsFailed, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
