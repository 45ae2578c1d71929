//! Background forecast fetching.
//!
//! Each refresh runs on its own thread so the terminal stays responsive;
//! results travel back to the UI thread over an mpsc channel tagged with the
//! generation they were issued under.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::openmeteo::{FetchError, ForecastSource, RawForecastPayload};
use crate::session::{RefreshOutcome, RefreshTicket, Session};

#[derive(Debug)]
pub enum RefreshMessage {
    FetchDone {
        generation: u64,
        result: Result<RawForecastPayload, FetchError>,
    },
}

pub struct Refresher {
    source: Arc<dyn ForecastSource>,
    tx: Sender<RefreshMessage>,
    rx: Receiver<RefreshMessage>,
}

impl Refresher {
    pub fn new(source: Arc<dyn ForecastSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    /// Starts fetching for `ticket`; the result arrives as a `FetchDone`.
    pub fn request(&self, ticket: RefreshTicket) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch(ticket.location);
            // The receiver only goes away on shutdown.
            let _ = tx.send(RefreshMessage::FetchDone {
                generation: ticket.generation,
                result,
            });
        });
    }

    /// Waits up to `timeout` for the next finished fetch.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RefreshMessage> {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Applies every fetch that has finished so far. Returns how many
    /// results were applied or failed; stale ones are not counted.
    pub fn apply_pending(&self, session: &mut Session) -> usize {
        let mut changed = 0;
        while let Ok(msg) = self.rx.try_recv() {
            if apply(session, msg) != RefreshOutcome::Stale {
                changed += 1;
            }
        }
        changed
    }
}

pub fn apply(session: &mut Session, msg: RefreshMessage) -> RefreshOutcome {
    match msg {
        RefreshMessage::FetchDone { generation, result } => {
            let outcome = session.complete_refresh(generation, result, Utc::now());
            debug!(generation, ?outcome, "refresh finished");
            outcome
        }
    }
}
