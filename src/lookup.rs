//! Request lifecycle for city lookups.
//!
//! Each search runs on its own worker thread and reports back over a channel.
//! Searches are numbered; only the newest one may change the state, so a slow
//! earlier response can never overwrite a later one.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::api::WeatherSource;
use crate::error::LookupError;
use crate::weather::{RequestState, WeatherQuery, WeatherResult};

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub outcome: Result<WeatherResult, LookupError>,
}

pub struct WeatherLookup<S> {
    source: Arc<S>,
    state: RequestState,
    latest: u64,
    query: Option<WeatherQuery>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<S: WeatherSource> WeatherLookup<S> {
    pub fn new(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            state: RequestState::Idle,
            latest: 0,
            query: None,
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The query behind the current state, if any.
    pub fn query(&self) -> Option<&WeatherQuery> {
        self.query.as_ref()
    }

    /// Start a lookup for `input`. Returns `false` when nothing was started:
    /// blank input, or the same city is still loading.
    pub fn search(&mut self, input: &str) -> bool {
        let Some(ticket) = self.begin(input) else {
            return false;
        };
        let Some(query) = self.query.clone() else {
            return false;
        };

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = source.fetch(&query);
            // the receiver is gone once the app shuts down
            let _ = tx.send(Completion { ticket, outcome });
        });
        true
    }

    /// Move to `Loading` for a new query and hand out its ticket.
    ///
    /// Returns `None` for blank input and for the query that is already loading.
    pub fn begin(&mut self, input: &str) -> Option<Ticket> {
        let query = WeatherQuery::parse(input)?;
        if self.state.is_loading() && self.query.as_ref() == Some(&query) {
            debug!(city = query.city(), "lookup already in flight");
            return None;
        }
        self.latest += 1;
        info!(city = query.city(), ticket = self.latest, "lookup started");
        self.query = Some(query);
        self.state = RequestState::Loading;
        Some(Ticket(self.latest))
    }

    /// Apply a finished lookup. Returns `false` when a newer search superseded it.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<WeatherResult, LookupError>) -> bool {
        if ticket.0 != self.latest {
            warn!(ticket = ticket.0, latest = self.latest, "discarding stale lookup result");
            return false;
        }
        self.state = match outcome {
            Ok(result) => {
                info!(ticket = ticket.0, "lookup succeeded");
                RequestState::Success(result)
            }
            Err(err) => {
                warn!(ticket = ticket.0, error = %err, "lookup failed");
                RequestState::Failed(err.to_string())
            }
        };
        true
    }

    /// Apply every completion that has arrived so far.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(Completion { ticket, outcome }) = self.rx.try_recv() {
            changed |= self.complete(ticket, outcome);
        }
        changed
    }

    /// Drop any data or error, e.g. when the input box was emptied.
    pub fn clear(&mut self) {
        if matches!(self.state, RequestState::Idle) {
            return;
        }
        // anything still in flight is now stale
        self.latest += 1;
        self.query = None;
        self.state = RequestState::Idle;
    }
}
