//! Fetch-lifecycle shared by every screen.
//!
//! Each dispatch takes a [`Ticket`] carrying a generation number. Only the
//! ticket from the most recent dispatch may commit a result, so a slow
//! response that lands after a newer request started is dropped instead of
//! overwriting fresher state.

use crate::BrowseError;
use log::{debug, warn};
use parking_lot::Mutex;
use tokio::sync::watch;

/// Where a screen is in its fetch cycle
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet, or reset
    Idle,
    Loading,
    /// Request resolved. The value may itself be empty.
    Success(T),
    /// Request failed; carries the screen's user-facing message
    Error { message: String },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Proof of a dispatch; see [`Lifecycle::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Generation-guarded state cell published over a watch channel
#[derive(Debug)]
pub struct Lifecycle<T> {
    generation: Mutex<u64>,
    state: watch::Sender<FetchState<T>>,
}

impl<T: Clone> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Lifecycle<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        Self {
            generation: Mutex::new(0),
            state,
        }
    }

    /// Enter `Loading` and hand out the ticket the result must present
    pub fn begin(&self) -> Ticket {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.state.send_replace(FetchState::Loading);
        Ticket(*generation)
    }

    /// Store a finished request's outcome if `ticket` is still current.
    ///
    /// Returns `false` when the result was discarded as stale.
    pub fn commit(&self, ticket: Ticket, result: Result<T, BrowseError>, message: &str) -> bool {
        let generation = self.generation.lock();
        if ticket.0 != *generation {
            debug!(
                "Discarding stale result (generation {} superseded by {})",
                ticket.0, *generation
            );
            return false;
        }

        let next = match result {
            Ok(value) => FetchState::Success(value),
            Err(e) => {
                warn!("Fetch failed: {}", e);
                FetchState::Error {
                    message: message.to_string(),
                }
            }
        };
        self.state.send_replace(next);
        true
    }

    /// Return to `Idle`; anything still in flight becomes stale
    pub fn reset(&self) {
        let mut generation = self.generation.lock();
        *generation += 1;
        self.state.send_replace(FetchState::Idle);
    }

    /// Make in-flight requests stale without touching the visible state
    pub fn invalidate(&self) {
        *self.generation.lock() += 1;
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }
}
