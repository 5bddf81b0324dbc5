//! Events sent from the backend worker to the UI thread.

use client_core::{LookupOutcome, LookupTicket};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    /// The worker could not start or lost its runtime; queued lookups will
    /// never be answered.
    WorkerUnavailable(String),
    LookupResolved {
        ticket: LookupTicket,
        outcome: LookupOutcome,
    },
}
