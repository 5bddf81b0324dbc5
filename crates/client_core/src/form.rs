//! Lookup form state machine.
//!
//! `FormState` owns the inputs and the visible outcome of the form. A query is
//! split into [`FormState::begin_submission`], which validates and hands out a
//! [`PendingLookup`], and [`FormState::resolve`], which applies the outcome.
//! Every submission takes a fresh ticket; only the most recent one may change
//! what the form shows.

use shared::{
    domain::{cap_identifier, AckNumber, DisplayRow, LookupRecord, Year, DEFAULT_MAX_IDENTIFIER_LEN},
    error::LookupError,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupTicket(u64);

impl LookupTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub year: Year,
    pub identifier: AckNumber,
}

/// An accepted submission waiting for its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub ticket: LookupTicket,
    pub request: LookupRequest,
}

pub type LookupOutcome = Result<LookupRecord, LookupError>;

#[derive(Debug, Clone)]
pub struct FormState {
    identifier: String,
    year: Year,
    result: Option<LookupRecord>,
    error_message: Option<String>,
    pending: Option<LookupTicket>,
    last_issued: u64,
    max_identifier_len: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDENTIFIER_LEN)
    }
}

impl FormState {
    pub fn new(max_identifier_len: usize) -> Self {
        Self {
            identifier: String::new(),
            year: Year::default(),
            result: None,
            error_message: None,
            pending: None,
            last_issued: 0,
            max_identifier_len,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn result(&self) -> Option<&LookupRecord> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_ticket(&self) -> Option<LookupTicket> {
        self.pending
    }

    pub fn max_identifier_len(&self) -> usize {
        self.max_identifier_len
    }

    /// Stores the identifier, cut to the configured length. Returns `true` when
    /// characters were dropped.
    pub fn set_identifier(&mut self, raw: &str) -> bool {
        self.identifier = cap_identifier(raw, self.max_identifier_len);
        self.identifier.chars().count() < raw.chars().count()
    }

    pub fn set_year(&mut self, year: Year) {
        self.year = year;
    }

    /// Sets both inputs, then submits them.
    pub fn submit_inputs(
        &mut self,
        identifier: &str,
        year: Year,
    ) -> Result<PendingLookup, LookupError> {
        self.set_identifier(identifier);
        self.set_year(year);
        self.begin_submission()
    }

    /// Clears the previous outcome and validates the current inputs.
    ///
    /// A blank identifier is rejected on the spot: the validation message is
    /// set, nothing is left pending and no request must be issued. Either way
    /// the submission supersedes every earlier one still in flight.
    pub fn begin_submission(&mut self) -> Result<PendingLookup, LookupError> {
        self.error_message = None;
        self.result = None;
        self.last_issued += 1;
        let ticket = LookupTicket(self.last_issued);

        let Some(identifier) = AckNumber::parse(&self.identifier) else {
            self.pending = None;
            let err = LookupError::Validation;
            self.error_message = Some(err.user_message().to_string());
            return Err(err);
        };

        self.pending = Some(ticket);
        Ok(PendingLookup {
            ticket,
            request: LookupRequest {
                year: self.year,
                identifier,
            },
        })
    }

    /// Applies the outcome of `ticket`. Outcomes of superseded or already
    /// resolved tickets leave the state untouched and return `false`.
    pub fn resolve(&mut self, ticket: LookupTicket, outcome: LookupOutcome) -> bool {
        if self.pending != Some(ticket) {
            debug!(
                ticket = ticket.sequence(),
                latest = self.last_issued,
                "discarding stale lookup outcome"
            );
            return false;
        }

        self.pending = None;
        match outcome {
            Ok(record) => {
                self.error_message = None;
                self.result = Some(record);
            }
            Err(err) => {
                self.result = None;
                self.error_message = Some(err.user_message().to_string());
            }
        }
        true
    }

    /// Table rows for the current result, empty when there is none.
    pub fn rows(&self) -> Vec<DisplayRow> {
        self.result.as_ref().map(LookupRecord::rows).unwrap_or_default()
    }
}
