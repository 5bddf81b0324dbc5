use shared::{
    domain::{LookupRecord, Year},
    error::LookupError,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub mod config;
pub mod form;
pub mod transport;

pub use config::{load_config, ClientConfig};
pub use form::{FormState, LookupOutcome, LookupRequest, LookupTicket, PendingLookup};
pub use transport::{
    classify_response, HttpLookupTransport, LookupTransport, MissingLookupTransport, RawResponse,
    TransportError,
};

/// Runs one request through `transport` and classifies what came back.
pub async fn perform_lookup<T>(transport: &T, request: &LookupRequest) -> LookupOutcome
where
    T: LookupTransport + ?Sized,
{
    match transport.fetch(request).await {
        Ok(response) => classify_response(response),
        Err(err) => Err(transport::transport_failure(err)),
    }
}

/// Async lookup form: owns a [`FormState`] and performs submissions through a
/// [`LookupTransport`].
///
/// The state lock is never held across the network call, so a second submit
/// may start while the first is in flight. Only the newest submission's
/// outcome reaches the state.
pub struct LookupController<T: LookupTransport> {
    transport: T,
    state: Mutex<FormState>,
}

impl LookupController<HttpLookupTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpLookupTransport::new(config)?;
        Ok(Self::new(transport, config.max_identifier_len))
    }
}

impl<T: LookupTransport> LookupController<T> {
    pub fn new(transport: T, max_identifier_len: usize) -> Self {
        Self {
            transport,
            state: Mutex::new(FormState::new(max_identifier_len)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A copy of the current form state.
    pub async fn snapshot(&self) -> FormState {
        self.state.lock().await.clone()
    }

    pub async fn set_identifier(&self, raw: &str) -> bool {
        self.state.lock().await.set_identifier(raw)
    }

    pub async fn set_year(&self, year: Year) {
        self.state.lock().await.set_year(year);
    }

    /// Submits the given inputs and waits for the outcome of this submission.
    ///
    /// The returned outcome belongs to this call even when a newer submission
    /// has since superseded it and the state was left unchanged.
    pub async fn submit(&self, identifier: &str, year: Year) -> Result<LookupRecord, LookupError> {
        let pending = {
            let mut state = self.state.lock().await;
            if state.set_identifier(identifier) {
                warn!(
                    max_len = state.max_identifier_len(),
                    "acknowledgment number truncated to input limit"
                );
            }
            state.set_year(year);
            state.begin_submission()
        };

        let pending = match pending {
            Ok(pending) => pending,
            Err(err) => {
                info!("rejected blank acknowledgment number");
                return Err(err);
            }
        };

        info!(
            ticket = pending.ticket.sequence(),
            year = %pending.request.year,
            "case lookup submitted"
        );
        let outcome = perform_lookup(&self.transport, &pending.request).await;

        let applied = self
            .state
            .lock()
            .await
            .resolve(pending.ticket, outcome.clone());
        match &outcome {
            Ok(record) => info!(
                ticket = pending.ticket.sequence(),
                fields = record.len(),
                applied,
                "case lookup succeeded"
            ),
            Err(err) => info!(
                ticket = pending.ticket.sequence(),
                code = ?err.code(),
                applied,
                "case lookup failed"
            ),
        }
        if !applied {
            debug!(ticket = pending.ticket.sequence(), "superseded by a newer submission");
        }
        outcome
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod form_tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
