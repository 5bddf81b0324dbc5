//! State transitions driven by worker events.

use client_core::{FormState, LookupTicket};
use shared::error::LookupError;

use crate::controller::events::UiEvent;

pub fn apply_ui_event(form: &mut FormState, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::WorkerUnavailable(reason) => {
            *status = format!("Lookup worker unavailable: {reason}");
            if let Some(ticket) = form.pending_ticket() {
                fail_undelivered(form, ticket, &reason);
            }
        }
        UiEvent::LookupResolved { ticket, outcome } => {
            if form.resolve(ticket, outcome) {
                *status = match form.error_message() {
                    Some(_) => "Lookup finished with an error".to_string(),
                    None => format!("Found {} field(s)", form.rows().len()),
                };
            }
        }
    }
}

/// Resolves a lookup the worker will never answer, so the form leaves the
/// loading state with the transport message.
pub fn fail_undelivered(form: &mut FormState, ticket: LookupTicket, reason: &str) {
    form.resolve(ticket, Err(LookupError::Transport(reason.to_string())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        domain::{LookupRecord, ScalarValue, Year},
        error::TRANSPORT_FAILURE_MESSAGE,
    };

    fn record() -> LookupRecord {
        [("Name", ScalarValue::Text("Jane Doe".into()))]
            .into_iter()
            .collect()
    }

    #[test]
    fn resolved_lookup_updates_form_and_status() {
        let mut form = FormState::default();
        let mut status = String::new();
        let pending = form.submit_inputs("12345", Year::Y2025).expect("accepted");

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::LookupResolved {
                ticket: pending.ticket,
                outcome: Ok(record()),
            },
        );
        assert!(!form.is_loading());
        assert_eq!(form.rows().len(), 1);
        assert_eq!(status, "Found 1 field(s)");
    }

    #[test]
    fn stale_event_leaves_status_and_form_alone() {
        let mut form = FormState::default();
        let mut status = "Searching".to_string();
        let stale = form.submit_inputs("11111", Year::Y2025).expect("accepted");
        form.submit_inputs("22222", Year::Y2025).expect("accepted");

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::LookupResolved {
                ticket: stale.ticket,
                outcome: Ok(record()),
            },
        );
        assert!(form.is_loading());
        assert!(form.result().is_none());
        assert_eq!(status, "Searching");
    }

    #[test]
    fn worker_loss_fails_pending_lookup() {
        let mut form = FormState::default();
        let mut status = String::new();
        form.submit_inputs("12345", Year::Y2025).expect("accepted");

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::WorkerUnavailable("runtime build failed".into()),
        );
        assert!(!form.is_loading());
        assert_eq!(form.error_message(), Some(TRANSPORT_FAILURE_MESSAGE));
        assert!(status.contains("runtime build failed"));
    }

    #[test]
    fn info_only_touches_status() {
        let mut form = FormState::default();
        let mut status = String::new();
        apply_ui_event(&mut form, &mut status, UiEvent::Info("Backend worker ready".into()));
        assert_eq!(status, "Backend worker ready");
        assert!(form.error_message().is_none());
    }
}
