//! Command orchestration helpers from UI actions to backend command queue.

use client_core::FormState;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::reducer::fail_undelivered;

/// Starts a lookup from the form inputs and hands it to the worker. Returns
/// `false` when the inputs were rejected. A lookup the worker cannot receive is
/// resolved as a transport failure right away.
pub fn submit_lookup(
    form: &mut FormState,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> bool {
    let pending = match form.begin_submission() {
        Ok(pending) => pending,
        Err(_) => return false,
    };

    let ticket = pending.ticket;
    *status = format!("Searching {} records", pending.request.year);
    if !dispatch_backend_command(cmd_tx, BackendCommand::Lookup(pending), status) {
        let reason = status.clone();
        fail_undelivered(form, ticket, &reason);
    }
    true
}

/// Queues `cmd` for the worker. Returns `false` and explains why in `status`
/// when the queue is full or the worker is gone.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend command queue is full");
            *status = "Lookup queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend worker disconnected");
            *status = "Lookup worker stopped (possible startup/runtime failure)".to_string();
            false
        }
    }
}
