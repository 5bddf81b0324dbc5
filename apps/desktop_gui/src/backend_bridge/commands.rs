//! Backend commands queued from UI to backend worker.

use client_core::PendingLookup;

pub enum BackendCommand {
    Lookup(PendingLookup),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Lookup(_) => "lookup",
        }
    }
}
