//! Bridge between the UI thread and the lookup worker.

pub mod commands;
pub mod runtime;
