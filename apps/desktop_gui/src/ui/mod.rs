//! UI layer for the desktop lookup form.

pub mod app;

pub use app::LookupFormApp;
