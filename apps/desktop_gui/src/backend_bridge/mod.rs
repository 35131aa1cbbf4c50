//! Bridge between the UI thread and the backend worker that owns the form session.

pub mod commands;
pub mod runtime;
