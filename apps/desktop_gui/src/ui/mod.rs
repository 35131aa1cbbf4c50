//! UI layer for desktop GUI: app shell and the two form panels.

pub mod app;

pub use app::{FormApp, StartupConfig};
