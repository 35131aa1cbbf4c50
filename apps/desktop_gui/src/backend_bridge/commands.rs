//! Backend commands queued from UI to backend worker.

use shared::protocol::Intent;

#[derive(Debug)]
pub enum BackendCommand {
    Dispatch(Intent),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Dispatch(intent) => intent.name(),
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
