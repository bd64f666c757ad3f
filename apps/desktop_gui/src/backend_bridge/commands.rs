//! Backend commands queued from UI to backend worker.

use wizard_core::RegistrationDraft;

pub enum BackendCommand {
    Submit { draft: RegistrationDraft },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit { .. } => "submit_registration",
        }
    }
}
