//! Screen state and the transitions driven by worker events.

use wizard_core::{RegistrationWizard, StepError};

use crate::controller::events::UiEvent;

#[derive(Debug, Default)]
pub struct ScreenState {
    pub wizard: RegistrationWizard,
    pub status: String,
    /// Inline message under the step form; cleared on the next transition.
    pub step_error: Option<String>,
}

impl ScreenState {
    pub fn new(wizard: RegistrationWizard) -> Self {
        Self {
            wizard,
            status: String::new(),
            step_error: None,
        }
    }

    pub fn advance(&mut self) {
        match self.wizard.advance() {
            Ok(step) => {
                self.step_error = None;
                self.status = format!("Étape: {step}");
            }
            Err(err) => self.step_error = Some(describe_step_error(&err)),
        }
    }

    pub fn retreat(&mut self) {
        let step = self.wizard.retreat();
        self.step_error = None;
        self.status = format!("Étape: {step}");
    }

    pub fn restart(&mut self) {
        self.wizard.reset();
        self.step_error = None;
        self.status = "Nouvelle inscription".to_string();
    }
}

fn describe_step_error(err: &StepError) -> String {
    match err {
        StepError::Incomplete { missing, .. } if missing.len() == 1 => {
            format!("Le champ « {} » est obligatoire.", missing[0].label())
        }
        other => other.to_string(),
    }
}

pub fn apply_ui_event(state: &mut ScreenState, event: UiEvent) {
    match event {
        UiEvent::Info(message) => state.status = message,
        UiEvent::SubmissionFinished(outcome) => {
            state.wizard.finish_submission(&outcome);
            state.status = match &outcome {
                Ok(_) => "Dossier transmis".to_string(),
                Err(_) => "Échec de l'envoi".to_string(),
            };
        }
        UiEvent::WorkerFailed(message) => {
            tracing::error!("backend worker failure: {message}");
            state.wizard.abandon_submission(message.clone());
            state.status = message;
        }
    }
}
