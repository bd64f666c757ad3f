//! Events flowing from the backend worker back to the UI.

use wizard_core::{SubmissionError, SubmissionReceipt};

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    SubmissionFinished(Result<SubmissionReceipt, SubmissionError>),
    WorkerFailed(String),
}
