pub mod backend;
pub mod config;
pub mod draft;
pub mod error;
pub mod object_key;
pub mod submission;
pub mod supabase;
pub mod validation;
pub mod wizard;

pub use backend::{MissingBackend, RegistrationBackend};
pub use config::{load_settings, BackendSettings};
pub use draft::{
    ConfirmationSummary, DocumentAsset, PhotoAsset, RegistrationDraft, MAX_PHOTO_BYTES,
};
pub use error::{SelectionError, StepError, SubmissionError, SubmitError, SubmitRejected};
pub use object_key::ObjectKeyGenerator;
pub use submission::{SubmissionCoordinator, SubmissionReceipt};
pub use supabase::{connect_backend, SupabaseBackend};
pub use wizard::RegistrationWizard;

#[cfg(test)]
#[path = "tests/fakes.rs"]
mod fakes;

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod wizard_tests;

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod submission_tests;
