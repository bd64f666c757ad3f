//! Wizard state container: current step, draft, pending feedback and the
//! transitions between steps.

use std::sync::Arc;

use shared::{
    catalog::FacultyCatalog,
    domain::{Field, Gender, MaritalStatus, Step},
};
use tracing::{debug, info, warn};

use crate::{
    draft::{ConfirmationSummary, DocumentAsset, PhotoAsset, RegistrationDraft, MAX_PHOTO_BYTES},
    error::{SelectionError, StepError, SubmissionError, SubmitError, SubmitRejected},
    submission::{SubmissionCoordinator, SubmissionReceipt},
    validation::validate_step,
};

#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    catalog: Arc<FacultyCatalog>,
    step: Step,
    draft: RegistrationDraft,
    error_feedback: Option<String>,
    submitting: bool,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new(FacultyCatalog::builtin())
    }
}

impl RegistrationWizard {
    pub fn new(catalog: Arc<FacultyCatalog>) -> Self {
        Self {
            catalog,
            step: Step::Identity,
            draft: RegistrationDraft::default(),
            error_feedback: None,
            submitting: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &FacultyCatalog {
        &self.catalog
    }

    pub fn error_feedback(&self) -> Option<&str> {
        self.error_feedback.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Departments for the currently selected faculty.
    pub fn available_departments(&self) -> &[String] {
        self.catalog
            .departments_for(self.draft.target_faculty.as_deref())
    }

    pub fn department_selection_enabled(&self) -> bool {
        self.draft.is_filled(Field::TargetFaculty)
    }

    pub fn can_submit(&self) -> bool {
        self.step == Step::Documents && self.draft.photo.is_some() && !self.submitting
    }

    fn accepts_edits(&self) -> bool {
        if self.submitting || self.step == Step::Confirmation {
            debug!(step = ?self.step, submitting = self.submitting, "ignoring draft edit");
            return false;
        }
        true
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        if !self.accepts_edits() {
            return;
        }
        let value = value.into();

        // A department only makes sense within the faculty it was picked for.
        if field == Field::TargetFaculty
            && self.draft.target_faculty.as_deref() != Some(value.as_str())
        {
            if let Some(department) = self.draft.target_department.take() {
                debug!(faculty = %value, %department, "faculty changed, cleared target department");
            }
        }

        *self.draft.text_mut(field) = Some(value);
        self.error_feedback = None;
    }

    pub fn set_gender(&mut self, gender: Gender) {
        if self.accepts_edits() {
            self.draft.gender = gender;
            self.error_feedback = None;
        }
    }

    pub fn set_marital_status(&mut self, status: MaritalStatus) {
        if self.accepts_edits() {
            self.draft.marital_status = status;
            self.error_feedback = None;
        }
    }

    fn ensure_unlocked(&self) -> Result<(), SelectionError> {
        if self.accepts_edits() {
            Ok(())
        } else {
            Err(SelectionError::Locked {
                step: self.step,
                submitting: self.submitting,
            })
        }
    }

    /// Puts `photo` in the draft unless it exceeds [`MAX_PHOTO_BYTES`] or the
    /// draft is locked; a rejected photo leaves the previous one in place.
    pub fn select_photo(&mut self, photo: PhotoAsset) -> Result<(), SelectionError> {
        let size_bytes = photo.size_bytes();
        if size_bytes > MAX_PHOTO_BYTES {
            warn!(
                file = %photo.file_name,
                size_bytes,
                "rejected passport photo above size limit"
            );
            return Err(SelectionError::PhotoTooLarge {
                size_bytes,
                limit_bytes: MAX_PHOTO_BYTES,
            });
        }
        self.ensure_unlocked()?;
        debug!(file = %photo.file_name, size_bytes, "passport photo selected");
        self.draft.photo = Some(photo);
        self.error_feedback = None;
        Ok(())
    }

    /// Replaces the supporting documents. An empty selection is ignored.
    pub fn select_documents(
        &mut self,
        documents: Vec<DocumentAsset>,
    ) -> Result<(), SelectionError> {
        self.ensure_unlocked()?;
        if documents.is_empty() {
            return Ok(());
        }
        debug!(count = documents.len(), "supporting documents selected");
        self.draft.documents = documents;
        self.error_feedback = None;
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Step, StepError> {
        let Some(next) = self.step.next() else {
            return Err(StepError::NotAdvanceable(self.step));
        };
        validate_step(self.step, &self.draft, &self.catalog)?;
        debug!(from = ?self.step, to = ?next, "advancing wizard");
        self.step = next;
        Ok(next)
    }

    pub fn retreat(&mut self) -> Step {
        if self.submitting {
            return self.step;
        }
        if let Some(previous) = self.step.previous() {
            debug!(from = ?self.step, to = ?previous, "retreating wizard");
            self.step = previous;
        }
        self.step
    }

    /// Marks a submission as in flight and hands out the draft to submit.
    pub fn begin_submission(&mut self) -> Result<&RegistrationDraft, SubmitRejected> {
        if self.step != Step::Documents {
            return Err(SubmitRejected::WrongStep(self.step));
        }
        if self.submitting {
            return Err(SubmitRejected::AlreadySubmitting);
        }
        if self.draft.photo.is_none() {
            return Err(SubmitRejected::MissingPhoto);
        }
        self.submitting = true;
        self.error_feedback = None;
        Ok(&self.draft)
    }

    /// Applies the outcome of the submission started by [`Self::begin_submission`].
    pub fn finish_submission(&mut self, outcome: &Result<SubmissionReceipt, SubmissionError>) {
        self.submitting = false;
        match outcome {
            Ok(receipt) => {
                info!(photo_path = %receipt.photo_path, "registration stored");
                self.step = Step::Confirmation;
            }
            Err(err) => {
                warn!(error = %err, "registration submission failed");
                self.error_feedback = Some(err.to_string());
            }
        }
    }

    /// Clears the in-flight flag when the submission never reached the
    /// coordinator (e.g. the worker queue was gone).
    pub fn abandon_submission(&mut self, reason: impl Into<String>) {
        if self.submitting {
            self.submitting = false;
            self.error_feedback = Some(reason.into());
        }
    }

    pub async fn submit(
        &mut self,
        coordinator: &SubmissionCoordinator,
    ) -> Result<SubmissionReceipt, SubmitError> {
        self.begin_submission()?;
        let outcome = coordinator.submit(&self.draft).await;
        self.finish_submission(&outcome);
        Ok(outcome?)
    }

    pub fn confirmation_summary(&self) -> Option<ConfirmationSummary> {
        (self.step == Step::Confirmation).then(|| ConfirmationSummary::from_draft(&self.draft))
    }

    /// Starts a new registration from a fresh draft.
    pub fn reset(&mut self) {
        self.step = Step::Identity;
        self.draft = RegistrationDraft::default();
        self.error_feedback = None;
        self.submitting = false;
    }
}
