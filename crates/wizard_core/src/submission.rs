//! Two-call persistence of a finished draft: photo upload, then row insert.

use std::sync::Arc;

use shared::protocol::{PASSPORT_PHOTO_BUCKET, REGISTRATIONS_TABLE};
use tracing::{debug, error, info, warn};

use crate::{
    backend::RegistrationBackend, config::BackendSettings, draft::RegistrationDraft,
    error::SubmissionError, object_key::ObjectKeyGenerator,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Storage path of the uploaded photo; empty when the draft had none.
    pub photo_path: String,
}

pub struct SubmissionCoordinator {
    backend: Arc<dyn RegistrationBackend>,
    keys: ObjectKeyGenerator,
    photo_bucket: String,
    registrations_table: String,
}

impl SubmissionCoordinator {
    pub fn new(backend: Arc<dyn RegistrationBackend>) -> Self {
        Self {
            backend,
            keys: ObjectKeyGenerator::default(),
            photo_bucket: PASSPORT_PHOTO_BUCKET.to_string(),
            registrations_table: REGISTRATIONS_TABLE.to_string(),
        }
    }

    pub fn from_settings(backend: Arc<dyn RegistrationBackend>, settings: &BackendSettings) -> Self {
        Self::new(backend).with_targets(&settings.photo_bucket, &settings.registrations_table)
    }

    pub fn with_key_generator(mut self, keys: ObjectKeyGenerator) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_targets(mut self, photo_bucket: &str, registrations_table: &str) -> Self {
        self.photo_bucket = photo_bucket.to_string();
        self.registrations_table = registrations_table.to_string();
        self
    }

    /// Uploads the photo (if any) then inserts the row referencing it. Each
    /// remote call is attempted once; a failed insert leaves the uploaded
    /// photo in storage.
    pub async fn submit(
        &self,
        draft: &RegistrationDraft,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if !self.backend.is_configured() {
            warn!("submission refused: backend credentials are placeholders");
            return Err(SubmissionError::Configuration);
        }

        let mut photo_path = String::new();
        if let Some(photo) = &draft.photo {
            let key = self.keys.generate(photo.extension());
            debug!(bucket = %self.photo_bucket, %key, size_bytes = photo.size_bytes(), "uploading passport photo");
            let stored = self
                .backend
                .upload(&self.photo_bucket, &key, &photo.bytes, &photo.content_type())
                .await
                .map_err(|err| {
                    error!(bucket = %self.photo_bucket, %key, "photo upload failed: {err:#}");
                    SubmissionError::Upload(err.to_string())
                })?;
            photo_path = stored.path;
        }

        if !draft.documents.is_empty() {
            debug!(
                count = draft.documents.len(),
                "supporting documents are kept locally and not uploaded"
            );
        }

        let row = draft.to_row(photo_path.clone());
        self.backend
            .insert(&self.registrations_table, &row)
            .await
            .map_err(|err| {
                error!(table = %self.registrations_table, "registration insert failed: {err:#}");
                if !photo_path.is_empty() {
                    warn!(bucket = %self.photo_bucket, path = %photo_path, "uploaded photo left orphaned");
                }
                SubmissionError::Insert(err.to_string())
            })?;

        info!(table = %self.registrations_table, %photo_path, "registration inserted");
        Ok(SubmissionReceipt { photo_path })
    }
}
