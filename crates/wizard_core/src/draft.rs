//! In-memory registration data collected across the wizard steps.

use std::{fs, path::Path};

use shared::{
    domain::{Field, Gender, MaritalStatus},
    protocol::RegistrationRow,
};

use crate::error::SelectionError;

/// Upper bound for the passport photo, checked when the file is picked.
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Clone, PartialEq, Eq)]
pub struct PhotoAsset {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for PhotoAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoAsset")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

impl PhotoAsset {
    pub fn new(file_name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes,
        }
    }

    /// Reads a photo from disk. The size limit is checked against file
    /// metadata first so oversized files are never loaded.
    pub fn from_path(path: &Path) -> Result<Self, SelectionError> {
        let unreadable = |err: std::io::Error| SelectionError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        };

        let size_bytes = fs::metadata(path).map_err(unreadable)?.len();
        if size_bytes > MAX_PHOTO_BYTES {
            return Err(SelectionError::PhotoTooLarge {
                size_bytes,
                limit_bytes: MAX_PHOTO_BYTES,
            });
        }

        let bytes = fs::read(path).map_err(unreadable)?;
        let file_name = file_name_of(path);
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Ok(Self::new(file_name, mime_type, bytes))
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Text after the last `.` of the file name; the whole name when it has none.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.file_name)
    }

    pub fn content_type(&self) -> String {
        self.mime_type.clone().unwrap_or_else(|| {
            mime_guess::from_ext(self.extension())
                .first_or_octet_stream()
                .essence_str()
                .to_string()
        })
    }
}

/// Supporting document picked by the applicant. Only metadata is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAsset {
    pub file_name: String,
    pub path: std::path::PathBuf,
    pub size_bytes: u64,
}

impl DocumentAsset {
    pub fn from_path(path: &Path) -> Result<Self, SelectionError> {
        let metadata = fs::metadata(path).map_err(|err| SelectionError::Unreadable {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            file_name: file_name_of(path),
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub previous_school: Option<String>,
    pub target_faculty: Option<String>,
    pub target_department: Option<String>,
    pub photo: Option<PhotoAsset>,
    pub documents: Vec<DocumentAsset>,
}

impl RegistrationDraft {
    pub fn text(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::BirthDate => &self.birth_date,
            Field::BirthPlace => &self.birth_place,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::PreviousSchool => &self.previous_school,
            Field::TargetFaculty => &self.target_faculty,
            Field::TargetDepartment => &self.target_department,
        };
        slot.as_deref()
    }

    pub(crate) fn text_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::BirthDate => &mut self.birth_date,
            Field::BirthPlace => &mut self.birth_place,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::PreviousSchool => &mut self.previous_school,
            Field::TargetFaculty => &mut self.target_faculty,
            Field::TargetDepartment => &mut self.target_department,
        }
    }

    /// True when the field holds something other than whitespace.
    pub fn is_filled(&self, field: Field) -> bool {
        self.text(field).is_some_and(|v| !v.trim().is_empty())
    }

    /// Row sent to the registrations table. Text columns are trimmed; the
    /// draft itself keeps what was typed.
    pub fn to_row(&self, passport_photo_url: impl Into<String>) -> RegistrationRow {
        RegistrationRow {
            first_name: trimmed(&self.first_name),
            last_name: trimmed(&self.last_name),
            email: trimmed(&self.email),
            phone: trimmed(&self.phone),
            gender: self.gender,
            marital_status: self.marital_status,
            birth_date: trimmed(&self.birth_date),
            birth_place: trimmed(&self.birth_place),
            previous_school: trimmed(&self.previous_school),
            target_faculty: trimmed(&self.target_faculty),
            target_department: trimmed(&self.target_department),
            passport_photo_url: passport_photo_url.into(),
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// What the confirmation screen shows once the registration is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationSummary {
    pub applicant_name: String,
    pub program: String,
}

impl ConfirmationSummary {
    pub fn from_draft(draft: &RegistrationDraft) -> Self {
        let applicant_name = [draft.first_name.as_deref(), draft.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let program = format!(
            "{} ({})",
            draft.target_faculty.as_deref().unwrap_or_default().trim(),
            draft.target_department.as_deref().unwrap_or_default().trim()
        );
        Self {
            applicant_name,
            program,
        }
    }
}
