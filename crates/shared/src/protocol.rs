use serde::{Deserialize, Serialize};

use crate::domain::{Gender, MaritalStatus};

pub const PASSPORT_PHOTO_BUCKET: &str = "passport_photos";
pub const REGISTRATIONS_TABLE: &str = "registrations";

/// One row of the `registrations` table. Unset text columns are left out of
/// the payload so the backend applies its own column default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_department: Option<String>,
    /// Storage path of the uploaded photo, empty when none was uploaded.
    pub passport_photo_url: String,
}

/// Result of a successful object upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub path: String,
}
