use serde::{Deserialize, Serialize};

/// Error body returned by the storage and REST endpoints of the backend.
///
/// Storage answers `{"statusCode": "...", "error": "...", "message": "..."}`,
/// the table endpoint answers `{"code": "...", "message": "...", "details": ..., "hint": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl BackendErrorBody {
    /// Most specific human-readable detail carried by the body.
    pub fn detail(&self) -> Option<&str> {
        [&self.message, &self.error]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Turns a raw error response into a single message: the body's `message`,
/// then `error`, then the raw text, then the status line.
pub fn describe_backend_failure(status: u16, raw_body: &str) -> String {
    if let Ok(body) = serde_json::from_str::<BackendErrorBody>(raw_body) {
        if let Some(detail) = body.detail() {
            return detail.to_string();
        }
    }

    let raw = raw_body.trim();
    if raw.is_empty() {
        format!("backend responded with HTTP {status}")
    } else {
        raw.to_string()
    }
}
