use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::protocol::{RegistrationRow, StoredObject};

/// Remote object storage plus table insert used to persist a registration.
#[async_trait]
pub trait RegistrationBackend: Send + Sync {
    /// False while the client still carries placeholder credentials.
    fn is_configured(&self) -> bool;

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject>;

    async fn insert(&self, table: &str, row: &RegistrationRow) -> Result<()>;
}

/// Stand-in used when no usable backend client could be built.
pub struct MissingBackend;

#[async_trait]
impl RegistrationBackend for MissingBackend {
    fn is_configured(&self) -> bool {
        false
    }

    async fn upload(
        &self,
        bucket: &str,
        _key: &str,
        _bytes: &[u8],
        _content_type: &str,
    ) -> Result<StoredObject> {
        Err(anyhow!("storage backend unavailable for bucket {bucket}"))
    }

    async fn insert(&self, table: &str, _row: &RegistrationRow) -> Result<()> {
        Err(anyhow!("table backend unavailable for {table}"))
    }
}
