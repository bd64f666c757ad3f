//! `RegistrationBackend` over the Supabase storage and PostgREST endpoints.

use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use shared::{
    error::describe_backend_failure,
    protocol::{RegistrationRow, StoredObject},
};
use tracing::{debug, warn};

use crate::{
    backend::{MissingBackend, RegistrationBackend},
    config::BackendSettings,
};

pub struct SupabaseBackend {
    http: Client,
    settings: BackendSettings,
}

impl SupabaseBackend {
    pub fn new(settings: BackendSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .build()
            .context("failed to build supabase http client")?;
        Ok(Self { http, settings })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.settings.supabase_anon_key.trim();
        request
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        bail!(describe_backend_failure(status.as_u16(), &body))
    }
}

#[async_trait]
impl RegistrationBackend for SupabaseBackend {
    fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject> {
        let url = format!(
            "{}/storage/v1/object/{bucket}/{key}",
            self.settings.base_url()
        );
        debug!(%url, content_type, "POST storage object");
        let response = self
            .authorized(self.http.post(url))
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await?;
        Self::ensure_success(response).await?;

        Ok(StoredObject {
            path: key.to_string(),
        })
    }

    async fn insert(&self, table: &str, row: &RegistrationRow) -> Result<()> {
        let url = format!("{}/rest/v1/{table}", self.settings.base_url());
        debug!(%url, "POST table row");
        let response = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Builds the backend described by `settings`, falling back to
/// [`MissingBackend`] when no HTTP client can be built.
pub fn connect_backend(settings: &BackendSettings) -> Arc<dyn RegistrationBackend> {
    if !settings.is_configured() {
        warn!("supabase settings still hold placeholders; submissions will be refused");
    }
    match SupabaseBackend::new(settings.clone()) {
        Ok(backend) => Arc::new(backend),
        Err(err) => {
            warn!("supabase backend unavailable: {err:#}");
            Arc::new(MissingBackend)
        }
    }
}

#[cfg(test)]
#[path = "tests/supabase_tests.rs"]
mod tests;
