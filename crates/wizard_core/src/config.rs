use std::{collections::HashMap, fs, path::Path};

use shared::protocol::{PASSPORT_PHOTO_BUCKET, REGISTRATIONS_TABLE};
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "registration.toml";
pub const PLACEHOLDER_SUPABASE_URL: &str = "https://your-project.supabase.co";
pub const PLACEHOLDER_ANON_KEY: &str = "your-anon-key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub photo_bucket: String,
    pub registrations_table: String,
    pub request_timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            supabase_url: PLACEHOLDER_SUPABASE_URL.into(),
            supabase_anon_key: PLACEHOLDER_ANON_KEY.into(),
            photo_bucket: PASSPORT_PHOTO_BUCKET.into(),
            registrations_table: REGISTRATIONS_TABLE.into(),
            request_timeout_secs: 30,
        }
    }
}

impl BackendSettings {
    /// True once both the project URL and the anon key hold real values.
    pub fn is_configured(&self) -> bool {
        let url = self.supabase_url.trim();
        let key = self.supabase_anon_key.trim();
        if url.is_empty() || key.is_empty() {
            return false;
        }
        if url == PLACEHOLDER_SUPABASE_URL || url.contains("your-project") {
            return false;
        }
        if key == PLACEHOLDER_ANON_KEY {
            return false;
        }
        matches!(Url::parse(url), Ok(parsed) if matches!(parsed.scheme(), "http" | "https"))
    }

    pub fn base_url(&self) -> &str {
        self.supabase_url.trim().trim_end_matches('/')
    }
}

pub fn load_settings() -> BackendSettings {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then `path` (flat keys), then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> BackendSettings {
    let mut settings = BackendSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => warn!(
                "ignoring unreadable config file '{}': {err}",
                path.display()
            ),
        }
    }

    if let Some(v) = env_value(&env, &["SUPABASE_URL", "APP__SUPABASE_URL"]) {
        settings.supabase_url = v;
    }
    if let Some(v) = env_value(&env, &["SUPABASE_ANON_KEY", "APP__SUPABASE_ANON_KEY"]) {
        settings.supabase_anon_key = v;
    }
    if let Some(v) = env_value(&env, &["APP__PHOTO_BUCKET"]) {
        settings.photo_bucket = v;
    }
    if let Some(v) = env_value(&env, &["APP__REGISTRATIONS_TABLE"]) {
        settings.registrations_table = v;
    }
    if let Some(v) = env_value(&env, &["APP__REQUEST_TIMEOUT_SECS"]) {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => warn!("ignoring APP__REQUEST_TIMEOUT_SECS={v}: {err}"),
        }
    }

    settings
}

/// Last non-empty value among `names`; later names win.
fn env_value(env: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env(*name))
        .filter(|v| !v.trim().is_empty())
        .last()
}

fn apply_file_values(settings: &mut BackendSettings, file_cfg: &HashMap<String, toml::Value>) {
    let text = |key: &str| file_cfg.get(key).and_then(|v| v.as_str()).map(str::to_string);

    if let Some(v) = text("supabase_url") {
        settings.supabase_url = v;
    }
    if let Some(v) = text("supabase_anon_key") {
        settings.supabase_anon_key = v;
    }
    if let Some(v) = text("photo_bucket") {
        settings.photo_bucket = v;
    }
    if let Some(v) = text("registrations_table") {
        settings.registrations_table = v;
    }
    match file_cfg.get("request_timeout_secs") {
        Some(toml::Value::Integer(secs)) if *secs > 0 => {
            settings.request_timeout_secs = *secs as u64;
        }
        Some(other) => warn!("ignoring request_timeout_secs = {other}"),
        None => {}
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
