use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USER_ID: &str = "me";
const DEFAULT_UNREAD_LABEL: &str = "UNREAD";
const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// What to do when a single message cannot be turned into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractFailurePolicy {
    /// Fail the run before any label is removed.
    #[default]
    Abort,
    /// Leave the message out of the output and keep it unread.
    Skip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub fetch_concurrency: Option<usize>,
    #[serde(default)]
    pub unread_label: Option<String>,
    #[serde(default)]
    pub on_extract_error: ExtractFailurePolicy,
}

impl Settings {
    pub fn client_id(&self) -> AppResult<&str> {
        self.client_id.as_deref().ok_or_else(|| {
            AppError::Config(
                "missing oauth client_id in profile settings. add it to your profile json"
                    .to_string(),
            )
        })
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }

    pub fn user_id(&self) -> &str {
        non_blank(self.user_id.as_deref()).unwrap_or(DEFAULT_USER_ID)
    }

    /// Override for the Gmail API origin; `None` means the public endpoint.
    pub fn api_base_url(&self) -> Option<&str> {
        non_blank(self.api_base_url.as_deref())
    }

    pub fn fetch_concurrency(&self) -> usize {
        self.fetch_concurrency
            .unwrap_or(DEFAULT_FETCH_CONCURRENCY)
            .max(1)
    }

    pub fn unread_label(&self) -> &str {
        non_blank(self.unread_label.as_deref()).unwrap_or(DEFAULT_UNREAD_LABEL)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|err| {
        AppError::Config(format!("invalid settings file {}: {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let settings: Settings = serde_json::from_str("{}").expect("parse");

        assert_eq!(settings.user_id(), "me");
        assert_eq!(settings.unread_label(), "UNREAD");
        assert_eq!(settings.fetch_concurrency(), 4);
        assert_eq!(settings.api_base_url(), None);
        assert_eq!(settings.token_uri(), "https://oauth2.googleapis.com/token");
        assert_eq!(settings.on_extract_error, ExtractFailurePolicy::Abort);
        assert!(settings.client_id().is_err());
    }

    #[test]
    fn parses_overrides() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "client_id": "cid",
                "user_id": "someone@example.com",
                "api_base_url": " http://127.0.0.1:8080 ",
                "fetch_concurrency": 0,
                "unread_label": " ",
                "on_extract_error": "skip"
            }"#,
        )
        .expect("parse");

        assert_eq!(settings.client_id().expect("client id"), "cid");
        assert_eq!(settings.user_id(), "someone@example.com");
        assert_eq!(settings.api_base_url(), Some("http://127.0.0.1:8080"));
        assert_eq!(settings.fetch_concurrency(), 1);
        assert_eq!(settings.unread_label(), "UNREAD");
        assert_eq!(settings.on_extract_error, ExtractFailurePolicy::Skip);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load(dir.path().join("absent.json")).expect("load");
        assert!(settings.client_id.is_none());
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").expect("write");

        assert!(matches!(load(path), Err(AppError::Config(_))));
    }
}
