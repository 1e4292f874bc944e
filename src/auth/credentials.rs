use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{AppError, AppResult};

use super::token::TokenSet;
use super::token_store::TokenStore;

pub const ACCESS_TOKEN_ENV: &str = "LISTMAIL_ACCESS_TOKEN";

/// Hands out a usable access token for one profile, refreshing the stored
/// token through the OAuth token endpoint when it has expired.
#[derive(Debug)]
pub struct CredentialProvider<S> {
    profile: String,
    store: S,
    override_token: Option<String>,
    http: Client,
}

impl<S: TokenStore> CredentialProvider<S> {
    pub fn new(profile: impl Into<String>, store: S) -> Self {
        Self {
            profile: profile.into(),
            store,
            override_token: None,
            http: Client::new(),
        }
    }

    /// A non-blank override short-circuits the store entirely.
    pub fn with_override(mut self, token: Option<String>) -> Self {
        self.override_token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        self
    }

    pub async fn access_token(&self, settings: &Settings) -> AppResult<String> {
        if let Some(token) = &self.override_token {
            debug!("using access token from {ACCESS_TOKEN_ENV}");
            return Ok(token.clone());
        }

        let current = self.store.load(&self.profile)?.ok_or_else(|| {
            AppError::Auth(format!(
                "no stored token for profile `{}`; store one or set {ACCESS_TOKEN_ENV}",
                self.profile
            ))
        })?;

        if !current.is_expired(SystemTime::now()) {
            return Ok(current.access_token);
        }

        let refresh_token = current.refresh_token.clone().ok_or_else(|| {
            AppError::Auth("access token expired and no refresh token is stored".to_string())
        })?;

        info!(profile = %self.profile, "refreshing expired access token");
        let mut refreshed = self.exchange_refresh_token(settings, &refresh_token).await?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        self.store.save(&self.profile, &refreshed)?;
        Ok(refreshed.access_token)
    }

    async fn exchange_refresh_token(
        &self,
        settings: &Settings,
        refresh_token: &str,
    ) -> AppResult<TokenSet> {
        let mut form = HashMap::from([
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", refresh_token.to_string()),
            ("client_id", settings.client_id()?.to_string()),
        ]);

        if let Some(client_secret) = settings.client_secret() {
            form.insert("client_secret", client_secret.to_string());
        }

        let response = self
            .http
            .post(settings.token_uri())
            .form(&form)
            .send()
            .await?;

        parse_token_response(response).await
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

async fn parse_token_response(response: reqwest::Response) -> AppResult<TokenSet> {
    if response.status().is_success() {
        let payload: OAuthTokenResponse = response.json().await?;
        return Ok(TokenSet {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token,
            expires_at_unix: expires_at_unix(payload.expires_in),
            token_type: payload.token_type,
            scope: payload.scope,
        });
    }

    let status = response.status();
    let body = response.text().await?;
    if let Ok(err_payload) = serde_json::from_str::<OAuthErrorResponse>(&body) {
        let error = err_payload
            .error
            .unwrap_or_else(|| "unknown_oauth_error".to_string());
        let description = err_payload
            .error_description
            .unwrap_or_else(|| "no description".to_string());
        return Err(AppError::Auth(format!(
            "oauth token refresh failed ({status}): {error} ({description})"
        )));
    }

    Err(AppError::Auth(format!(
        "oauth token refresh failed ({status}): {body}"
    )))
}

fn expires_at_unix(expires_in: Option<u64>) -> Option<u64> {
    let expires_in = expires_in?;
    let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    Some(now.saturating_add(expires_in))
}
