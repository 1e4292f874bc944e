use crate::api::client::GmailClient;
use crate::auth::{ACCESS_TOKEN_ENV, CredentialProvider, FileTokenStore};
use crate::config::{self, AppPaths, PROFILE_ENV, Settings};
use crate::error::AppResult;

#[derive(Debug)]
pub struct AppContext {
    pub profile: String,
    pub settings: Settings,
    pub credentials: CredentialProvider<FileTokenStore>,
    pub gmail_client: GmailClient,
}

impl AppContext {
    pub fn bootstrap() -> AppResult<Self> {
        let profile = config::resolve_profile(std::env::var(PROFILE_ENV).ok().as_deref());
        let paths = AppPaths::discover()?;
        let settings = config::load_settings(&paths, &profile)?;
        let credentials = CredentialProvider::new(profile.clone(), FileTokenStore::new(paths))
            .with_override(std::env::var(ACCESS_TOKEN_ENV).ok());
        let gmail_client = settings
            .api_base_url()
            .map_or_else(GmailClient::new, |base_url| GmailClient::with_base_url(base_url));

        Ok(Self {
            profile,
            settings,
            credentials,
            gmail_client,
        })
    }

    pub async fn access_token(&self) -> AppResult<String> {
        self.credentials.access_token(&self.settings).await
    }
}
