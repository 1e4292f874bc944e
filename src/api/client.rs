use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};

use super::labels;
use super::messages;
use super::models::{GmailMessageResource, LabelRef, MessageDetail, QueryFilter};

pub const GMAIL_API_BASE_URL: &str = "https://gmail.googleapis.com";

#[derive(Debug, Clone)]
pub struct GmailClient {
    http: Client,
    base_url: String,
}

impl GmailClient {
    pub fn new() -> Self {
        Self::with_base_url(GMAIL_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn list_labels(&self, user_id: &str, access_token: &str) -> AppResult<Vec<LabelRef>> {
        let endpoint = labels::list_labels_endpoint(user_id);
        let response: GmailLabelListResponse =
            self.get_json(&endpoint, access_token, None).await?;

        Ok(response
            .labels
            .unwrap_or_default()
            .into_iter()
            .map(|label| LabelRef {
                id: label.id,
                name: label.name,
            })
            .collect())
    }

    /// Runs one search page and returns the matching message ids in provider order.
    pub async fn search_message_ids(
        &self,
        user_id: &str,
        filter: &QueryFilter,
        access_token: &str,
    ) -> AppResult<Vec<String>> {
        let endpoint = messages::list_endpoint(user_id);
        let query_params = messages::list_query(filter);
        let list_resource: GmailMessageListResource = self
            .get_json(&endpoint, access_token, Some(&query_params))
            .await?;

        if list_resource.result_size_estimate == Some(0) {
            return Ok(Vec::new());
        }

        Ok(list_resource
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|entry| entry.id)
            .collect())
    }

    pub async fn get_message(
        &self,
        user_id: &str,
        id: &str,
        access_token: &str,
    ) -> AppResult<MessageDetail> {
        let endpoint = messages::message_endpoint(user_id, id);
        let query = messages::get_query();
        let resource: GmailMessageResource =
            self.get_json(&endpoint, access_token, Some(&query)).await?;
        MessageDetail::try_from(resource)
    }

    pub async fn batch_modify_labels(
        &self,
        user_id: &str,
        ids: &[String],
        add: &[String],
        remove: &[String],
        access_token: &str,
    ) -> AppResult<()> {
        let endpoint = labels::batch_modify_endpoint(user_id);
        let body = GmailBatchModifyRequest {
            ids,
            add_label_ids: add,
            remove_label_ids: remove,
        };

        self.post_no_content(&endpoint, access_token, &body).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        access_token: &str,
        query: Option<&[(String, String)]>,
    ) -> AppResult<T> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "gmail GET");
        let mut request = self.http.get(url).bearer_auth(access_token);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        self.parse_json_response(response).await
    }

    async fn post_no_content<B: Serialize>(
        &self,
        endpoint: &str,
        access_token: &str,
        body: &B,
    ) -> AppResult<()> {
        let url = self.endpoint_url(endpoint)?;
        debug!(%url, "gmail POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }

    fn endpoint_url(&self, endpoint: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.set_path(endpoint.trim_start_matches('/'));
        Ok(url)
    }

    async fn parse_json_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

impl Default for GmailClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GmailMessageListResource {
    messages: Option<Vec<GmailMessageListEntry>>,
    #[serde(rename = "resultSizeEstimate")]
    result_size_estimate: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GmailMessageListEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GmailLabelListResponse {
    labels: Option<Vec<GmailLabelResource>>,
}

#[derive(Debug, Deserialize)]
struct GmailLabelResource {
    id: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct GmailBatchModifyRequest<'a> {
    ids: &'a [String],
    #[serde(rename = "addLabelIds")]
    add_label_ids: &'a [String],
    #[serde(rename = "removeLabelIds")]
    remove_label_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct GmailApiErrorEnvelope {
    error: GmailApiError,
}

#[derive(Debug, Deserialize)]
struct GmailApiError {
    code: Option<u16>,
    status: Option<String>,
    message: Option<String>,
    errors: Option<Vec<GmailApiErrorDetail>>,
}

#[derive(Debug, Deserialize)]
struct GmailApiErrorDetail {
    reason: Option<String>,
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "gmail api authorization failed ({status}): {message}. refresh the stored token or set LISTMAIL_ACCESS_TOKEN"
        ));
    }

    AppError::Api(format!("gmail api request failed ({status}): {message}"))
}

fn parse_api_error_message(body: &str) -> Option<String> {
    let envelope = serde_json::from_str::<GmailApiErrorEnvelope>(body).ok()?;
    let mut parts = Vec::new();

    if let Some(message) = envelope.error.message {
        parts.push(message);
    }

    if let Some(status) = envelope.error.status {
        parts.push(format!("status={status}"));
    }

    if let Some(code) = envelope.error.code {
        parts.push(format!("code={code}"));
    }

    if let Some(reason) = envelope
        .error
        .errors
        .and_then(|errors| errors.into_iter().find_map(|detail| detail.reason))
    {
        parts.push(format!("reason={reason}"));
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.join(", "))
}
