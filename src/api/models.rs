use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub query: String,
    pub label_ids: Vec<String>,
    pub max_results: u32,
}

/// A message detail that has passed boundary validation.
#[derive(Debug, Clone)]
pub struct MessageDetail {
    pub id: String,
    pub snippet: Option<String>,
    pub headers: Vec<MessageHeader>,
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Simple { data: String },
    Multipart { parts: Vec<MessagePart> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    pub mime_type: String,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct GmailMessageResource {
    id: String,
    snippet: Option<String>,
    payload: Option<GmailPayload>,
}

#[derive(Debug, Deserialize)]
struct GmailPayload {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    headers: Option<Vec<MessageHeader>>,
    body: Option<GmailPartBody>,
    parts: Option<Vec<GmailPart>>,
}

#[derive(Debug, Deserialize)]
struct GmailPart {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    body: Option<GmailPartBody>,
}

#[derive(Debug, Deserialize)]
struct GmailPartBody {
    data: Option<String>,
}

/// Non-empty `payload.body.data` makes a simple body and the parts are never
/// read. A `text/plain` payload with no parts and no data is an empty simple
/// body, since Gmail omits `data` for zero-length bodies. Everything else is
/// multipart, keeping the top-level parts in document order.
impl TryFrom<GmailMessageResource> for MessageDetail {
    type Error = AppError;

    fn try_from(resource: GmailMessageResource) -> AppResult<Self> {
        let GmailMessageResource { id, snippet, payload } = resource;
        if id.trim().is_empty() {
            return Err(AppError::MalformedResponse(
                "message resource has an empty id".to_string(),
            ));
        }

        let payload = payload.ok_or_else(|| {
            AppError::MalformedResponse(format!("message {id} has no payload"))
        })?;

        let top_level_data = payload
            .body
            .and_then(|body| body.data)
            .filter(|data| !data.is_empty());
        let parts = payload.parts.unwrap_or_default();
        let is_plain_leaf = parts.is_empty()
            && payload
                .mime_type
                .as_deref()
                .is_some_and(|mime_type| mime_type == "text/plain");

        let body = match top_level_data {
            Some(data) => MessageBody::Simple { data },
            None if is_plain_leaf => MessageBody::Simple {
                data: String::new(),
            },
            None => MessageBody::Multipart {
                parts: parts
                    .into_iter()
                    .map(|part| MessagePart {
                        mime_type: part.mime_type.unwrap_or_default(),
                        data: part.body.and_then(|body| body.data),
                    })
                    .collect(),
            },
        };

        Ok(Self {
            id,
            snippet,
            headers: payload.headers.unwrap_or_default(),
            body,
        })
    }
}
