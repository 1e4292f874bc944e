use tracing::info;

use crate::api::models::{MessageBody, MessageDetail, MessageHeader, MessageRecord};
use crate::error::{AppError, AppResult};

use super::decode::decode_body;

const PLAIN_TEXT: &str = "text/plain";

pub fn extract_record(detail: &MessageDetail) -> AppResult<MessageRecord> {
    let body = extract_body(detail)?;
    let subject = required_header(detail, "Subject")?;
    let from = required_header(detail, "From")?;

    if let Some(snippet) = detail.snippet.as_deref() {
        info!(id = %detail.id, snippet, "extracted message");
    }

    Ok(MessageRecord {
        id: detail.id.clone(),
        subject,
        from,
        body,
    })
}

fn extract_body(detail: &MessageDetail) -> AppResult<String> {
    let data = match &detail.body {
        MessageBody::Simple { data } => data.as_str(),
        MessageBody::Multipart { parts } => parts
            .iter()
            .find(|part| part.mime_type == PLAIN_TEXT)
            .map(|part| part.data.as_deref().unwrap_or_default())
            .ok_or_else(|| AppError::NoPlainTextPart {
                id: detail.id.clone(),
            })?,
    };

    decode_body(data).map_err(|source| AppError::Decode {
        id: detail.id.clone(),
        source,
    })
}

fn required_header(detail: &MessageDetail, name: &'static str) -> AppResult<String> {
    header_value(&detail.headers, name).ok_or_else(|| AppError::MissingHeader {
        id: detail.id.clone(),
        header: name,
    })
}

fn header_value(headers: &[MessageHeader], target: &str) -> Option<String> {
    headers
        .iter()
        .find(|header| header.name == target)
        .map(|header| header.value.clone())
}
