use std::io;

use thiserror::Error;

use crate::mail::decode::DecodeError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("auth error: {0}")]
    Auth(String),
    #[error("api error: {0}")]
    Api(String),
    #[error("malformed gmail response: {0}")]
    MalformedResponse(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to decode body of message {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: DecodeError,
    },
    #[error("message {id} has no text/plain part")]
    NoPlainTextPart { id: String },
    #[error("message {id} is missing the `{header}` header")]
    MissingHeader { id: String, header: &'static str },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// True for failures scoped to a single message's content rather than
    /// the provider or the local environment.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            AppError::Decode { .. } | AppError::NoPlainTextPart { .. } | AppError::MissingHeader { .. }
        )
    }
}
