use std::string::FromUtf8Error;

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use base64::engine::DecodePaddingMode;
use thiserror::Error;

// Gmail emits the URL-safe alphabet but is inconsistent about padding.
const GMAIL_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64url data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("body is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

pub fn decode_body(data: &str) -> Result<String, DecodeError> {
    let bytes = GMAIL_BASE64.decode(data)?;
    Ok(String::from_utf8(bytes)?)
}
