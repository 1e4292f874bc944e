pub mod decode;
pub mod extract;

pub use decode::{DecodeError, decode_body};
pub use extract::extract_record;
