pub mod labels;
pub mod lister;

pub use labels::{remove_labels, resolve_label_id};
pub use lister::{ListOptions, Listing, SkippedMessage, list_messages};
