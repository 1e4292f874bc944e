use tracing::info;

use crate::api::client::GmailClient;
use crate::api::models::{LabelRef, MessageRecord};
use crate::error::{AppError, AppResult};

/// Matches a label by id, or by name ignoring ASCII case.
pub fn resolve_label_id(labels: &[LabelRef], needle: &str) -> AppResult<String> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Err(AppError::InvalidInput("label name is empty".to_string()));
    }

    labels
        .iter()
        .find(|label| label.id == needle)
        .or_else(|| {
            labels
                .iter()
                .find(|label| label.name.eq_ignore_ascii_case(needle))
        })
        .map(|label| label.id.clone())
        .ok_or_else(|| AppError::InvalidInput(format!("unknown label `{needle}`")))
}

/// Removes `label_ids` from every record in a single batch call. No call is
/// made when either side is empty.
pub async fn remove_labels(
    client: &GmailClient,
    access_token: &str,
    user_id: &str,
    records: &[MessageRecord],
    label_ids: &[String],
) -> AppResult<()> {
    let ids = records
        .iter()
        .map(|record| record.id.clone())
        .collect::<Vec<_>>();
    if ids.is_empty() || label_ids.is_empty() {
        return Ok(());
    }

    client
        .batch_modify_labels(user_id, &ids, &[], label_ids, access_token)
        .await?;
    info!(messages = ids.len(), labels = ?label_ids, "removed labels");
    Ok(())
}
