use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};

use crate::api::client::GmailClient;
use crate::api::models::{MessageRecord, QueryFilter};
use crate::config::ExtractFailurePolicy;
use crate::error::AppResult;
use crate::mail::extract_record;

#[derive(Debug, Clone)]
pub struct ListOptions {
    pub user_id: String,
    pub fetch_concurrency: usize,
    pub on_extract_error: ExtractFailurePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMessage {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct Listing {
    pub records: Vec<MessageRecord>,
    pub skipped: Vec<SkippedMessage>,
}

/// Searches one page of messages and turns each into a record, keeping the
/// provider's order.
///
/// Detail fetches run at most `fetch_concurrency` at a time; the first fetch
/// failure aborts the listing. Extraction failures abort or skip according to
/// `on_extract_error`.
pub async fn list_messages(
    client: &GmailClient,
    access_token: &str,
    filter: &QueryFilter,
    options: &ListOptions,
) -> AppResult<Listing> {
    let ids = client
        .search_message_ids(&options.user_id, filter, access_token)
        .await?;

    if ids.is_empty() {
        warn!(query = %filter.query, "no result data");
        return Ok(Listing::default());
    }
    debug!(count = ids.len(), "matched messages");

    let details = stream::iter(ids)
        .map(|id| async move { client.get_message(&options.user_id, &id, access_token).await })
        .buffered(options.fetch_concurrency.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    let mut listing = Listing::default();
    for detail in &details {
        match extract_record(detail) {
            Ok(record) => listing.records.push(record),
            Err(err)
                if err.is_extraction_failure()
                    && options.on_extract_error == ExtractFailurePolicy::Skip =>
            {
                warn!(id = %detail.id, error = %err, "skipping message");
                listing.skipped.push(SkippedMessage {
                    id: detail.id.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        records = listing.records.len(),
        skipped = listing.skipped.len(),
        "listed messages"
    );
    Ok(listing)
}
