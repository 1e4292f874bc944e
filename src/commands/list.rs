use tracing::debug;

use crate::api::client::GmailClient;
use crate::api::models::QueryFilter;
use crate::cli::Cli;
use crate::config::Settings;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::mailbox::{self, ListOptions};
use crate::output;

pub async fn run(ctx: &AppContext, args: &Cli) -> AppResult<Option<String>> {
    let access_token = ctx.access_token().await?;
    list_and_mark_read(&ctx.gmail_client, &access_token, &ctx.settings, args).await
}

/// Lists the messages carrying `args.tag` that match `args.query`, removes the
/// unread label from the ones that were extracted, and renders them as JSON.
/// Returns `None` without touching labels when nothing was extracted.
pub async fn list_and_mark_read(
    client: &GmailClient,
    access_token: &str,
    settings: &Settings,
    args: &Cli,
) -> AppResult<Option<String>> {
    let user_id = settings.user_id();

    let labels = client.list_labels(user_id, access_token).await?;
    let tag_id = mailbox::resolve_label_id(&labels, &args.tag)?;

    let filter = QueryFilter {
        query: args.query.clone(),
        label_ids: vec![tag_id],
        max_results: args.count,
    };
    let options = ListOptions {
        user_id: user_id.to_string(),
        fetch_concurrency: settings.fetch_concurrency(),
        on_extract_error: settings.on_extract_error,
    };
    let listing = mailbox::list_messages(client, access_token, &filter, &options).await?;

    if listing.records.is_empty() {
        return Ok(None);
    }

    let unread_id = mailbox::resolve_label_id(&labels, settings.unread_label())?;
    mailbox::remove_labels(
        client,
        access_token,
        user_id,
        &listing.records,
        &[unread_id],
    )
    .await?;

    let rendered = output::render(&listing.records)?;
    if let Some(payload) = rendered.as_deref() {
        debug!(payload, "listing complete");
    }
    Ok(rendered)
}
