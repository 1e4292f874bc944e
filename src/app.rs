use tracing::debug;

use crate::cli::Cli;
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;

pub async fn run(cli: Cli) -> AppResult<Option<String>> {
    let ctx = AppContext::bootstrap()?;
    debug!(profile = %ctx.profile, user_id = ctx.settings.user_id(), "context ready");

    commands::list::run(&ctx, &cli).await
}
