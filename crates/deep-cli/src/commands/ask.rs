use anyhow::Context;

use crate::cli::{AskArgs, GlobalFlags};
use crate::commands::shared::follow::follow;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `deep ask`.
pub async fn run(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        anyhow::bail!("query must not be empty");
    }

    let spinner = Progress::spinner("Starting research task...");
    let started = ctx.client.start(query).await;
    spinner.finish_clear();
    let handle = started.with_context(|| {
        format!(
            "failed to start research task at {}",
            ctx.client.base_url()
        )
    })?;

    let session = ctx.sessions.create_session(query, &handle.task_id);
    tracing::info!(session_id = %session.id, task_id = %handle.task_id, "research task started");

    if args.detach {
        return output(&session, flags.format);
    }

    let session = follow(&session, ctx).await?;
    output(&session, flags.format)
}
