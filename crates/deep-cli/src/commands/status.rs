use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `deep status`. A local session tracking the task is updated too.
pub async fn run(task_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let info = ctx
        .client
        .get_status(task_id)
        .await
        .with_context(|| format!("failed to fetch status of task '{task_id}'"))?;

    if let Some(session) = ctx.sessions.find_by_task(task_id) {
        ctx.tracker.reconcile(&session.id, &info);
    }

    output(&info, flags.format)
}
