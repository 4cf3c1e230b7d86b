use crate::cli::GlobalFlags;
use crate::commands::shared::follow::follow;
use crate::context::AppContext;
use crate::output::output;

/// Handle `deep watch`. Finished sessions are printed as stored.
pub async fn run(session_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session(session_id)?;
    if session.status.is_finished() {
        tracing::info!(%session_id, status = %session.status, "session already finished");
        return output(&session, flags.format);
    }

    let session = follow(&session, ctx).await?;
    output(&session, flags.format)
}
