use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CancelRequested {
    session_id: String,
    task_id: String,
    requested: bool,
}

/// Handle `deep cancel`.
///
/// Waits only until the request has been sent. Whether the service accepted
/// it shows up later through `deep status` or `deep watch`.
pub async fn run(session_id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session = ctx.session(session_id)?;
    let requested = match ctx.client.cancel(&session.task_id).await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(task_id = %session.task_id, %error, "cancel request did not run");
            false
        }
    };

    output(
        &CancelRequested {
            session_id: session.id,
            task_id: session.task_id,
            requested,
        },
        flags.format,
    )
}
