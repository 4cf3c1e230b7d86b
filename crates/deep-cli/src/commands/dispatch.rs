use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Ask(args) => commands::ask::run(&args, ctx, flags).await,
        Commands::Status { task_id } => commands::status::run(&task_id, ctx, flags).await,
        Commands::Watch { session_id } => commands::watch::run(&session_id, ctx, flags).await,
        Commands::Cancel { session_id } => commands::cancel::run(&session_id, ctx, flags).await,
        Commands::Sessions { action } => commands::sessions::handle(&action, ctx, flags),
    }
}
