mod delete;
mod list;
mod show;

use crate::cli::{GlobalFlags, SessionCommands};
use crate::context::AppContext;

/// Handle `deep sessions`.
pub fn handle(action: &SessionCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SessionCommands::List { status, limit } => list::run(status.as_deref(), *limit, ctx, flags),
        SessionCommands::Show { id } => show::run(id, ctx, flags),
        SessionCommands::Delete { id } => delete::run(id, ctx, flags),
    }
}
