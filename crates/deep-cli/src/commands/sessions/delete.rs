use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

pub fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if !ctx.sessions.delete_session(id) {
        anyhow::bail!("session '{id}' not found");
    }
    output(&Deleted { id, deleted: true }, flags.format)
}
