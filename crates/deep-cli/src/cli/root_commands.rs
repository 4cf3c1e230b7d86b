use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Start a research task and follow it to the end.
    Ask(AskArgs),
    /// Show a task's status as reported by the service.
    Status {
        /// Task ID returned when the task was started.
        task_id: String,
    },
    /// Resume following a running session's task.
    Watch {
        session_id: String,
    },
    /// Ask the service to cancel a session's task.
    Cancel {
        session_id: String,
    },
    /// Local session history.
    Sessions {
        #[command(subcommand)]
        action: SessionCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// The research question.
    pub query: String,
    /// Print the new session and exit without following progress.
    #[arg(long)]
    pub detach: bool,
}

/// Session history commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// List sessions, most recent first.
    List {
        /// Only sessions with this status (running, completed, failed).
        #[arg(long)]
        status: Option<String>,
        /// Maximum number of sessions.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one session with its messages.
    Show { id: String },
    /// Delete a session from local history.
    Delete { id: String },
}
