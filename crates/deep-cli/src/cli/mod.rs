use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::{AskArgs, Commands, SessionCommands};

/// Top-level CLI parser for the `deep` binary.
#[derive(Debug, Parser)]
#[command(name = "deep", version, about = "Deep research - ask, track and revisit research tasks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no progress bar)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Research service base URL (overrides `api.base_url`)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat, SessionCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn ask_takes_query_and_detach() {
        let cli = Cli::try_parse_from(["deep", "ask", "What is quantum computing?", "--detach"])
            .expect("cli should parse");

        let Commands::Ask(args) = cli.command else {
            panic!("expected ask command");
        };
        assert_eq!(args.query, "What is quantum computing?");
        assert!(args.detach);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "deep",
            "--format",
            "json",
            "--api-url",
            "http://research.internal:9000",
            "--verbose",
            "status",
            "abc123",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        let flags = cli.global_flags();
        assert_eq!(flags.api_url.as_deref(), Some("http://research.internal:9000"));
        assert!(matches!(cli.command, Commands::Status { ref task_id } if task_id == "abc123"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["deep", "sessions", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Sessions {
                action: SessionCommands::List { .. }
            }
        ));
    }

    #[test]
    fn table_is_default_format() {
        let cli = Cli::try_parse_from(["deep", "sessions", "list"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["deep", "--format", "xml", "sessions", "list"]).is_err());
    }

    #[test]
    fn ask_requires_query() {
        assert!(Cli::try_parse_from(["deep", "ask"]).is_err());
    }

    #[test]
    fn sessions_list_accepts_filters() {
        let cli = Cli::try_parse_from([
            "deep", "sessions", "list", "--status", "failed", "--limit", "5",
        ])
        .expect("cli should parse");

        let Commands::Sessions {
            action: SessionCommands::List { status, limit },
        } = cli.command
        else {
            panic!("expected sessions list");
        };
        assert_eq!(status.as_deref(), Some("failed"));
        assert_eq!(limit, Some(5));
    }
}
