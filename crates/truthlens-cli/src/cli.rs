//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use truthlens_retrieval::RetrievalMode;

/// TruthLens - Estimate how much of a text is hallucinated.
#[derive(Debug, Parser)]
#[command(name = "truthlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TRUTHLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict and percentage only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a text for hallucinations
    Check(CheckArgs),

    /// Ask the model a question, then check its answer
    Query(QueryArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Text to check
    #[arg(conflicts_with_all = ["file", "stdin"])]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'F', long, conflicts_with = "stdin")]
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the query command.
#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// Question to ask
    pub question: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set(SetProfileArgs),

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Arguments for `profile set`.
#[derive(Debug, Parser)]
pub struct SetProfileArgs {
    /// Profile name
    pub name: String,

    /// LLM provider (openai, anthropic, ollama)
    #[arg(long, default_value = "openai")]
    pub provider: String,

    /// Model name (provider default if omitted)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Provider base URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Evidence retrieval method
    #[arg(short, long, value_enum, default_value = "wikipedia")]
    pub retrieval: RetrievalArg,

    /// Score claims by embedding similarity instead of model verification
    #[arg(long)]
    pub similarity: bool,

    /// Embedding provider (openai, ollama)
    #[arg(long)]
    pub embedding_provider: Option<String>,

    /// Embedding model (provider default if omitted)
    #[arg(long, requires = "embedding_provider")]
    pub embedding_model: Option<String>,
}

/// Retrieval method argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RetrievalArg {
    /// Wikipedia search and page fetch
    Wikipedia,
    /// Web search (served by the Wikipedia lookup)
    Web,
    /// Vector store (served by the Wikipedia lookup)
    Vector,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<RetrievalArg> for RetrievalMode {
    fn from(arg: RetrievalArg) -> Self {
        match arg {
            RetrievalArg::Wikipedia => RetrievalMode::Wikipedia,
            RetrievalArg::Web => RetrievalMode::Web,
            RetrievalArg::Vector => RetrievalMode::Vector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command_with_text() {
        let cli = Cli::parse_from(["truthlens", "check", "Paris is in France."]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.text.as_deref(), Some("Paris is in France."));
                assert!(!args.stdin);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_check_sources_conflict() {
        let result = Cli::try_parse_from(["truthlens", "check", "text", "--stdin"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "truthlens", "query", "Who wrote Hamlet?", "-vv", "--format", "json", "--profile", "local",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.profile.as_deref(), Some("local"));
    }

    #[test]
    fn test_profile_set() {
        let cli = Cli::parse_from([
            "truthlens", "profile", "set", "local", "--provider", "ollama", "--retrieval", "web",
            "--similarity", "--embedding-provider", "ollama",
        ]);
        match cli.command {
            Command::Profile(ProfileArgs { action: ProfileAction::Set(args) }) => {
                assert_eq!(args.provider, "ollama");
                assert!(args.similarity);
                assert_eq!(RetrievalMode::from(args.retrieval), RetrievalMode::Web);
            }
            _ => panic!("Expected profile set"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["truthlens"]).is_err());
    }
}
