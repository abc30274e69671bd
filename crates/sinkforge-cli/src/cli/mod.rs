//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sinkforge_core::domain::SinkPattern;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sinkforge",
    bin_name = "sinkforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "CDC sink-group configuration generator",
    long_about = "Sinkforge maintains the sink-groups.yaml document that drives \
                  Redpanda Connect CDC pipelines: deriving sink groups from \
                  source groups, merging scanned databases, and validating the \
                  result.",
    after_help = "EXAMPLES:\n\
        \x20 sinkforge create                         # scaffold every eligible source group\n\
        \x20 sinkforge create asma                    # derive sink_asma from source group asma\n\
        \x20 sinkforge sources update sink_asma nonprod --from scan.json\n\
        \x20 sinkforge validate\n\
        \x20 sinkforge show sink_asma --resolved",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive inherited sink groups from source groups.
    #[command(
        about = "Create inherited sink group(s) from source groups",
        after_help = "EXAMPLES:\n\
            \x20 sinkforge create          # all eligible (db-shared) source groups\n\
            \x20 sinkforge create asma     # just source group 'asma' -> sink_asma"
    )]
    Create(CreateArgs),

    /// Create a standalone sink group with explicit attributes.
    #[command(
        about = "Create a standalone sink group",
        after_help = "EXAMPLES:\n\
            \x20 sinkforge standalone warehouse --type postgres\n\
            \x20 sinkforge standalone audit --type mssql --pattern db-shared --environment-aware"
    )]
    Standalone(StandaloneArgs),

    /// Manage servers inside a sink group.
    #[command(subcommand, about = "Add or remove sink servers")]
    Server(ServerCommands),

    /// Manage per-service source mappings.
    #[command(subcommand, about = "Update service source mappings from scans")]
    Sources(SourcesCommands),

    /// Remove a standalone sink group.
    #[command(about = "Remove a sink group (standalone only)")]
    Remove(RemoveArgs),

    /// Validate the sink document against the source document.
    #[command(
        about = "Validate sink-groups.yaml",
        after_help = "Exit code 0 when valid (warnings allowed), 2 when any error is found."
    )]
    Validate(ValidateArgs),

    /// Show one sink group, raw or fully resolved.
    #[command(
        about = "Show a sink group as YAML",
        after_help = "EXAMPLES:\n\
            \x20 sinkforge show sink_asma             # as written on disk\n\
            \x20 sinkforge show sink_asma --resolved  # deduction + inheritance applied"
    )]
    Show(ShowArgs),

    /// List sink groups.
    #[command(visible_alias = "ls", about = "List sink groups")]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sinkforge completions bash > ~/.local/share/bash-completion/completions/sinkforge\n\
            \x20 sinkforge completions zsh  > ~/.zfunc/_sinkforge"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `sinkforge create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Source group to derive from.  Omit to scaffold every eligible
    /// (db-shared) source group in one pass.
    #[arg(value_name = "SOURCE_GROUP", help = "Source group to derive from")]
    pub source_group: Option<String>,
}

// ── standalone ────────────────────────────────────────────────────────────────

/// Arguments for `sinkforge standalone`.
#[derive(Debug, Args)]
pub struct StandaloneArgs {
    /// Name of the new sink group.
    #[arg(value_name = "NAME", help = "Sink group name")]
    pub name: String,

    /// Database engine tag.
    #[arg(
        short = 't',
        long = "type",
        value_name = "ENGINE",
        help = "Database engine (e.g. mssql, postgres)"
    )]
    pub engine: String,

    /// Database layout pattern.
    #[arg(
        short = 'p',
        long = "pattern",
        value_enum,
        default_value = "standalone",
        help = "Sink pattern"
    )]
    pub pattern: PatternArg,

    /// Mark the group environment-aware.  Required for db-shared sinks.
    #[arg(long = "environment-aware", help = "Mark the group environment-aware")]
    pub environment_aware: bool,

    /// Source group to link to.  Defaults to the first group in
    /// source-groups.yaml.
    #[arg(
        short = 's',
        long = "source-group",
        value_name = "GROUP",
        help = "Source group to link to"
    )]
    pub source_group: Option<String>,

    /// Free-form description.
    #[arg(short = 'd', long = "description", help = "Description")]
    pub description: Option<String>,

    /// Database-name patterns excluded from pipeline generation.
    #[arg(
        long = "exclude-database",
        value_name = "PATTERN",
        help = "Database pattern to exclude (repeatable)"
    )]
    pub database_exclude_patterns: Vec<String>,

    /// Schema-name patterns excluded from pipeline generation.
    #[arg(
        long = "exclude-schema",
        value_name = "PATTERN",
        help = "Schema pattern to exclude (repeatable)"
    )]
    pub schema_exclude_patterns: Vec<String>,
}

/// Pattern vocabulary accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum PatternArg {
    Standalone,
    DbShared,
    DbPerTenant,
}

impl From<PatternArg> for SinkPattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Standalone => SinkPattern::Standalone,
            PatternArg::DbShared => SinkPattern::DbShared,
            PatternArg::DbPerTenant => SinkPattern::DbPerTenant,
        }
    }
}

// ── server ────────────────────────────────────────────────────────────────────

/// Subcommands for `sinkforge server`.
#[derive(Debug, Subcommand)]
pub enum ServerCommands {
    /// Add a server to a sink group.
    #[command(
        about = "Add a sink server",
        after_help = "EXAMPLES:\n\
            \x20 sinkforge server add sink_asma replica              # inherits source server 'replica'\n\
            \x20 sinkforge server add sink_asma replica --source-ref prod\n\
            \x20 sinkforge server add warehouse primary --host wh.internal"
    )]
    Add(ServerAddArgs),

    /// Remove a server from a sink group.
    #[command(
        about = "Remove a sink server",
        after_help = "Refused while any service source mapping still points at the server."
    )]
    Remove(ServerRemoveArgs),
}

/// Arguments for `sinkforge server add`.
#[derive(Debug, Args)]
pub struct ServerAddArgs {
    /// Sink group to modify.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Server name.
    #[arg(value_name = "SERVER")]
    pub server: String,

    /// Source server to inherit from (inherited groups only; defaults to
    /// the server name itself).
    #[arg(long = "source-ref", value_name = "SERVER", help = "Source server to inherit")]
    pub source_ref: Option<String>,

    /// Database engine tag (standalone groups; defaults to the group's).
    #[arg(short = 't', long = "type", value_name = "ENGINE", help = "Database engine")]
    pub engine: Option<String>,

    /// Hostname.  Defaults to an environment-variable placeholder.
    #[arg(long = "host", help = "Hostname")]
    pub host: Option<String>,

    /// Port.  Defaults to an environment-variable placeholder.
    #[arg(long = "port", help = "Port")]
    pub port: Option<String>,

    /// User.  Defaults to an environment-variable placeholder.
    #[arg(long = "user", help = "User")]
    pub user: Option<String>,

    /// Password.  Defaults to an environment-variable placeholder; literal
    /// credentials in the document are discouraged.
    #[arg(long = "password", help = "Password")]
    pub password: Option<String>,
}

/// Arguments for `sinkforge server remove`.
#[derive(Debug, Args)]
pub struct ServerRemoveArgs {
    /// Sink group to modify.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Server name.
    #[arg(value_name = "SERVER")]
    pub server: String,
}

// ── sources ───────────────────────────────────────────────────────────────────

/// Subcommands for `sinkforge sources`.
#[derive(Debug, Subcommand)]
pub enum SourcesCommands {
    /// Merge a database scan into a sink group's service mappings.
    #[command(
        about = "Merge scanned databases into service mappings",
        after_help = "The scan file is a JSON or YAML array of database records:\n\
            \x20 [{\"service\": \"chat\", \"name\": \"chat_dev\", \"environment\": \"dev\",\n\
            \x20   \"schemas\": [\"public\"], \"table_count\": 42}]\n\
            Only mappings for the scanned server are replaced."
    )]
    Update(SourcesUpdateArgs),
}

/// Arguments for `sinkforge sources update`.
#[derive(Debug, Args)]
pub struct SourcesUpdateArgs {
    /// Sink group to update.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Server the scan was taken against.
    #[arg(value_name = "SERVER")]
    pub server: String,

    /// Scan file (JSON or YAML array of database records).
    #[arg(
        short = 'f',
        long = "from",
        value_name = "FILE",
        help = "Scan file with database records"
    )]
    pub from: PathBuf,
}

// ── remove / validate / show / list ───────────────────────────────────────────

/// Arguments for `sinkforge remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Sink group to remove.
    #[arg(value_name = "GROUP")]
    pub group: String,
}

/// Arguments for `sinkforge validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Treat warnings as errors.
    #[arg(long = "strict", help = "Fail on warnings too")]
    pub strict: bool,
}

/// Arguments for `sinkforge show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Sink group to show.
    #[arg(value_name = "GROUP")]
    pub group: String,

    /// Apply deduction and dereference source_refs before printing.
    #[arg(long = "resolved", help = "Show the fully resolved view")]
    pub resolved: bool,
}

/// Arguments for `sinkforge list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sinkforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_without_source_group() {
        let cli = Cli::parse_from(["sinkforge", "create"]);
        match cli.command {
            Commands::Create(args) => assert!(args.source_group.is_none()),
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn parse_standalone_with_pattern() {
        let cli = Cli::parse_from([
            "sinkforge",
            "standalone",
            "warehouse",
            "--type",
            "postgres",
            "--pattern",
            "db-shared",
            "--environment-aware",
        ]);
        match cli.command {
            Commands::Standalone(args) => {
                assert_eq!(args.pattern, PatternArg::DbShared);
                assert!(args.environment_aware);
            }
            other => panic!("expected Standalone, got {other:?}"),
        }
    }

    #[test]
    fn parse_server_add_with_source_ref() {
        let cli = Cli::parse_from([
            "sinkforge",
            "server",
            "add",
            "sink_asma",
            "replica",
            "--source-ref",
            "prod",
        ]);
        match cli.command {
            Commands::Server(ServerCommands::Add(args)) => {
                assert_eq!(args.group, "sink_asma");
                assert_eq!(args.source_ref.as_deref(), Some("prod"));
            }
            other => panic!("expected Server Add, got {other:?}"),
        }
    }

    #[test]
    fn parse_sources_update() {
        let cli = Cli::parse_from([
            "sinkforge",
            "sources",
            "update",
            "sink_asma",
            "nonprod",
            "--from",
            "scan.json",
        ]);
        match cli.command {
            Commands::Sources(SourcesCommands::Update(args)) => {
                assert_eq!(args.server, "nonprod");
                assert_eq!(args.from, PathBuf::from("scan.json"));
            }
            other => panic!("expected Sources Update, got {other:?}"),
        }
    }

    #[test]
    fn pattern_arg_maps_to_domain() {
        assert_eq!(SinkPattern::from(PatternArg::DbPerTenant), SinkPattern::DbPerTenant);
        assert_eq!(SinkPattern::from(PatternArg::Standalone), SinkPattern::Standalone);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["sinkforge", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn project_dir_is_global() {
        let cli = Cli::parse_from(["sinkforge", "validate", "-C", "/tmp/project"]);
        assert_eq!(cli.global.project_dir, Some(PathBuf::from("/tmp/project")));
    }
}
