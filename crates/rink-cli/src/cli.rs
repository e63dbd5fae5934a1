//! CLI argument definitions for the roster importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rink-import",
    version,
    about = "Import hockey player rosters from CSV files",
    long_about = "Import hockey player rosters from arbitrary CSV exports.\n\n\
                  Column headers are matched against known player attributes\n\
                  (English and French spellings) and rows are converted into\n\
                  typed player records written as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Import configuration file (TOML) with synonyms and policies.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow player values (names, contacts) to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how the columns of a CSV file map to player attributes.
    Map(MapArgs),

    /// Convert a CSV file into player records.
    Materialize(MaterializeArgs),

    /// List the target attributes and their synonyms.
    Catalog,
}

#[derive(Parser)]
pub struct MapArgs {
    /// Roster CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Print the mapping result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct MaterializeArgs {
    /// Roster CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Reuse a saved mapping instead of auto-mapping.
    #[arg(long = "mapping", value_name = "NAME")]
    pub mapping: Option<String>,

    /// Save the mapping used for this import under a name.
    #[arg(long = "save-mapping", value_name = "NAME")]
    pub save_mapping: Option<String>,

    /// Directory holding saved mappings.
    #[arg(long = "mapping-dir", value_name = "DIR", default_value = "rink-mappings")]
    pub mapping_dir: PathBuf,

    /// Write records to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail when a required attribute is unmapped or a line was rejected.
    #[arg(long = "strict")]
    pub strict: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
