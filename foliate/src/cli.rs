// foliate/src/cli.rs
//! This file defines the command-line interface (CLI) for the foliate application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use foliate_core::OutputShape;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "foliate",
    author = "Obscura Tech",
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply declarative XSS sanitization rules to JSON records",
    long_about = "Foliate loads entity definitions and their xss_foliate declarations from a YAML file and scrubs the string fields of JSON records the way each entity declares, before those records are stored.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `foliate` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes JSON records of one entity type.
    #[command(about = "Sanitizes a JSON record (or an array of records) of the given entity type.")]
    Sanitize(SanitizeCommand),

    /// Prints the resolved field rules of the configured entities.
    #[command(about = "Prints the resolved field rules of the configured entities.")]
    Rules(RulesCommand),

    /// Scrubs a raw string with a single scrubber.
    #[command(about = "Scrubs a raw string from a file or stdin with a single scrubber.")]
    Scrub(ScrubCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to the entity configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "FOLIATE_CONFIG", help = "Path to the entity configuration file (YAML).")]
    pub config: PathBuf,

    /// Entity type the records belong to.
    #[arg(long = "entity", short = 'e', value_name = "NAME", help = "Name of the entity type the records belong to.")]
    pub entity: String,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Path to the entity configuration file (YAML).
    #[arg(long = "config", short = 'c', value_name = "FILE", env = "FOLIATE_CONFIG", help = "Path to the entity configuration file (YAML).")]
    pub config: PathBuf,

    /// Only show this entity.
    #[arg(long = "entity", short = 'e', value_name = "NAME", help = "Only show the rules of this entity type.")]
    pub entity: Option<String>,

    /// Print rules as JSON to stdout.
    #[arg(long = "json", help = "Print the resolved rules as JSON instead of a table.")]
    pub json: bool,
}

/// Arguments for the `scrub` command.
#[derive(Parser, Debug)]
pub struct ScrubCommand {
    /// Scrubber to apply.
    #[arg(long = "kind", short = 'k', value_name = "NAME", default_value = "strip", help = "Scrubber to apply (strip, prune, escape, html5lib_sanitize or a named scrubber).")]
    pub kind: String,

    /// Output shape of the scrubbed fragment.
    #[arg(long = "shape", value_enum, default_value = "full-document", help = "Emit the scrubbed markup or only its plain text.")]
    pub shape: ShapeChoice,

    /// Shorthand for `--shape text-only`.
    #[arg(long = "text", conflicts_with = "shape", help = "Emit only the plain text of the scrubbed fragment.")]
    pub text: bool,

    /// Leave special characters of plain-text output unencoded.
    #[arg(long = "no-encode", help = "Do not HTML-encode special characters in plain-text output.")]
    pub no_encode: bool,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,
}

impl ScrubCommand {
    pub fn output_shape(&self) -> OutputShape {
        if self.text {
            OutputShape::TextOnly
        } else {
            self.shape.into()
        }
    }
}

/// Enum for selecting the output shape on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShapeChoice {
    /// The serialized sanitized markup.
    FullDocument,
    /// The entity-decoded plain text.
    TextOnly,
}

impl From<ShapeChoice> for OutputShape {
    fn from(choice: ShapeChoice) -> Self {
        match choice {
            ShapeChoice::FullDocument => OutputShape::FullDocument,
            ShapeChoice::TextOnly => OutputShape::TextOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn text_flag_selects_text_only() {
        let cli = Cli::parse_from(["foliate", "scrub", "--text"]);
        match cli.command {
            Commands::Scrub(cmd) => assert_eq!(cmd.output_shape(), OutputShape::TextOnly),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["foliate", "rules", "--config", "x.yaml", "-q"]);
        assert!(cli.quiet);
    }
}
