//! Command line definition.
//!
//! Lives in the library so that `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// Version string with git SHA and build date for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    ", built ",
    env!("SEAPAY_BUILD_DATE"),
    ")"
);

/// Version string with build date only for release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("SEAPAY_BUILD_DATE"),
    ")"
);

#[derive(Debug, Parser)]
#[command(name = "seapay")]
#[command(version = VERSION)]
#[command(about = "Rebuild per-ship sea service intervals from OCR'd certification sheets")]
#[command(long_about = "Rebuild per-ship sea service intervals from OCR'd certification sheets.

Input files are plain text as produced by OCR or pdftotext, with pages
separated by form feeds. Every dropped row is listed with its page and line
so it can be reviewed by hand.

Logging honours RUST_LOG; -v raises the default level.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit JSON-formatted log lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract sea service intervals from certification sheets
    #[command(long_about = "Extract sea service intervals from certification sheets.

Each file is processed independently and in parallel. The sailor comes from a
NAME: header in the sheet, or from --sailor. Dates written as MM/DD take their
year from --year, else from a 20xx year in the file name.

EXAMPLES:
    seapay extract cert_2024.txt
    seapay extract --sailor \"DOE, JOHN\" --format json sheets/*.txt
    seapay extract --ships fleet.toml --merge-gap 2 cert.txt")]
    Extract(ExtractArgs),

    /// Inspect ship reference data
    #[command(subcommand)]
    Ships(ShipsCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Text files to process
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Ship reference file (.toml or text); defaults to the built-in list
    #[arg(long, value_name = "PATH")]
    pub ships: Option<PathBuf>,

    /// Sailor for rows before any NAME: header
    #[arg(long, value_name = "NAME")]
    pub sailor: Option<String>,

    /// Year for dates written as MM/DD
    #[arg(long, value_name = "YYYY")]
    pub year: Option<i32>,

    /// Largest gap in days still merged into one interval
    #[arg(long, value_name = "DAYS")]
    pub merge_gap: Option<u32>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Subcommand)]
pub enum ShipsCommands {
    /// Load a reference file and report conflicts
    Check {
        /// Reference file (.toml or text)
        path: PathBuf,
    },
    /// List ships in the reference in use
    List {
        /// Reference file instead of the configured one
        #[arg(long, value_name = "PATH")]
        ships: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_extract_options() {
        let cli = Cli::parse_from([
            "seapay",
            "-vv",
            "extract",
            "--sailor",
            "DOE, JOHN",
            "--year",
            "2024",
            "--format",
            "json",
            "a.txt",
            "b.txt",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.files.len(), 2);
                assert_eq!(args.sailor.as_deref(), Some("DOE, JOHN"));
                assert_eq!(args.year, Some(2024));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.merge_gap, None);
            }
            other => panic!("expected extract, got {:?}", other),
        }
    }

    #[test]
    fn extract_needs_a_file() {
        assert!(Cli::try_parse_from(["seapay", "extract"]).is_err());
    }
}
