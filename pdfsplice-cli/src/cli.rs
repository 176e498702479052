//! CLI argument parsing for pdfsplice.
//!
//! This module defines the command-line interface using `clap`. It is also
//! compiled by the build script to render the man page, so it only depends
//! on `clap` and the library.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use pdfsplice::config::{
    CompressionLevel, Config, DEFAULT_OUTPUT_NAME, MergeOptions, OverwriteMode, output_path,
};
use pdfsplice::error::{PdfSpliceError, Result};
use pdfsplice::ordering::OrderCommand;

/// Format of diagnostic log lines on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Merge PDF files in the order you choose.
///
/// Files are merged in the order given on the command line unless
/// reordered with --order, --move-up or --move-down. The result can be
/// protected with a password.
#[derive(Parser, Debug)]
#[command(name = "pdfsplice")]
#[command(version)]
#[command(about = "Merge PDF files in the order you choose", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files or glob patterns, in upload order
    ///
    /// Each file is known by its file name. Clashing names get " (2)",
    /// " (3)", ... inserted before the extension.
    ///
    /// Examples:
    ///   pdfsplice cover.pdf body.pdf -o report
    ///   pdfsplice 'scans/*.pdf' -o scans.pdf
    #[arg(value_name = "FILE", required_unless_present = "interactive")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    ///
    /// ".pdf" is appended unless the name already ends with it.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_NAME)]
    pub output: PathBuf,

    /// Exact merge order as a comma-separated list of file names
    ///
    /// Must name every selected file exactly once.
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub order: Option<Vec<String>>,

    /// Leave a file out of the merge (repeatable)
    #[arg(short = 'x', long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Move the file at this 1-based position up one place (repeatable)
    ///
    /// Applied after --order, before any --move-down.
    #[arg(long, value_name = "POS")]
    pub move_up: Vec<usize>,

    /// Move the file at this 1-based position down one place (repeatable)
    #[arg(long, value_name = "POS")]
    pub move_down: Vec<usize>,

    /// Protect the output with this password
    ///
    /// Must contain at least one upper-case letter and one digit.
    #[arg(short, long, value_name = "PASSWORD", env = "PDFSPLICE_PASSWORD")]
    #[arg(hide_env_values = true)]
    pub password: Option<String>,

    /// Compression level for output PDF
    ///
    /// - none: streams are written as read
    /// - standard: compress uncompressed streams (default)
    /// - maximum: also drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Dry run - check inputs and show the merge order without writing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON summary on stdout instead of status messages
    #[arg(long)]
    pub json: bool,

    /// Format of diagnostic logs on stderr (filter with RUST_LOG)
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Start an interactive session to upload, reorder and merge
    #[arg(short, long, conflicts_with_all = ["dry_run", "json"])]
    pub interactive: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// Inputs are taken as given; glob expansion happens separately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is invalid
    /// - A move position is 0
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs: self.inputs.iter().map(PathBuf::from).collect(),
            output: output_path(&self.output),
            order: self.order.clone(),
            exclude: self.exclude.clone(),
            commands: self.order_commands()?,
            password: self.password.clone(),
            merge: MergeOptions::with_compression(compression),
            overwrite_mode,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
        };

        config.validate().map_err(|e| {
            PdfSpliceError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty input list outside interactive mode or
    /// an unknown compression level.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && !self.interactive {
            return Err(PdfSpliceError::invalid_config("No input files specified"));
        }

        if !["none", "standard", "maximum"].contains(&self.compression.as_str()) {
            return Err(PdfSpliceError::invalid_config(format!(
                "Invalid compression level: {}",
                self.compression
            )));
        }

        Ok(())
    }

    /// Engine settings, without the rest of the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is invalid.
    pub fn merge_options(&self) -> Result<MergeOptions> {
        Ok(MergeOptions::with_compression(CompressionLevel::from_str(
            &self.compression,
        )?))
    }

    /// The --move-up and --move-down flags as 0-based commands.
    fn order_commands(&self) -> Result<Vec<OrderCommand>> {
        let ups = self
            .move_up
            .iter()
            .map(|&pos| position_to_index(pos).map(OrderCommand::MoveUp));
        let downs = self
            .move_down
            .iter()
            .map(|&pos| position_to_index(pos).map(OrderCommand::MoveDown));
        ups.chain(downs).collect()
    }
}

/// Convert a 1-based position typed by the user into an index.
pub fn position_to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .ok_or_else(|| PdfSpliceError::invalid_config("Positions start at 1"))
}
