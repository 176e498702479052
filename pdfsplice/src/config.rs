//! Configuration module for pdfsplice.
//!
//! This module holds the validated, normalized settings that drive a merge.
//! The front end builds a [`Config`] from its arguments; the engine only sees
//! the [`MergeOptions`] subset. It also owns the output naming rule.

use anyhow::{Result, bail};

use crate::PdfSpliceError;
use crate::ordering::OrderCommand;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// File name used when the user leaves the output name empty.
pub const DEFAULT_OUTPUT_NAME: &str = "merged.pdf";

/// MIME type of every produced document.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were read.
    None,
    /// Flate-compress uncompressed streams.
    #[default]
    Standard,
    /// Compress and drop objects no page refers to.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfSpliceError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfSpliceError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

impl CompressionLevel {
    /// Name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Standard => "standard",
            Self::Maximum => "maximum",
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Settings the merge engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOptions {
    /// Compression applied before serialization.
    pub compression: CompressionLevel,
}

impl MergeOptions {
    /// Options with the given compression level.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self { compression }
    }
}

/// Complete configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF files, in upload order.
    pub inputs: Vec<PathBuf>,

    /// Output path, with the `.pdf` rule already applied.
    pub output: PathBuf,

    /// Explicit merge order by upload name.
    pub order: Option<Vec<String>>,

    /// Upload names left out of the merge.
    pub exclude: Vec<String>,

    /// Reorder commands applied after `order`, in sequence.
    pub commands: Vec<OrderCommand>,

    /// Password protecting the output. Empty means none.
    pub password: Option<String>,

    /// Engine settings.
    pub merge: MergeOptions,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - validate and report without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a machine-readable summary instead of prose.
    pub json: bool,
}

impl Config {
    /// Validate the configuration.
    ///
    /// Password strength is deliberately not checked here; it is reported
    /// as a merge failure when the merge is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - A name is both ordered and excluded
    /// - The output is also an input
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(order) = &self.order
            && let Some(name) = order.iter().find(|name| self.exclude.contains(name))
        {
            bail!("'{name}' cannot be both ordered and excluded");
        }

        for input in &self.inputs {
            if input == &self.output {
                bail!(
                    "Output file cannot be the same as an input file: {}",
                    self.output.display()
                );
            }
        }

        Ok(())
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        (!self.quiet || self.dry_run) && !self.json
    }
}

/// Apply the naming rule to a user-supplied output name.
///
/// Appends `.pdf` unless the name already ends in it (any case). Blank names
/// fall back to [`DEFAULT_OUTPUT_NAME`].
///
/// ```
/// use pdfsplice::config::output_file_name;
///
/// assert_eq!(output_file_name("report"), "report.pdf");
/// assert_eq!(output_file_name("Report.PDF"), "Report.PDF");
/// ```
pub fn output_file_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return DEFAULT_OUTPUT_NAME.to_string();
    }

    if name.to_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Apply [`output_file_name`] to the last component of `path`.
pub fn output_path(path: &Path) -> PathBuf {
    match path.file_name() {
        Some(name) => path.with_file_name(output_file_name(&name.to_string_lossy())),
        None => path.join(DEFAULT_OUTPUT_NAME),
    }
}
