//! Machine-readable merge report.

use serde::Serialize;
use std::path::Path;

use crate::config::{CompressionLevel, PDF_MIME_TYPE};
use crate::session::Download;

/// What a run did, or would do in a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    /// Where the output went (or would go).
    pub output: String,

    /// MIME type of the output.
    pub mime_type: &'static str,

    /// Sources in merge order.
    pub sources: Vec<String>,

    /// Pages in the output. Counted from the inputs in a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,

    /// Total input size in bytes.
    pub input_size: u64,

    /// Output size in bytes. `None` in a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<u64>,

    /// Compression level name.
    pub compression: &'static str,

    /// Whether the output is password-protected.
    pub encrypted: bool,

    /// True when nothing was written.
    pub dry_run: bool,

    /// Wall time of the merge in milliseconds.
    pub elapsed_ms: u64,
}

impl MergeSummary {
    /// Summarize a finished merge written to `output`.
    pub fn from_download(download: &Download, output: &Path) -> Self {
        let stats = download.merged.statistics();
        Self {
            output: output.display().to_string(),
            mime_type: download.mime_type,
            sources: download.merged.sources().to_vec(),
            total_pages: Some(stats.total_pages),
            input_size: stats.input_size,
            output_size: Some(stats.output_size),
            compression: stats.compression.as_str(),
            encrypted: stats.encrypted,
            dry_run: false,
            elapsed_ms: stats.merge_time.as_millis() as u64,
        }
    }

    /// Summarize a merge that was planned but not run.
    pub fn planned(
        output: &Path,
        sources: &[String],
        input_size: u64,
        compression: CompressionLevel,
        encrypted: bool,
    ) -> Self {
        Self {
            output: output.display().to_string(),
            mime_type: PDF_MIME_TYPE,
            sources: sources.to_vec(),
            total_pages: None,
            input_size,
            output_size: None,
            compression: compression.as_str(),
            encrypted,
            dry_run: true,
            elapsed_ms: 0,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
