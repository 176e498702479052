//! Output formatting and display for pdfsplice.
//!
//! This module handles all user-facing output:
//! - Formatted status messages
//! - Error and warning display
//! - The merge order listing
//! - A JSON summary for scripts
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::output::OutputFormatter;
//! use pdfsplice::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Merging 3 file(s)...");
//! formatter.success("Wrote merged.pdf");
//! # }
//! ```

pub mod formatter;
pub mod summary;

pub use formatter::{MessageLevel, OutputFormatter};
pub use summary::MergeSummary;

use crate::merge::MergeStatistics;

/// Display merge statistics to the user.
pub fn display_merge_statistics(formatter: &OutputFormatter, stats: &MergeStatistics) {
    formatter.info(&format!(
        "Merged {} file(s) in {:.2}s: {} pages, {} in, {} out",
        stats.files_merged,
        stats.merge_time.as_secs_f64(),
        stats.total_pages,
        stats.format_input_size(),
        stats.format_output_size()
    ));

    formatter.detail("Compression", stats.compression.as_str());
    formatter.detail("Parse time", &format!("{:.2}s", stats.load_time.as_secs_f64()));
    if stats.encrypted {
        formatter.detail("Protection", "password (RC4 128-bit)");
    }
}
