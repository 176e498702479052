//! PDF merging operations.
//!
//! This module provides the core merge functionality:
//! - Ordered concatenation of sources onto one page tree
//! - Inherited page attributes carried onto each page
//! - Compression of the result
//! - Optional password protection
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::merge::MergeEngine;
//! use pdfsplice::source::Source;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let a = Source::new("a.pdf", std::fs::read("a.pdf")?);
//! let b = Source::new("b.pdf", std::fs::read("b.pdf")?);
//!
//! let merged = MergeEngine::new().merge([&a, &b], None)?;
//! std::fs::write("merged.pdf", merged.bytes())?;
//! # Ok(())
//! # }
//! ```

pub mod encrypt;
pub mod engine;
pub mod pages;

pub use engine::{MergeEngine, MergeStatistics, MergedPdf};
pub use pages::PageTree;

use crate::error::MergeError;
use crate::source::Source;

/// Merge `sources` in order with default options.
///
/// Convenience function that creates an engine and performs the merge.
///
/// # Errors
///
/// See [`MergeEngine::merge`].
pub fn merge_sources<'a, I>(sources: I, password: Option<&str>) -> Result<MergedPdf, MergeError>
where
    I: IntoIterator<Item = &'a Source>,
{
    MergeEngine::new().merge(sources, password)
}
