//! pdfsplice - Merge PDF files in a user-chosen order.
//!
//! This library concatenates uploaded PDF documents into one, in an order
//! the user controls, optionally protecting the result with a password.
//! It provides:
//!
//! - A stable, user-editable merge order ([`ordering::OrderingStore`])
//! - All-or-nothing merging of in-memory sources ([`merge::MergeEngine`])
//! - Password protection of the output
//! - Per-user sessions tying uploads, order and merge together
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use pdfsplice::merge::MergeEngine;
//! use pdfsplice::ordering::OrderCommand;
//! use pdfsplice::session::Session;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.upload("cover.pdf", std::fs::read("cover.pdf")?)?;
//! session.upload("body.pdf", std::fs::read("body.pdf")?)?;
//! session.apply(OrderCommand::MoveDown(0))?;
//!
//! let download = session.merge(&MergeEngine::new(), Some("Secret1"), "report")?;
//! std::fs::write(&download.file_name, download.merged.bytes())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the engine directly
//!
//! ```no_run
//! use pdfsplice::merge::merge_sources;
//! use pdfsplice::source::Source;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let a = Source::new("a.pdf", std::fs::read("a.pdf")?);
//! let b = Source::new("b.pdf", std::fs::read("b.pdf")?);
//!
//! let merged = merge_sources([&b, &a], None)?;
//! println!("{} pages", merged.statistics().total_pages);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod ordering;
pub mod output;
pub mod password;
pub mod session;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{MergeError, OrderingError, PdfSpliceError, Result};
pub use merge::{MergeEngine, MergedPdf};
pub use ordering::{OrderCommand, OrderingStore};
pub use password::is_valid_password;
pub use session::{Download, Session};
pub use source::Source;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
