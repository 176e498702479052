//! PDF parsing from in-memory bytes.
//!
//! Every failure here is reported as [`MergeError::CorruptOrProtectedInput`]
//! naming the source, so the user learns which upload to replace.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::reader::PdfReader;
//! use pdfsplice::source::Source;
//!
//! # fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(&Source::new("a.pdf", bytes))?;
//! println!("{} has {} pages", loaded.name, loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::time::{Duration, Instant};

use crate::error::MergeError;
use crate::source::Source;

/// A parsed PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Name of the source it was parsed from.
    pub name: String,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to parse the document.
    pub load_time: Duration,

    /// Size of the source in bytes.
    pub size: u64,
}

/// Parses uploaded PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Parse an unprotected source.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::CorruptOrProtectedInput`] if the bytes are not
    /// a PDF, the document needs a password, or it has no pages.
    pub fn load(&self, source: &Source) -> Result<LoadedPdf, MergeError> {
        self.load_bytes(source.name(), source.content())
    }

    /// Check that `password` opens the document in `bytes`.
    ///
    /// An unprotected document opens with any password.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::CorruptOrProtectedInput`] if the bytes are not a
    /// PDF or `password` is not its user password.
    pub fn authenticate(
        &self,
        name: &str,
        bytes: &[u8],
        password: &str,
    ) -> Result<(), MergeError> {
        let document = parse(name, bytes)?;
        if !document.is_encrypted() {
            return Ok(());
        }

        document
            .authenticate_user_password(password)
            .map_err(|_| MergeError::corrupt_input(name, "wrong password"))
    }

    fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<LoadedPdf, MergeError> {
        let start = Instant::now();

        let document = parse(name, bytes)?;
        if document.is_encrypted() {
            return Err(MergeError::corrupt_input(
                name,
                "document is password-protected",
            ));
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(MergeError::corrupt_input(name, "PDF has no pages"));
        }

        tracing::trace!(source = name, page_count, "parsed source");

        Ok(LoadedPdf {
            document,
            name: name.to_string(),
            page_count,
            load_time: start.elapsed(),
            size: bytes.len() as u64,
        })
    }
}

fn parse(name: &str, bytes: &[u8]) -> Result<Document, MergeError> {
    Document::load_mem(bytes).map_err(|e| {
        let err_msg = e.to_string();
        if err_msg.contains("encrypt") || err_msg.contains("password") {
            MergeError::corrupt_input(name, format!("document is password-protected ({err_msg})"))
        } else {
            MergeError::corrupt_input(name, err_msg)
        }
    })
}
