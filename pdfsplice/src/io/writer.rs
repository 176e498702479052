//! PDF serialization.
//!
//! Documents are serialized into memory first ([`PdfWriter::to_buffer`]);
//! saving a finished buffer to disk is a separate, atomic step
//! ([`PdfWriter::save`]) so a failed merge never leaves a partial file.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::io::writer::PdfWriter;
//! use std::path::Path;
//!
//! # fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save(&bytes, Path::new("output.pdf"))?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::{BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::error::{MergeError, PdfSpliceError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self {
            options: WriteOptions::default(),
        }
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without atomic writes.
    pub fn non_atomic() -> Self {
        Self {
            options: WriteOptions {
                atomic: false,
                ..Default::default()
            },
        }
    }

    /// Serialize `doc` into a buffer positioned at offset zero.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::UnexpectedMergeFailure`] if serialization fails.
    pub fn to_buffer(doc: &mut Document) -> std::result::Result<Cursor<Vec<u8>>, MergeError> {
        let mut buffer = Cursor::new(Vec::new());
        doc.save_to(&mut buffer)
            .map_err(|e| MergeError::unexpected(format!("Failed to serialize PDF: {e}")))?;
        buffer.set_position(0);
        Ok(buffer)
    }

    /// Write finished PDF bytes to `path`.
    ///
    /// Parent directories are created as needed. With atomic writes the
    /// bytes go to a sibling `.tmp` file that is renamed over `path` once
    /// flushed.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::FailedToWrite`] if any file operation fails.
    pub fn save(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();
        let path_buf = path.to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }

        let write_path = if self.options.atomic {
            path_buf.with_extension("tmp")
        } else {
            path_buf.clone()
        };

        let file = std::fs::File::create(&write_path).map_err(|e| write_error(&write_path, e))?;
        let mut writer = BufWriter::with_capacity(self.options.buffer_size, file);

        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| write_error(&write_path, e))?;
        drop(writer);

        if self.options.atomic {
            std::fs::rename(&write_path, &path_buf).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                write_error(&path_buf, e)
            })?;
        }

        let file_size = std::fs::metadata(&path_buf)
            .map(|m| m.len())
            .unwrap_or(bytes.len() as u64);

        tracing::debug!(path = %path_buf.display(), file_size, "wrote output");

        Ok(WriteStatistics {
            write_time: start.elapsed(),
            file_size,
            output_path: path_buf,
        })
    }

    /// Check if output file exists.
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(path: &Path, source: std::io::Error) -> PdfSpliceError {
    PdfSpliceError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    }
}
