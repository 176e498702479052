//! Core merge implementation.
//!
//! Sources are parsed one at a time and their pages moved onto a single
//! output page tree, in the order given. Nothing is produced unless every
//! source was appended and the result serialized.

use lopdf::{Document, dictionary};
use std::io::Cursor;
use std::time::{Duration, Instant};

use crate::config::{CompressionLevel, MergeOptions};
use crate::error::MergeError;
use crate::io::{LoadedPdf, PdfReader, PdfWriter};
use crate::merge::encrypt;
use crate::merge::pages::PageTree;
use crate::source::Source;
use crate::utils::format_file_size;

/// PDF version of a fresh output document.
const BASE_VERSION: &str = "1.5";

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of sources merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total time taken for the merge.
    pub merge_time: Duration,

    /// Time spent parsing sources.
    pub load_time: Duration,

    /// Total size of the inputs.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Compression applied before serialization.
    pub compression: CompressionLevel,

    /// Whether the output is password-protected.
    pub encrypted: bool,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// A finished merge: the serialized document and how it was made.
#[derive(Debug)]
pub struct MergedPdf {
    buffer: Cursor<Vec<u8>>,
    statistics: MergeStatistics,
    sources: Vec<String>,
}

impl MergedPdf {
    /// The serialized PDF.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.get_ref()
    }

    /// Statistics about the merge.
    pub fn statistics(&self) -> &MergeStatistics {
        &self.statistics
    }

    /// Names of the merged sources, in output order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Whether the output needs a password to open.
    pub fn is_encrypted(&self) -> bool {
        self.statistics.encrypted
    }

    /// Readable buffer positioned at the start of the document.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        self.buffer
    }

    /// Take the serialized bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_inner()
    }
}

/// Concatenates ordered PDF sources into one document.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    /// Reader for parsing sources.
    reader: PdfReader,

    /// Output settings.
    options: MergeOptions,
}

impl MergeEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self {
            reader: PdfReader::new(),
            options,
        }
    }

    /// Output settings in use.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `sources` in the order given.
    ///
    /// Pages appear in source order, and within a source in that source's
    /// own page order. A non-empty `password` protects the output with it.
    ///
    /// # Errors
    ///
    /// - [`MergeError::EmptySelection`] if `sources` is empty.
    /// - [`MergeError::CorruptOrProtectedInput`] naming the first source
    ///   that cannot be parsed, is protected, or has no pages.
    /// - [`MergeError::UnexpectedMergeFailure`] for anything else.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfsplice::merge::MergeEngine;
    /// # use pdfsplice::source::Source;
    /// # fn example(a: Source, b: Source) -> Result<(), Box<dyn std::error::Error>> {
    /// let engine = MergeEngine::new();
    /// let merged = engine.merge([&a, &b], Some("Secret1"))?;
    /// println!("Merged {} pages", merged.statistics().total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge<'a, I>(&self, sources: I, password: Option<&str>) -> Result<MergedPdf, MergeError>
    where
        I: IntoIterator<Item = &'a Source>,
    {
        let sources: Vec<&Source> = sources.into_iter().collect();
        let password = password.filter(|p| !p.is_empty());

        self.merge_sources(&sources, password)
            .inspect(|merged| {
                let stats = merged.statistics();
                tracing::info!(
                    files = stats.files_merged,
                    pages = stats.total_pages,
                    output_size = stats.output_size,
                    encrypted = stats.encrypted,
                    elapsed_ms = stats.merge_time.as_millis() as u64,
                    "merge complete"
                );
            })
            .inspect_err(|err| tracing::warn!(%err, "merge failed"))
    }

    fn merge_sources(
        &self,
        sources: &[&Source],
        password: Option<&str>,
    ) -> Result<MergedPdf, MergeError> {
        let merge_start = Instant::now();

        if sources.is_empty() {
            return Err(MergeError::EmptySelection);
        }

        let mut assembly = Assembly::new();
        let mut load_time = Duration::ZERO;

        for source in sources {
            let loaded = self.reader.load(source)?;
            load_time += loaded.load_time;

            let pages = assembly.append(loaded)?;
            tracing::debug!(source = source.name(), pages, "appended source");
        }

        assembly.finish(self.options.compression);
        encrypt::stamp_id(&mut assembly.document, encrypt::document_id(sources.iter().copied()));
        if let Some(password) = password {
            encrypt::protect(&mut assembly.document, password)?;
        }

        let buffer = PdfWriter::to_buffer(&mut assembly.document)?;

        let statistics = MergeStatistics {
            files_merged: sources.len(),
            total_pages: assembly.tree.page_count(),
            merge_time: merge_start.elapsed(),
            load_time,
            input_size: sources.iter().map(|s| s.size()).sum(),
            output_size: buffer.get_ref().len() as u64,
            compression: self.options.compression,
            encrypted: password.is_some(),
        };

        Ok(MergedPdf {
            buffer,
            statistics,
            sources: sources.iter().map(|s| s.name().to_string()).collect(),
        })
    }
}

/// Output document under construction.
///
/// Owns every parsed object until the merge returns; dropping it releases
/// them whether or not the merge got that far.
struct Assembly {
    document: Document,
    tree: PageTree,
}

impl Assembly {
    fn new() -> Self {
        let mut document = Document::with_version(BASE_VERSION);
        let tree = PageTree::new(&mut document);
        Self { document, tree }
    }

    fn append(&mut self, loaded: LoadedPdf) -> Result<usize, MergeError> {
        if version_key(&loaded.document.version) > version_key(&self.document.version) {
            self.document.version = loaded.document.version.clone();
        }
        self.tree.append(&mut self.document, &loaded.name, loaded.document)
    }

    /// Write the page tree and catalog, then compress and renumber.
    fn finish(&mut self, compression: CompressionLevel) {
        self.tree.write(&mut self.document);

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.tree.pages_id(),
        });
        self.document.trailer.set("Root", catalog_id);

        match compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => {
                self.document.compress();
            }
            CompressionLevel::Maximum => {
                self.document.compress();
                self.document.prune_objects();
            }
        }

        self.document.renumber_objects();
    }
}

impl Drop for Assembly {
    fn drop(&mut self) {
        tracing::trace!(
            objects = self.document.objects.len(),
            pages = self.tree.page_count(),
            "released merge assembly"
        );
    }
}

/// Orderable form of a `major.minor` version header.
fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.trim().splitn(2, '.');
    let major = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    (major, minor)
}
