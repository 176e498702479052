//! Uploaded sources.
//!
//! A [`Source`] is one uploaded file: a name plus its bytes, never modified
//! after upload. A [`SourceSet`] holds the current uploads in upload order
//! and guarantees names are unique.

use std::fmt;

use crate::error::{PdfSpliceError, Result};

/// One uploaded PDF file.
#[derive(Clone, PartialEq, Eq)]
pub struct Source {
    name: String,
    content: Vec<u8>,
}

impl Source {
    /// Create a source from a name and its bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The name identifying this source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file content.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("size", &self.content.len())
            .finish()
    }
}

/// The currently uploaded sources, in upload order.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    sources: Vec<Source>,
}

impl SourceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source.
    ///
    /// # Errors
    ///
    /// Returns [`PdfSpliceError::DuplicateSource`] if a source with the same
    /// name is already present. The set is left unchanged.
    pub fn insert(&mut self, source: Source) -> Result<()> {
        if self.contains(source.name()) {
            return Err(PdfSpliceError::duplicate_source(source.name()));
        }
        self.sources.push(source);
        Ok(())
    }

    /// Remove a source by name, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Source> {
        let idx = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(idx))
    }

    /// Look up a source by name.
    pub fn get(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Whether a source with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in upload order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(Source::name)
    }

    /// Sources in upload order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether nothing is uploaded.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Pick a name that does not clash with any current upload.
    ///
    /// Returns `name` unchanged when it is free, otherwise inserts ` (2)`,
    /// ` (3)`, ... before the extension the way browsers rename downloads.
    pub fn unique_name(&self, name: &str) -> String {
        if !self.contains(name) {
            return name.to_string();
        }

        let (stem, ext) = match name.rfind('.') {
            Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
            _ => (name, ""),
        };

        (2..)
            .map(|n| format!("{stem} ({n}){ext}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}
