//! Per-user merge session.
//!
//! A [`Session`] owns one user's uploads, their merge order and the set of
//! uploads currently left out of the merge. Sessions share nothing, so two
//! users never see each other's order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfsplice::merge::MergeEngine;
//! use pdfsplice::ordering::OrderCommand;
//! use pdfsplice::session::Session;
//!
//! # fn example(a: Vec<u8>, b: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new();
//! session.upload("a.pdf", a)?;
//! session.upload("b.pdf", b)?;
//! session.apply(OrderCommand::MoveUp(1))?;
//!
//! let download = session.merge(&MergeEngine::new(), Some("Secret1"), "report")?;
//! assert_eq!(download.file_name, "report.pdf");
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use crate::config::{PDF_MIME_TYPE, output_file_name};
use crate::error::{MergeError, OrderingError, Result};
use crate::merge::{MergeEngine, MergedPdf};
use crate::ordering::{OrderCommand, OrderingStore};
use crate::password::check_password;
use crate::source::{Source, SourceSet};

/// A validated merge, ready for the engine.
#[derive(Debug)]
pub struct MergeRequest<'a> {
    /// Sources in merge order.
    pub sources: Vec<&'a Source>,

    /// Password to protect the output with, if any.
    pub password: Option<&'a str>,

    /// Name to offer the result under.
    pub file_name: String,
}

/// A finished merge as handed back to the user.
#[derive(Debug)]
pub struct Download {
    /// File name with the `.pdf` suffix applied.
    pub file_name: String,

    /// Always `application/pdf`.
    pub mime_type: &'static str,

    /// The merged document.
    pub merged: MergedPdf,
}

/// One user's uploads and merge order.
#[derive(Debug, Clone, Default)]
pub struct Session {
    sources: SourceSet,
    ordering: OrderingStore,
    deselected: BTreeSet<String>,
}

impl Session {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an upload. It joins the end of the merge order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PdfSpliceError::DuplicateSource`] if the name is
    /// already uploaded.
    pub fn upload(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Result<()> {
        let source = Source::new(name, content);
        tracing::debug!(source = source.name(), size = source.size(), "uploaded source");
        self.sources.insert(source)?;
        self.refresh();
        Ok(())
    }

    /// Delete an upload.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::UnknownSource`] if nothing has this name.
    pub fn remove(&mut self, name: &str) -> Result<Source> {
        let source = self
            .sources
            .remove(name)
            .ok_or_else(|| unknown_source(name))?;
        self.deselected.remove(name);
        self.refresh();
        Ok(source)
    }

    /// Leave an upload out of the merge without deleting it.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::UnknownSource`] if nothing has this name.
    pub fn deselect(&mut self, name: &str) -> Result<()> {
        self.check_known(name)?;
        self.deselected.insert(name.to_string());
        self.refresh();
        Ok(())
    }

    /// Put a deselected upload back. It rejoins at the end of the order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::UnknownSource`] if nothing has this name.
    pub fn select(&mut self, name: &str) -> Result<()> {
        self.check_known(name)?;
        self.deselected.remove(name);
        self.refresh();
        Ok(())
    }

    /// Apply a reorder command.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::IndexOutOfRange`] for a position past the
    /// end of the order, or whatever [`OrderingStore::apply`] rejects. The
    /// order is unchanged on error.
    pub fn apply(&mut self, command: OrderCommand) -> Result<()> {
        let len = self.ordering.len();
        if let Some(index) = command.indices().into_iter().find(|&i| i >= len) {
            return Err(OrderingError::IndexOutOfRange { index, len }.into());
        }
        self.ordering.apply(command)?;
        Ok(())
    }

    /// Names in merge order.
    pub fn order(&self) -> &[String] {
        self.ordering.current_order()
    }

    /// All uploads, selected or not.
    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Whether `name` is uploaded but left out of the merge.
    pub fn is_deselected(&self, name: &str) -> bool {
        self.deselected.contains(name)
    }

    /// Validate a merge attempt.
    ///
    /// Checks run in this order: something must be selected, then a
    /// non-empty password must pass [`crate::password::is_valid_password`].
    /// The output name gets the `.pdf` rule applied.
    ///
    /// # Errors
    ///
    /// [`MergeError::EmptySelection`] or [`MergeError::WeakPassword`].
    pub fn prepare<'a>(
        &'a self,
        password: Option<&'a str>,
        output_name: &str,
    ) -> std::result::Result<MergeRequest<'a>, MergeError> {
        if self.ordering.is_empty() {
            return Err(MergeError::EmptySelection);
        }
        let password = check_password(password)?;

        let sources = self
            .ordering
            .current_order()
            .iter()
            .map(|name| {
                self.sources.get(name).ok_or_else(|| {
                    MergeError::unexpected(format!("'{name}' is ordered but not uploaded"))
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(MergeRequest {
            sources,
            password,
            file_name: output_file_name(output_name),
        })
    }

    /// Validate and run a merge of the current order.
    ///
    /// The session is left as it was whatever the outcome, so a failed
    /// attempt can be corrected and retried.
    ///
    /// # Errors
    ///
    /// Any [`MergeError`] from [`Self::prepare`] or [`MergeEngine::merge`].
    pub fn merge(
        &self,
        engine: &MergeEngine,
        password: Option<&str>,
        output_name: &str,
    ) -> std::result::Result<Download, MergeError> {
        let request = self.prepare(password, output_name)?;
        let merged = engine.merge(request.sources.iter().copied(), request.password)?;

        Ok(Download {
            file_name: request.file_name,
            mime_type: PDF_MIME_TYPE,
            merged,
        })
    }

    fn check_known(&self, name: &str) -> Result<()> {
        if self.sources.contains(name) {
            Ok(())
        } else {
            Err(unknown_source(name))
        }
    }

    fn refresh(&mut self) {
        let selected = self
            .sources
            .names()
            .filter(|name| !self.deselected.contains(*name));
        self.ordering.reconcile(selected);
    }
}

fn unknown_source(name: &str) -> crate::PdfSpliceError {
    OrderingError::UnknownSource {
        name: name.to_string(),
    }
    .into()
}
