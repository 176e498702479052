//! Error types for pdfsplice.
//!
//! Errors are split by the layer that raises them:
//!
//! - [`MergeError`]: the four failure kinds a merge attempt can end in.
//! - [`OrderingError`]: rejected ordering edits.
//! - [`PdfSpliceError`]: everything the front end can surface, wrapping the
//!   two above plus file system and configuration problems.
//!
//! Every error is terminal for the attempt that raised it. Nothing is retried;
//! the user corrects the input and triggers the action again.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfsplice operations.
pub type Result<T> = std::result::Result<T, PdfSpliceError>;

/// Classified failure of a single merge attempt.
///
/// No variant ever comes with partial output: a merge either yields the
/// complete document or one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Nothing is selected at merge time.
    #[error("No files selected: at least one file is required to merge")]
    EmptySelection,

    /// Password protection was requested with a password that fails the
    /// complexity rule.
    #[error("Password must contain at least one upper-case letter and one digit")]
    WeakPassword,

    /// A source could not be parsed, is already password-protected, or has
    /// no pages.
    #[error("Corrupt or password-protected PDF: {name}\n  Reason: {reason}")]
    CorruptOrProtectedInput {
        /// Name of the offending source.
        name: String,
        /// Parser message or the detected condition.
        reason: String,
    },

    /// Any other failure during assembly, encryption or serialization.
    #[error("Merge operation failed: {reason}")]
    UnexpectedMergeFailure {
        /// Underlying cause, shown to the user as-is.
        reason: String,
    },
}

impl MergeError {
    /// Create a CorruptOrProtectedInput error.
    pub fn corrupt_input(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptOrProtectedInput {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnexpectedMergeFailure error.
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::UnexpectedMergeFailure {
            reason: reason.into(),
        }
    }

    /// Name of the source implicated in the failure, if one is known.
    pub fn source_name(&self) -> Option<&str> {
        match self {
            Self::CorruptOrProtectedInput { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True for the failures detected before any PDF is touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptySelection | Self::WeakPassword)
    }
}

/// A rejected edit to the merge order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderingError {
    /// A proposed order is not exactly a permutation of the known names.
    #[error("New order must list every selected file exactly once: {reason}")]
    NotAPermutation {
        /// What is wrong with the proposal.
        reason: String,
    },

    /// A user-supplied position does not exist.
    #[error("Position {index} is out of range (the order has {len} file(s))")]
    IndexOutOfRange {
        /// Requested position (0-based).
        index: usize,
        /// Current number of entries.
        len: usize,
    },

    /// A name that is not among the uploaded files.
    #[error("No uploaded file named '{name}'")]
    UnknownSource {
        /// The unknown name.
        name: String,
    },
}

/// Main error type for the pdfsplice front end.
#[derive(Debug, thiserror::Error)]
pub enum PdfSpliceError {
    /// A merge attempt failed.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// An ordering edit was rejected.
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    /// Two uploads share a name.
    #[error("A file named '{name}' is already uploaded")]
    DuplicateSource {
        /// The clashing name.
        name: String,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output name",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to write the merged document.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<anyhow::Error> for PdfSpliceError {
    fn from(err: anyhow::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}

impl PdfSpliceError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a DuplicateSource error.
    pub fn duplicate_source(name: impl Into<String>) -> Self {
        Self::DuplicateSource { name: name.into() }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// The merge failure wrapped by this error, if any.
    pub fn as_merge_error(&self) -> Option<&MergeError> {
        match self {
            Self::Merge(err) => Some(err),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Merge(MergeError::EmptySelection | MergeError::WeakPassword) => 1,
            Self::Merge(MergeError::CorruptOrProtectedInput { .. }) => 3,
            Self::Merge(MergeError::UnexpectedMergeFailure { .. }) => 6,
            Self::Ordering(_) => 1,
            Self::DuplicateSource { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_corrupt_input_display_names_source() {
        let err = MergeError::corrupt_input("bad.pdf", "invalid file header");
        let msg = err.to_string();
        assert!(msg.contains("bad.pdf"));
        assert!(msg.contains("invalid file header"));
        assert_eq!(err.source_name(), Some("bad.pdf"));
    }

    #[test]
    fn test_unexpected_failure_carries_cause() {
        let err = MergeError::unexpected("disk on fire");
        assert!(err.to_string().contains("disk on fire"));
        assert_eq!(err.source_name(), None);
    }

    #[test]
    fn test_is_validation() {
        assert!(MergeError::EmptySelection.is_validation());
        assert!(MergeError::WeakPassword.is_validation());
        assert!(!MergeError::corrupt_input("a.pdf", "x").is_validation());
        assert!(!MergeError::unexpected("x").is_validation());
    }

    #[test]
    fn test_ordering_error_display() {
        let err = OrderingError::IndexOutOfRange { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_merge_error_is_transparent() {
        let err: PdfSpliceError = MergeError::WeakPassword.into();
        assert_eq!(err.to_string(), MergeError::WeakPassword.to_string());
        assert_eq!(err.as_merge_error(), Some(&MergeError::WeakPassword));
    }

    #[test]
    fn test_output_exists_display() {
        let err = PdfSpliceError::output_exists(PathBuf::from("existing.pdf"));
        let msg = format!("{err}");
        assert!(msg.contains("already exists"));
        assert!(msg.contains("existing.pdf"));
        assert!(msg.contains("--force"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PdfSpliceError::from(MergeError::EmptySelection).exit_code(), 1);
        assert_eq!(
            PdfSpliceError::from(MergeError::corrupt_input("x", "y")).exit_code(),
            3
        );
        assert_eq!(
            PdfSpliceError::from(MergeError::unexpected("y")).exit_code(),
            6
        );
        assert_eq!(
            PdfSpliceError::file_not_found(PathBuf::from("x")).exit_code(),
            2
        );
        assert_eq!(
            PdfSpliceError::output_exists(PathBuf::from("x")).exit_code(),
            4
        );
        assert_eq!(PdfSpliceError::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let err: PdfSpliceError = io_err.into();
        assert!(matches!(err, PdfSpliceError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_anyhow_is_config_error() {
        let err: PdfSpliceError = anyhow::anyhow!("bad flag").into();
        assert!(matches!(err, PdfSpliceError::InvalidConfig { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
