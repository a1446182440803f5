//! Error handling for modlens.
//!
//! The error system has two layers:
//! 1. [`ModlensError`] - strongly-typed error variants for precise handling
//!    in code
//! 2. [`ErrorContext`] - a wrapper that adds user-friendly messages and
//!    actionable suggestions for CLI display
//!
//! Note that the analysis layer itself (matching, attribution, tree
//! building) almost never produces these errors: absent transcripts yield
//! empty indexes, unresolvable includes become `missing` nodes, and cycles
//! become `circular` nodes. [`ModlensError`] covers real environment
//! failures such as an unreadable archive or a malformed configuration
//! file, which are surfaced at the CLI boundary via
//! [`user_friendly_error`].

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for modlens operations.
///
/// Each variant carries the context needed to produce an actionable
/// message; conversions from common library errors are provided so `?`
/// works at call sites.
#[derive(Error, Debug)]
pub enum ModlensError {
    /// The archive file does not exist on disk.
    #[error("archive not found: {path}")]
    ArchiveNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The archive exists but could not be opened or decoded as a zip.
    #[error("failed to read archive '{path}': {reason}")]
    ArchiveReadError {
        /// Path of the offending archive.
        path: PathBuf,
        /// Underlying decode failure.
        reason: String,
    },

    /// An archive entry could not be decoded as text.
    #[error("entry '{path}' in archive '{archive_id}' is not valid UTF-8")]
    EntryDecodeError {
        /// Archive identity.
        archive_id: String,
        /// Entry path within the archive.
        path: String,
    },

    /// A transcript file passed on the command line could not be read.
    #[error("failed to read transcript '{path}': {reason}")]
    TranscriptReadError {
        /// Path of the transcript file.
        path: PathBuf,
        /// Underlying IO failure.
        reason: String,
    },

    /// The configuration file exists but is not valid TOML.
    #[error("invalid configuration file '{path}': {reason}")]
    ConfigParseError {
        /// Path of the configuration file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// IO error from [`std::io::Error`].
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Zip decode error from the `zip` crate.
    #[error("zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

/// User-facing wrapper around an error, with an optional suggestion and
/// details block rendered below the message.
pub struct ErrorContext {
    /// The wrapped error.
    pub error: anyhow::Error,
    /// A short actionable hint ("check that the path points to a .zip").
    pub suggestion: Option<String>,
    /// Longer free-form details, shown dimmed.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no suggestion or details.
    pub fn new(error: impl Into<anyhow::Error>) -> Self {
        Self {
            error: error.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach an actionable suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a details block.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        if let Some(ref details) = self.details {
            eprintln!("  {}", details.dimmed());
        }
        if let Some(ref suggestion) = self.suggestion {
            eprintln!("{} {}", "hint:".yellow().bold(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(ref details) = self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion matched to
/// the failure mode, for display at the CLI boundary.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let suggestion = match error.downcast_ref::<ModlensError>() {
        Some(ModlensError::ArchiveNotFound { .. }) => {
            Some("check that the archive path is correct and the file exists".to_string())
        }
        Some(ModlensError::ArchiveReadError { .. } | ModlensError::ZipError(_)) => {
            Some("the file must be a valid zip archive containing the mod's sources".to_string())
        }
        Some(ModlensError::EntryDecodeError { .. }) => {
            Some("only UTF-8 encoded Lua sources can be analyzed".to_string())
        }
        Some(ModlensError::TranscriptReadError { .. }) => {
            Some("pass the path of the analyzer's combined output file".to_string())
        }
        Some(ModlensError::ConfigParseError { .. }) => {
            Some("fix or remove modlens.toml; all settings have defaults".to_string())
        }
        _ => None,
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(s) = suggestion {
        ctx = ctx.with_suggestion(s);
    }
    ctx
}
