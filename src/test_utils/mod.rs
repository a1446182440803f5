//! Test utilities for modlens.
//!
//! In-memory fixtures for the analysis pipeline: a HashMap-backed
//! [`ContentProvider`], a transcript builder matching the analyzer's
//! line conventions, and a one-shot tracing initializer for tests.
//!
//! Available to integration tests through the `test-utils` cargo
//! feature.

use std::collections::HashMap;
use std::sync::Once;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::source::ContentProvider;

/// Global flag to ensure logging is only initialized once in tests.
static INIT_LOGGING: Once = Once::new();

/// Initialize tracing for tests, once per process.
///
/// Respects `RUST_LOG` when set, defaults to `debug` otherwise.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// In-memory [`ContentProvider`] with exact-path lookup.
///
/// Exact lookup (no fuzzy fallback) keeps `missing` semantics explicit
/// in tests; fuzzy resolution is the zip provider's concern.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    archive_id: String,
    files: HashMap<String, String>,
}

impl MemoryProvider {
    /// Create an empty provider with the given archive id.
    #[must_use]
    pub fn new(archive_id: impl Into<String>) -> Self {
        Self {
            archive_id: archive_id.into(),
            files: HashMap::new(),
        }
    }

    /// Add a file (builder style).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl ContentProvider for MemoryProvider {
    fn archive_id(&self) -> &str {
        &self.archive_id
    }

    async fn get(&self, path: &str) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}

/// Builds diagnostic transcripts using the analyzer's line conventions.
///
/// ```rust,ignore
/// use modlens::test_utils::TranscriptBuilder;
///
/// let transcript = TranscriptBuilder::new()
///     .error(3, 7, "unexpected symbol")
///     .evaluating("shield/guard.lua")
///     .build();
/// assert!(transcript.contains("[3:7] unexpected symbol"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptBuilder {
    lines: Vec<String>,
}

impl TranscriptBuilder {
    /// Start an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `[line:column] message` marker line.
    #[must_use]
    pub fn error(mut self, line: u32, column: u32, message: &str) -> Self {
        self.lines.push(format!("[{line}:{column}] {message}"));
        self
    }

    /// Append an `error evaluating <file>` mention line.
    #[must_use]
    pub fn evaluating(mut self, file: &str) -> Self {
        self.lines.push(format!("error evaluating {file}"));
        self
    }

    /// Append a quoted `in "<file>"` mention line.
    #[must_use]
    pub fn mention(mut self, file: &str) -> Self {
        self.lines.push(format!("failure in \"{file}\""));
        self
    }

    /// Append a raw line verbatim.
    #[must_use]
    pub fn line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    /// Join the accumulated lines into a transcript.
    #[must_use]
    pub fn build(&self) -> String {
        self.lines.join("\n")
    }
}
