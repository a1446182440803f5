//! Diagnostic transcript parsing and error-to-file attribution.
//!
//! The external analyzer emits one raw transcript per run: a combined
//! stdout/stderr-like stream where error locations appear as leading
//! `[line:column]` markers and the failing file is mentioned separately,
//! at or after the errors it explains. Nothing in the transcript ties a
//! marker to a file directly, so attribution is genuine inference:
//!
//! 1. every line with a leading `[line:column]` marker becomes an
//!    unplaced [`ErrorLocation`];
//! 2. every line is scanned for file mentions (a quoted `*.lua` path or
//!    a bare `evaluating <path>.lua`);
//! 3. an association strategy assigns mentions to locations — the
//!    default, [`assign_trailing_mentions`], lets each mention claim
//!    every still-unassigned location that appeared before it;
//! 4. locations no mention ever claims default to the archive's
//!    conventional entry file;
//! 5. the resulting records are grouped by file into an index, queried
//!    with fuzzy path matching.
//!
//! A malformed or empty transcript yields an empty index, never an error.

use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

use crate::constants::DEFAULT_ENTRY_FILE;
use crate::matcher::find_best_path_match;

/// One diagnostic message anchored to a source location.
///
/// Line and column are 1-based, exactly as reported by the analyzer.
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ErrorRecord {
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
    /// Message text after the `[line:column]` marker.
    pub message: String,
}

/// An error location lifted from the transcript but not yet attributed
/// to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Index of the transcript line the marker appeared on.
    pub line_index: usize,
    /// 1-based source line from the marker.
    pub line: u32,
    /// 1-based source column from the marker.
    pub column: u32,
    /// Remainder of the transcript line after the marker.
    pub message: String,
}

/// A file path mentioned somewhere in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMention {
    /// Index of the transcript line the mention appeared on.
    pub line_index: usize,
    /// The mentioned path, exactly as written in the transcript.
    pub file: String,
}

/// Association strategy: decides which mentioned file each error
/// location belongs to. Returns one entry per location; `None` leaves
/// the location for the entry-file fallback.
///
/// Pluggable so an analyzer with a different output convention can
/// supply its own rule without touching the rest of the pipeline.
pub type AssociationFn = fn(&[ErrorLocation], &[FileMention]) -> Vec<Option<String>>;

/// Default association rule: mentions claim trailing errors.
///
/// For every mention at transcript index `m`, in mention order, assign
/// that mention's file to every still-unassigned location whose index is
/// strictly less than `m`. The first mention to reach a location wins.
/// This reflects the observed analyzer, which prints the failing file
/// context after or alongside the failing lines.
///
/// Known limitation: when two files are mentioned close together, the
/// earlier mention can over-claim locations that belong to the later,
/// unrelated file. The transcript itself is ambiguous in that case; the
/// engine is best-effort, not exact.
#[must_use]
pub fn assign_trailing_mentions(
    locations: &[ErrorLocation],
    mentions: &[FileMention],
) -> Vec<Option<String>> {
    let mut assignment: Vec<Option<String>> = vec![None; locations.len()];

    for mention in mentions {
        for (slot, location) in assignment.iter_mut().zip(locations) {
            if slot.is_none() && location.line_index < mention.line_index {
                *slot = Some(mention.file.clone());
            }
        }
    }

    assignment
}

/// Parses diagnostic transcripts and answers per-file error queries.
///
/// Holds the index built from the last [`parse_errors`](Self::parse_errors)
/// call together with the raw transcript it was derived from; the index
/// lives exactly as long as the analysis result and is rebuilt whenever a
/// new transcript arrives.
pub struct ErrorAttributor {
    transcript: String,
    index: BTreeMap<String, Vec<ErrorRecord>>,
    fallback_file: String,
    associate: AssociationFn,
}

impl ErrorAttributor {
    /// Create an attributor with the conventional entry-file fallback and
    /// the default association strategy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transcript: String::new(),
            index: BTreeMap::new(),
            fallback_file: DEFAULT_ENTRY_FILE.to_string(),
            associate: assign_trailing_mentions,
        }
    }

    /// Use a different fallback file for errors no mention claims.
    #[must_use]
    pub fn with_fallback(mut self, file: impl Into<String>) -> Self {
        self.fallback_file = file.into();
        self
    }

    /// Use a different association strategy.
    #[must_use]
    pub fn with_strategy(mut self, associate: AssociationFn) -> Self {
        self.associate = associate;
        self
    }

    /// The raw transcript the current index was built from.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Rebuild the internal index from a transcript.
    ///
    /// Replaces any previously parsed state. Malformed input degrades to
    /// an empty index; a transcript with markers but no file mentions
    /// attributes everything to the fallback entry file.
    pub fn parse_errors(&mut self, transcript: &str) {
        self.transcript = transcript.to_string();
        self.index.clear();

        let locations = extract_locations(transcript);
        let mentions = extract_mentions(transcript);
        debug!(
            locations = locations.len(),
            mentions = mentions.len(),
            "parsed diagnostic transcript"
        );

        let assignment = (self.associate)(&locations, &mentions);

        for (location, assigned) in locations.into_iter().zip(assignment) {
            let file = assigned.unwrap_or_else(|| self.fallback_file.clone());
            self.index.entry(file).or_default().push(ErrorRecord {
                line: location.line,
                column: location.column,
                message: location.message,
            });
        }
    }

    /// Errors for the indexed file closest to `file_name`, as a defensive
    /// copy. Empty when nothing matches.
    #[must_use]
    pub fn errors_for_file(&self, file_name: &str) -> Vec<ErrorRecord> {
        find_best_path_match(file_name, self.index.keys().map(String::as_str))
            .and_then(|key| self.index.get(key))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether any indexed file matches `file_name`.
    #[must_use]
    pub fn has_errors(&self, file_name: &str) -> bool {
        !self.errors_for_file(file_name).is_empty()
    }

    /// All files with at least one attributed error, in index order.
    #[must_use]
    pub fn files_with_errors(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    /// Total number of attributed errors across all files.
    #[must_use]
    pub fn total_error_count(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }
}

impl Default for ErrorAttributor {
    fn default() -> Self {
        Self::new()
    }
}

/// Lift `[line:column]` markers out of the transcript.
fn extract_locations(transcript: &str) -> Vec<ErrorLocation> {
    let mut locations = Vec::new();

    if let Ok(marker) = Regex::new(r"^\s*\[\s*(\d+)\s*:\s*(\d+)\s*\]\s*(.*)$") {
        for (line_index, text) in transcript.lines().enumerate() {
            if let Some(capture) = marker.captures(text) {
                // Out-of-range numbers mean the line is not a real
                // marker; skip rather than fail.
                let (Ok(line), Ok(column)) = (capture[1].parse(), capture[2].parse()) else {
                    continue;
                };
                locations.push(ErrorLocation {
                    line_index,
                    line,
                    column,
                    message: capture[3].to_string(),
                });
            }
        }
    }

    locations
}

/// Scan every transcript line for file-mention patterns.
fn extract_mentions(transcript: &str) -> Vec<FileMention> {
    let mut mentions = Vec::new();

    // A quoted `*.lua` path (covers `in "<path>.lua"`), the same with
    // single quotes, and a bare `evaluating <path>.lua`.
    let patterns = [
        r#""([^"]+\.lua)""#,
        r"'([^']+\.lua)'",
        r"evaluating\s+([\w./\\-]+\.lua)",
    ];
    let regexes: Vec<Regex> = patterns.iter().filter_map(|p| Regex::new(p).ok()).collect();

    for (line_index, text) in transcript.lines().enumerate() {
        let mut line_mentions: Vec<(usize, String)> = Vec::new();
        for regex in &regexes {
            for capture in regex.captures_iter(text) {
                if let Some(file) = capture.get(1) {
                    line_mentions.push((file.start(), file.as_str().to_string()));
                }
            }
        }
        line_mentions.sort_by_key(|(offset, _)| *offset);
        mentions.extend(line_mentions.into_iter().map(|(_, file)| FileMention {
            line_index,
            file,
        }));
    }

    mentions
}
