//! Content providers: where archive file bytes come from.
//!
//! The analysis layer never touches an archive container directly; it
//! reads file text through the [`ContentProvider`] seam. The production
//! implementation is [`ZipContentProvider`], which decodes an opened zip
//! archive up front (archives are bounded, tens to low hundreds of
//! files) and resolves requested paths fuzzily: archive entries carry
//! full internal paths while callers frequently hold a shorter relative
//! form.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, trace};
use zip::ZipArchive;

use crate::core::ModlensError;
use crate::matcher::find_best_path_match;

/// Supplies decoded text content for paths within one archive snapshot.
///
/// `get` must be idempotent for a given snapshot: asking for the same
/// path twice returns the same answer. Returning `Ok(None)` means the
/// path does not exist in the archive (or is not text); it is not an
/// error.
pub trait ContentProvider: Send + Sync {
    /// Stable identity of the archive, used as the cache key prefix.
    fn archive_id(&self) -> &str;

    /// Decoded text content for `path`, or `None` if the archive has no
    /// such entry.
    fn get(&self, path: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Zip-backed [`ContentProvider`].
///
/// All text entries are decoded once at open time; binary entries (not
/// valid UTF-8) are silently dropped, which is why the dependency tree
/// builder treats the analyzer's missing-file report as a stronger
/// signal than a failed lookup here.
#[derive(Debug)]
pub struct ZipContentProvider {
    archive_id: String,
    entries: HashMap<String, String>,
}

impl ZipContentProvider {
    /// Open a zip archive from disk.
    ///
    /// The archive id is derived from the file stem, e.g.
    /// `mods/shield-generator.zip` gets the id `shield-generator`.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ModlensError::ArchiveNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let archive_id = path
            .file_stem()
            .map_or_else(|| "archive".to_string(), |stem| stem.to_string_lossy().to_string());

        let file = File::open(path)?;
        let mut archive =
            ZipArchive::new(file).map_err(|err| ModlensError::ArchiveReadError {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let mut entries = HashMap::new();
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().trim_start_matches("./").to_string();

            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            match String::from_utf8(bytes) {
                Ok(text) => {
                    entries.insert(name, text);
                }
                Err(_) => {
                    // Binary entry; the analysis layer only reads text.
                    trace!(entry = %name, "skipping non-UTF-8 archive entry");
                }
            }
        }

        debug!(archive_id, entries = entries.len(), "opened zip archive");
        Ok(Self {
            archive_id,
            entries,
        })
    }

    /// Build a provider from already-decoded entries, for callers that
    /// hold content from elsewhere (e.g. an extracted store).
    #[must_use]
    pub fn from_entries(archive_id: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            archive_id: archive_id.into(),
            entries,
        }
    }

    /// All entry paths stored in the archive.
    pub fn entry_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn lookup(&self, path: &str) -> Option<String> {
        if let Some(content) = self.entries.get(path) {
            return Some(content.clone());
        }
        // Fuzzy fallback: the caller may hold a shorter relative form of
        // a nested entry path.
        find_best_path_match(path, self.entries.keys().map(String::as_str))
            .and_then(|key| self.entries.get(key))
            .cloned()
    }
}

impl ContentProvider for ZipContentProvider {
    fn archive_id(&self) -> &str {
        &self.archive_id
    }

    async fn get(&self, path: &str) -> Result<Option<String>> {
        Ok(self.lookup(path))
    }
}
