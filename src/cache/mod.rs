//! Process-wide analysis caches.
//!
//! Two caches back the dependency tree builder:
//!
//! - a **content cache** mapping `"{archive_id}/{path}"` to the decoded
//!   text of that entry (`None` is cached too, so a missing file is only
//!   looked up once per archive snapshot);
//! - a **tree cache** mapping `"{archive_id}/{entry_path}"` to a fully
//!   built [`TreeNode`].
//!
//! Both are optimizations only, never a source of truth: dropping every
//! entry at any point only costs rework. When an archive is reprocessed
//! with a new analysis result, [`AnalysisCache::invalidate_archive`]
//! removes that archive's entries wholesale; there is no partial
//! invalidation.
//!
//! The cache is an explicit object handed to the builder rather than
//! module-level state, so independent sessions (and concurrent test
//! runs) do not interfere.

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::tree::TreeNode;

/// Content and tree caches keyed by archive identity.
#[derive(Debug, Default)]
pub struct AnalysisCache {
    /// `"{archive_id}/{path}"` to decoded content, `None` for absent entries.
    content: DashMap<String, Option<String>>,
    /// `"{archive_id}/{entry_path}"` to finished dependency trees.
    trees: DashMap<String, TreeNode>,
}

/// Composite cache key for a path within an archive.
#[must_use]
pub fn cache_key(archive_id: &str, path: &str) -> String {
    format!("{archive_id}/{path}")
}

impl AnalysisCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached content lookup. The outer `Option` is a cache miss; the
    /// inner `Option` is the provider's answer (absent entries included).
    #[must_use]
    pub fn get_content(&self, archive_id: &str, path: &str) -> Option<Option<String>> {
        let hit = self.content.get(&cache_key(archive_id, path)).map(|entry| entry.value().clone());
        trace!(archive_id, path, hit = hit.is_some(), "content cache lookup");
        hit
    }

    /// Record a provider answer for a path.
    pub fn put_content(&self, archive_id: &str, path: &str, content: Option<String>) {
        self.content.insert(cache_key(archive_id, path), content);
    }

    /// Cached tree lookup for an entry file.
    #[must_use]
    pub fn get_tree(&self, archive_id: &str, entry_path: &str) -> Option<TreeNode> {
        let hit = self.trees.get(&cache_key(archive_id, entry_path)).map(|entry| entry.value().clone());
        trace!(archive_id, entry_path, hit = hit.is_some(), "tree cache lookup");
        hit
    }

    /// Record a finished tree for an entry file.
    pub fn put_tree(&self, archive_id: &str, entry_path: &str, tree: TreeNode) {
        self.trees.insert(cache_key(archive_id, entry_path), tree);
    }

    /// Remove every cached entry belonging to `archive_id`.
    ///
    /// Called when the archive is replaced with a new analysis result;
    /// entries of other archives are untouched.
    pub fn invalidate_archive(&self, archive_id: &str) {
        let prefix = format!("{archive_id}/");
        self.content.retain(|key, _| !key.starts_with(&prefix));
        self.trees.retain(|key, _| !key.starts_with(&prefix));
        debug!(archive_id, "invalidated analysis caches");
    }

    /// Number of cached content entries, for diagnostics.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Number of cached trees, for diagnostics.
    #[must_use]
    pub fn tree_len(&self) -> usize {
        self.trees.len()
    }
}
