//! Recursive resolution of file-inclusion relationships.
//!
//! [`DependencyTreeBuilder::build_file_tree`] expands an entry file into
//! a [`TreeNode`] hierarchy by parsing its include directives, fetching
//! each target through a [`ContentProvider`], and recursing. Two pieces
//! of per-build state keep the traversal bounded:
//!
//! - `path_stack` holds the ancestors of the current branch; reaching a
//!   path already on the stack is a cycle, and the node is marked
//!   `circular` with no children;
//! - `visited` holds every path expanded anywhere in this build;
//!   reaching one again via a different, non-cyclic branch produces an
//!   unexpanded leaf with no flags set, bounding total work to one
//!   expansion per distinct path.
//!
//! A single `visited` set cannot do both jobs: it would falsely suppress
//! legitimate re-occurrence of a file reachable by two independent paths
//! and could not distinguish "cycle" from "already handled".
//!
//! A node is `missing` when the analyzer's missing-file report names its
//! path, or when the content provider has no entry for it. The report is
//! consulted first: the provider may simply not retain binary or
//! irrelevant files, so diagnostic evidence is the stronger signal.
//!
//! Content reads are awaited sequentially in depth-first order. Siblings
//! are never fetched concurrently; the traversal order (and therefore
//! cycle reporting) stays deterministic.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::AnalysisCache;
use crate::includes::parse_includes_from_lua;
use crate::matcher::paths_match;
use crate::source::ContentProvider;

/// One file in the inclusion hierarchy.
///
/// Each node is exclusively owned by its parent; a file included from
/// two places appears as two distinct nodes even though the underlying
/// include graph converges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Path as written in the include directive (entry path for the root).
    pub path: String,
    /// Resolved includes of this file, in directive order.
    pub children: Vec<TreeNode>,
    /// The file could not be supplied by the content provider, or the
    /// analyzer independently reported it missing.
    pub missing: bool,
    /// Expanding this node would re-enter an ancestor of the current
    /// branch; traversal stopped here.
    pub circular: bool,
}

impl TreeNode {
    /// A plain node with no children and no flags.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            children: Vec::new(),
            missing: false,
            circular: false,
        }
    }

    /// Total number of nodes in this subtree, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Render the subtree with box-drawing connectors, one node per
    /// line, with `(missing)` / `(circular)` markers.
    #[must_use]
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.label());
        out.push('\n');
        for (index, child) in self.children.iter().enumerate() {
            child.render_into(&mut out, "", index == self.children.len() - 1);
        }
        out
    }

    fn label(&self) -> String {
        if self.circular {
            format!("{} (circular)", self.path)
        } else if self.missing {
            format!("{} (missing)", self.path)
        } else {
            self.path.clone()
        }
    }

    fn render_into(&self, out: &mut String, prefix: &str, is_last: bool) {
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(&format!("{prefix}{connector}{}\n", self.label()));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        for (index, child) in self.children.iter().enumerate() {
            child.render_into(out, &child_prefix, index == self.children.len() - 1);
        }
    }
}

/// Builds dependency trees from include directives, caching finished
/// trees per `(archive, entry file)`.
pub struct DependencyTreeBuilder {
    cache: Arc<AnalysisCache>,
    missing_report: HashSet<String>,
}

impl DependencyTreeBuilder {
    /// Create a builder over an injected cache.
    #[must_use]
    pub fn new(cache: Arc<AnalysisCache>) -> Self {
        Self {
            cache,
            missing_report: HashSet::new(),
        }
    }

    /// Attach the analyzer's missing-file report: paths the external
    /// analyzer itself flagged as unresolvable.
    #[must_use]
    pub fn with_missing_report(mut self, paths: HashSet<String>) -> Self {
        self.missing_report = paths;
        self
    }

    /// Resolve `entry_path` and everything it transitively includes into
    /// a tree.
    ///
    /// Unresolvable includes become `missing` nodes and cycles become
    /// `circular` nodes; neither aborts sibling processing. Errors only
    /// arise from the content provider itself (e.g. an unreadable
    /// archive), never from the shape of the include graph.
    pub async fn build_file_tree<P: ContentProvider>(
        &self,
        provider: &P,
        entry_path: &str,
    ) -> Result<TreeNode> {
        let archive_id = provider.archive_id();
        if let Some(tree) = self.cache.get_tree(archive_id, entry_path) {
            debug!(archive_id, entry_path, "dependency tree served from cache");
            return Ok(tree);
        }

        let mut path_stack = Vec::new();
        let mut visited = HashSet::new();
        let tree = self
            .expand_node(provider, entry_path.to_string(), &mut path_stack, &mut visited)
            .await?;

        debug!(archive_id, entry_path, nodes = tree.node_count(), "built dependency tree");
        self.cache.put_tree(archive_id, entry_path, tree.clone());
        Ok(tree)
    }

    async fn expand_node<P: ContentProvider>(
        &self,
        provider: &P,
        path: String,
        path_stack: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) -> Result<TreeNode> {
        if path_stack.contains(&path) {
            trace!(%path, "include cycle, stopping branch");
            let mut node = TreeNode::new(path);
            node.circular = true;
            return Ok(node);
        }

        if !visited.insert(path.clone()) {
            // Reached via a different branch; already fully expanded
            // elsewhere in this build.
            trace!(%path, "already expanded, leaving unexpanded leaf");
            return Ok(TreeNode::new(path));
        }

        if self.reported_missing(&path) {
            trace!(%path, "analyzer reported file missing");
            let mut node = TreeNode::new(path);
            node.missing = true;
            return Ok(node);
        }

        let Some(content) = self.fetch_content(provider, &path).await? else {
            trace!(%path, "content provider has no entry");
            let mut node = TreeNode::new(path);
            node.missing = true;
            return Ok(node);
        };

        let mut node = TreeNode::new(path.clone());
        path_stack.push(path);
        for target in parse_includes_from_lua(&content) {
            let child =
                Box::pin(self.expand_node(provider, target, path_stack, visited)).await?;
            node.children.push(child);
        }
        path_stack.pop();

        Ok(node)
    }

    /// Whether the analyzer's report names this path, matched fuzzily
    /// since reported paths are not necessarily archive-relative.
    fn reported_missing(&self, path: &str) -> bool {
        self.missing_report
            .iter()
            .any(|reported| reported == path || paths_match(reported, path))
    }

    async fn fetch_content<P: ContentProvider>(
        &self,
        provider: &P,
        path: &str,
    ) -> Result<Option<String>> {
        let archive_id = provider.archive_id();
        if let Some(cached) = self.cache.get_content(archive_id, path) {
            return Ok(cached);
        }

        let content = provider.get(path).await?;
        self.cache.put_content(archive_id, path, content.clone());
        Ok(content)
    }
}
