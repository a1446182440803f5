//! modlens - dependency and diagnostic analysis for Lua mod archives.
//!
//! modlens turns two loosely-structured text artifacts — a flat archive
//! of Lua source files and the raw diagnostic transcript of an external
//! analyzer run — into structured, navigable models:
//!
//! - a per-file mapping of diagnostic messages to source locations, and
//! - a hierarchical, cycle-safe dependency tree of file-inclusion
//!   relationships, with a flat graph projection for display layers.
//!
//! The interesting work is inference over ambiguous text: fuzzy path
//! reconciliation between archive-relative paths and paths mentioned in
//! diagnostics, heuristic association of un-located errors with their
//! originating file, and recursive resolution of static `include`
//! directives with cycle and missing-target detection.
//!
//! # Core Modules
//!
//! - [`matcher`] - segment-based fuzzy path equality and best-match
//!   ranking
//! - [`diagnostics`] - transcript parsing and error-to-file attribution
//! - [`includes`] - static include-directive extraction from Lua source
//! - [`tree`] - recursive dependency tree building with cycle and
//!   missing-file tracking
//! - [`graph`] - flat node/edge projection and cycle detection across
//!   combined graphs
//!
//! # Supporting Modules
//!
//! - [`source`] - the [`ContentProvider`](source::ContentProvider) seam
//!   and the zip-backed implementation
//! - [`cache`] - injected content/tree caches with per-archive
//!   invalidation
//! - [`config`] - optional `modlens.toml` settings
//! - [`core`] - error types and user-facing error contexts
//! - [`cli`] - the `modlens` command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use modlens::cache::AnalysisCache;
//! use modlens::source::ZipContentProvider;
//! use modlens::tree::DependencyTreeBuilder;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = ZipContentProvider::open("shield-generator.zip".as_ref())?;
//! let builder = DependencyTreeBuilder::new(Arc::new(AnalysisCache::new()));
//! let tree = builder.build_file_tree(&provider, "main.lua").await?;
//! print!("{}", tree.to_tree_string());
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Philosophy
//!
//! Nothing in the analysis layer is fatal to a session: absent input
//! yields empty results, unresolvable includes become `missing` nodes,
//! cycles become `circular` nodes, and include arguments computed at
//! runtime are simply invisible to the static parser. Real environment failures (unreadable archives,
//! invalid configuration) surface as [`core::ModlensError`].

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod diagnostics;
pub mod graph;
pub mod includes;
pub mod matcher;
pub mod source;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cache::AnalysisCache;
pub use diagnostics::{ErrorAttributor, ErrorRecord};
pub use graph::{GraphData, GraphEdge, GraphNode};
pub use source::{ContentProvider, ZipContentProvider};
pub use tree::{DependencyTreeBuilder, TreeNode};
