//! Display the include dependency tree of a mod archive.
//!
//! Resolves the archive's entry file and everything it transitively
//! includes, then renders the hierarchy either as a box-drawing tree
//! (default) or as JSON for scripting:
//!
//! ```bash
//! modlens tree shield-generator.zip
//! modlens tree shield-generator.zip --entry init.lua --format json
//! modlens tree shield-generator.zip --depth 2
//! ```
//!
//! Unresolvable includes are shown with a `(missing)` marker and cycles
//! with `(circular)`; neither is an error.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cache::AnalysisCache;
use crate::config::ModlensConfig;
use crate::source::ZipContentProvider;
use crate::tree::{DependencyTreeBuilder, TreeNode};

/// Command to display an archive's dependency tree.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Path to the mod archive (zip).
    archive: PathBuf,

    /// Entry file to start resolution from (default: configured
    /// entry-file convention).
    #[arg(short, long)]
    entry: Option<String>,

    /// Output format (tree, json).
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Maximum depth to display (unlimited if not specified).
    #[arg(short, long)]
    depth: Option<usize>,
}

impl TreeCommand {
    /// Build the tree and print it in the requested format.
    pub async fn execute(self, config: &ModlensConfig) -> Result<()> {
        let provider = ZipContentProvider::open(&self.archive)?;
        let entry = self.entry.as_deref().unwrap_or(&config.entry_file);

        let cache = Arc::new(AnalysisCache::new());
        let builder = DependencyTreeBuilder::new(cache);
        let tree = builder.build_file_tree(&provider, entry).await?;

        match self.format.as_str() {
            "json" => {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            }
            "tree" => {
                let display = match self.depth {
                    Some(limit) => truncate(&tree, limit),
                    None => tree,
                };
                print!("{}", colorize_markers(&display.to_tree_string()));
            }
            other => {
                anyhow::bail!("unknown format '{other}' (expected 'tree' or 'json')");
            }
        }

        Ok(())
    }
}

/// Copy of the tree cut off below `limit` levels (0 = root only).
fn truncate(node: &TreeNode, limit: usize) -> TreeNode {
    let mut copy = node.clone();
    if limit == 0 {
        copy.children.clear();
    } else {
        copy.children = node.children.iter().map(|child| truncate(child, limit - 1)).collect();
    }
    copy
}

fn colorize_markers(rendered: &str) -> String {
    rendered
        .replace("(missing)", &format!("{}", "(missing)".red()))
        .replace("(circular)", &format!("{}", "(circular)".yellow()))
}
