//! Project an archive into flat graph data and report cycles.
//!
//! Builds the dependency tree, flattens it into node/edge graph data
//! keyed by synthetic ids, runs cycle detection, and prints the result
//! as JSON (default) or a short text summary:
//!
//! ```bash
//! modlens graph shield-generator.zip
//! modlens graph shield-generator.zip --format summary
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use crate::cache::AnalysisCache;
use crate::config::ModlensConfig;
use crate::graph::{detect_cycles, tree_to_graph_data};
use crate::source::{ContentProvider, ZipContentProvider};
use crate::tree::DependencyTreeBuilder;

/// Command to display an archive's flattened include graph.
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Path to the mod archive (zip).
    archive: PathBuf,

    /// Entry file to start resolution from (default: configured
    /// entry-file convention).
    #[arg(short, long)]
    entry: Option<String>,

    /// Output format (json, summary).
    #[arg(short = 'f', long, default_value = "json")]
    format: String,
}

impl GraphCommand {
    /// Build, project, and print the graph.
    pub async fn execute(self, config: &ModlensConfig) -> Result<()> {
        let provider = ZipContentProvider::open(&self.archive)?;
        let entry = self.entry.as_deref().unwrap_or(&config.entry_file);

        let cache = Arc::new(AnalysisCache::new());
        let builder = DependencyTreeBuilder::new(cache);
        let tree = builder.build_file_tree(&provider, entry).await?;

        let data = tree_to_graph_data(&tree, provider.archive_id());
        let cycles = detect_cycles(&data.nodes, &data.edges);

        match self.format.as_str() {
            "json" => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "nodes": data.nodes,
                        "edges": data.edges,
                        "max_depth": data.max_depth,
                        "cycles": cycles,
                    }))?
                );
            }
            "summary" => {
                println!(
                    "{}: {} nodes, {} edges, max depth {}",
                    provider.archive_id().bold(),
                    data.nodes.len(),
                    data.edges.len(),
                    data.max_depth
                );
                if cycles.is_empty() {
                    println!("no cycles");
                } else {
                    for cycle in &cycles {
                        println!("{} {}", "cycle:".yellow(), cycle.join(" -> "));
                    }
                }
            }
            other => {
                anyhow::bail!("unknown format '{other}' (expected 'json' or 'summary')");
            }
        }

        Ok(())
    }
}
