//! Tree-to-graph projection and combined-graph cycle detection.

use std::sync::Arc;

use modlens::cache::AnalysisCache;
use modlens::graph::{EdgeKind, GraphEdge, combine, detect_cycles, tree_to_graph_data};
use modlens::source::ZipContentProvider;
use modlens::test_utils::init_test_logging;
use modlens::tree::DependencyTreeBuilder;

use super::write_archive;

#[tokio::test]
async fn chain_round_trip_produces_two_nodes_and_two_edges() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "chain.zip",
        &[
            ("entry.lua", "include(\"guard.lua\")"),
            ("guard.lua", "include(\"helpers.lua\")"),
            ("helpers.lua", "return {}"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let builder = DependencyTreeBuilder::new(Arc::new(AnalysisCache::new()));
    let tree = builder.build_file_tree(&provider, "entry.lua").await.unwrap();

    let data = tree_to_graph_data(&tree, "chain");

    // The entry file itself produces no node.
    assert_eq!(data.nodes.len(), 2);
    assert_eq!(data.edges.len(), 2);

    let guard = data.nodes.iter().find(|n| n.path == "guard.lua").unwrap();
    let helpers = data.nodes.iter().find(|n| n.path == "helpers.lua").unwrap();
    assert!(helpers.depth > guard.depth);

    assert!(
        data.edges
            .iter()
            .any(|e| e.from == "chain" && e.to == "chain/guard.lua" && e.kind == EdgeKind::Contains)
    );
    assert!(data.edges.iter().any(|e| e.from == "chain/guard.lua"
        && e.to == "chain/helpers.lua"
        && e.kind == EdgeKind::FileInclude));

    assert!(detect_cycles(&data.nodes, &data.edges).is_empty());
}

#[tokio::test]
async fn include_cycle_surfaces_in_the_projected_graph() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "cyclic.zip",
        &[
            ("entry.lua", "include(\"a.lua\")"),
            ("a.lua", "include(\"b.lua\")"),
            ("b.lua", "include(\"a.lua\")"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let builder = DependencyTreeBuilder::new(Arc::new(AnalysisCache::new()));
    let tree = builder.build_file_tree(&provider, "entry.lua").await.unwrap();

    // The circular leaf under b.lua projects onto the same id as the
    // expanded a.lua node, closing the loop the tree kept open.
    let data = tree_to_graph_data(&tree, "cyclic");
    let cycles = detect_cycles(&data.nodes, &data.edges);

    assert_eq!(cycles.len(), 1);
    assert!(cycles[0].contains(&"cyclic/a.lua".to_string()));
    assert!(cycles[0].contains(&"cyclic/b.lua".to_string()));
}

#[test]
fn combined_archives_report_cross_package_cycles() {
    init_test_logging();
    let left = {
        let mut entry = modlens::tree::TreeNode::new("entry.lua");
        entry.children.push(modlens::tree::TreeNode::new("api.lua"));
        tree_to_graph_data(&entry, "left")
    };
    let right = {
        let mut entry = modlens::tree::TreeNode::new("entry.lua");
        entry.children.push(modlens::tree::TreeNode::new("impl.lua"));
        tree_to_graph_data(&entry, "right")
    };

    let combined = combine(
        [left, right],
        vec![
            GraphEdge::new("left/api.lua", "right/impl.lua", EdgeKind::PackageDependency),
            GraphEdge::new("right/impl.lua", "left/api.lua", EdgeKind::PackageDependency),
        ],
    );

    assert_eq!(combined.nodes.len(), 2);
    let cycles = detect_cycles(&combined.nodes, &combined.edges);
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 2);
}
