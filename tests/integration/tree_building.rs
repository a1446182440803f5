//! End-to-end dependency tree building against real zip archives.

use std::collections::HashSet;
use std::sync::Arc;

use modlens::cache::AnalysisCache;
use modlens::source::{ContentProvider, ZipContentProvider};
use modlens::test_utils::init_test_logging;
use modlens::tree::DependencyTreeBuilder;

use super::write_archive;

fn builder() -> DependencyTreeBuilder {
    DependencyTreeBuilder::new(Arc::new(AnalysisCache::new()))
}

#[tokio::test]
async fn builds_tree_from_zip_archive() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "shield.zip",
        &[
            ("entry.lua", "include(\"guard.lua\")"),
            ("guard.lua", "include(\"helpers.lua\")"),
            ("helpers.lua", "return {}"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    assert_eq!(provider.archive_id(), "shield");

    let tree = builder().build_file_tree(&provider, "entry.lua").await.unwrap();
    assert_eq!(tree.node_count(), 3);
    assert_eq!(tree.children[0].children[0].path, "helpers.lua");
}

#[tokio::test]
async fn resolves_entry_against_nested_archive_layout() {
    init_test_logging();
    // Archives commonly nest everything under a single mod directory;
    // callers still ask for the short entry path.
    let (_guard, path) = write_archive(
        "mymod.zip",
        &[
            ("mymod/entry.lua", "include(\"mymod/util.lua\")"),
            ("mymod/util.lua", "return {}"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let tree = builder().build_file_tree(&provider, "entry.lua").await.unwrap();

    assert_eq!(tree.children.len(), 1);
    assert!(!tree.children[0].missing);
}

#[tokio::test]
async fn mutual_inclusion_terminates_with_circular_marker() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "cyclic.zip",
        &[
            ("a.lua", "include(\"b.lua\")"),
            ("b.lua", "include(\"a.lua\")"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let tree = builder().build_file_tree(&provider, "a.lua").await.unwrap();

    let revisit = &tree.children[0].children[0];
    assert_eq!(revisit.path, "a.lua");
    assert!(revisit.circular);
    assert!(revisit.children.is_empty());
}

#[tokio::test]
async fn absent_target_is_marked_missing() {
    init_test_logging();
    let (_guard, path) =
        write_archive("partial.zip", &[("entry.lua", "include(\"missing.lua\")")]);

    let provider = ZipContentProvider::open(&path).unwrap();
    let tree = builder().build_file_tree(&provider, "entry.lua").await.unwrap();

    assert_eq!(tree.children[0].path, "missing.lua");
    assert!(tree.children[0].missing);
    assert!(tree.children[0].children.is_empty());
}

#[tokio::test]
async fn analyzer_missing_report_overrides_archive_content() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "flagged.zip",
        &[
            ("entry.lua", "include(\"flagged.lua\")"),
            ("flagged.lua", "return {}"),
        ],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let builder = builder().with_missing_report(HashSet::from(["flagged.lua".to_string()]));
    let tree = builder.build_file_tree(&provider, "entry.lua").await.unwrap();

    assert!(tree.children[0].missing);
}

#[tokio::test]
async fn shared_cache_serves_second_build_and_invalidation_clears_it() {
    init_test_logging();
    let (_guard, path) = write_archive("cached.zip", &[("entry.lua", "return {}")]);

    let cache = Arc::new(AnalysisCache::new());
    let provider = ZipContentProvider::open(&path).unwrap();
    let builder = DependencyTreeBuilder::new(Arc::clone(&cache));

    builder.build_file_tree(&provider, "entry.lua").await.unwrap();
    assert_eq!(cache.tree_len(), 1);
    assert!(cache.content_len() >= 1);

    cache.invalidate_archive("cached");
    assert_eq!(cache.tree_len(), 0);
    assert_eq!(cache.content_len(), 0);

    builder.build_file_tree(&provider, "entry.lua").await.unwrap();
    assert_eq!(cache.tree_len(), 1);
}

#[tokio::test]
async fn referenced_non_text_asset_is_missing_not_fatal() {
    init_test_logging();
    let (_guard, path) = write_archive(
        "mixed.zip",
        &[("entry.lua", "include(\"sprite.png\")\ninclude(\"sound.lua\")"), ("sound.lua", "return {}")],
    );

    let provider = ZipContentProvider::open(&path).unwrap();
    let tree = builder().build_file_tree(&provider, "entry.lua").await.unwrap();

    assert!(tree.children[0].missing);
    assert!(!tree.children[1].missing);
}
