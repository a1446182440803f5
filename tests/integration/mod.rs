//! Integration test suite for modlens.
//!
//! Shared fixtures live here: zip archives are written to temp
//! directories with the `zip` crate so the tests exercise the real
//! archive decode path.

mod cli;
mod diagnostics;
mod graph_projection;
mod tree_building;

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Write a zip archive with the given `(path, content)` entries and
/// return its location together with the guard keeping it alive.
pub fn write_archive(name: &str, entries: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join(name);

    let file = std::fs::File::create(&path).expect("create archive file");
    let mut writer = zip::ZipWriter::new(file);
    for (entry_path, content) in entries {
        writer
            .start_file(*entry_path, SimpleFileOptions::default())
            .expect("start archive entry");
        writer.write_all(content.as_bytes()).expect("write archive entry");
    }
    writer.finish().expect("finish archive");

    (dir, path)
}
