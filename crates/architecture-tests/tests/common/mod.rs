//! Shared helpers for the architecture tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Find the workspace root by looking for a Cargo.toml with `[workspace]`.
pub fn find_workspace_root() -> PathBuf {
    let current_dir = std::env::current_dir().expect("Failed to get current directory");

    let mut dir = current_dir.as_path();
    loop {
        let cargo_toml = dir.join("Cargo.toml");
        if cargo_toml.exists()
            && let Ok(content) = fs::read_to_string(&cargo_toml)
            && content.contains("[workspace]")
        {
            return dir.to_path_buf();
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => return current_dir,
        }
    }
}

/// All .rs files under `crates/`, skipping build output and this crate.
pub fn workspace_rust_files(root: &Path) -> Vec<PathBuf> {
    let crates_dir = root.join("crates");
    assert!(
        crates_dir.exists(),
        "crates/ directory not found at {:?}",
        crates_dir
    );

    walkdir::WalkDir::new(&crates_dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Whether a file under `crates/` is test code as a whole.
pub fn is_test_path(relative: &str) -> bool {
    relative.contains("/tests/") || relative.ends_with("_tests.rs")
}
