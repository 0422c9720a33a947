//! Property-based tests for ordering and determinism guarantees

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treedigest::manifest::MANIFEST_FILE_NAME;
use treedigest::tree::builder::ManifestBuilder;
use treedigest::tree::order::{compare_entries, sort_entries};
use treedigest::types::FileEntry;

fn entry(path: &str) -> FileEntry {
    FileEntry::new(Path::new("/root"), PathBuf::from(path)).unwrap()
}

/// Relative paths of 1-3 components over a small alphabet, so basename ties are common
fn relative_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-cA-C_.-]{1,3}", 1..=3).prop_map(|parts| {
        parts
            .into_iter()
            .map(|p| if p.starts_with('.') { format!("x{}", p) } else { p })
            .collect::<Vec<_>>()
            .join("/")
    })
}

proptest! {
    /// Sorting is independent of the input permutation
    #[test]
    fn sort_is_permutation_invariant(paths in prop::collection::btree_set(relative_path(), 0..30)) {
        let forward: Vec<String> = paths.iter().cloned().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let mut a: Vec<FileEntry> = forward.iter().map(|p| entry(p)).collect();
        let mut b: Vec<FileEntry> = reversed.iter().map(|p| entry(p)).collect();
        sort_entries(&mut a);
        sort_entries(&mut b);

        prop_assert_eq!(a, b);
    }

    /// Adjacent entries satisfy (basename, path) byte order
    #[test]
    fn sorted_pairs_respect_key_order(paths in prop::collection::btree_set(relative_path(), 0..30)) {
        let mut entries: Vec<FileEntry> = paths.iter().map(|p| entry(p)).collect();
        sort_entries(&mut entries);

        for pair in entries.windows(2) {
            let base_a = pair[0].path().file_name().unwrap().to_str().unwrap().as_bytes();
            let base_b = pair[1].path().file_name().unwrap().to_str().unwrap().as_bytes();
            let path_a = pair[0].path().to_str().unwrap().as_bytes();
            let path_b = pair[1].path().to_str().unwrap().as_bytes();
            prop_assert!(base_a < base_b || (base_a == base_b && path_a < path_b));
        }
    }

    /// The comparator is a total order: antisymmetric and only equal on equal paths
    #[test]
    fn comparator_is_total(a in relative_path(), b in relative_path()) {
        let (ea, eb) = (entry(&a), entry(&b));
        prop_assert_eq!(compare_entries(&ea, &eb), compare_entries(&eb, &ea).reverse());
        prop_assert_eq!(compare_entries(&ea, &eb).is_eq(), ea.path() == eb.path());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Random trees: every visible file listed once, two runs byte-identical
    #[test]
    fn random_tree_manifest_is_complete_and_stable(
        files in prop::collection::btree_map("[a-c]{1,2}(/[a-c]{1,2}){0,2}", "[a-z]{0,8}", 0..12)
    ) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        // Drop paths that would need a file where a directory already is
        let mut written = BTreeSet::new();
        for (path, content) in &files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                if std::fs::create_dir_all(parent).is_err() {
                    continue;
                }
            }
            if full.is_dir() || std::fs::write(&full, content).is_err() {
                continue;
            }
            written.insert(path.clone());
        }
        // A later file may have turned an earlier file's path into a parent
        let written: BTreeSet<String> = written
            .into_iter()
            .filter(|p| root.join(p).is_file())
            .collect();

        let builder = ManifestBuilder::new(root.to_path_buf());
        let report = builder.build().unwrap();
        let first = std::fs::read(root.join(MANIFEST_FILE_NAME)).unwrap();
        builder.build().unwrap();
        let second = std::fs::read(root.join(MANIFEST_FILE_NAME)).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(report.records, written.len());

        let listed: BTreeSet<String> = String::from_utf8(first)
            .unwrap()
            .lines()
            .map(|l| l.split_once('\t').unwrap().1.to_string())
            .collect();
        prop_assert_eq!(listed, written);
    }
}
