#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Builds the directory tree most tests run against:
///
/// ```text
/// root/
///   file1.bak  file2.log  file3.log  file4.csv
///   CVS/
///   directory1/
///     CVS/
///     directory1_1/
///     directory1_2/
///       directory1_2_1/
///         deep1.log  deep2.bak  deep3.bak  something.jpg  something.png
///       directory1_2_2/
///   directory2/
///     note.bak  note.csv
/// ```
///
/// 11 files, 8 directories.
pub fn build_tree(root: &Path) {
    for dir in [
        "CVS",
        "directory1/CVS",
        "directory1/directory1_1",
        "directory1/directory1_2/directory1_2_1",
        "directory1/directory1_2/directory1_2_2",
        "directory2",
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }

    for file in [
        "file1.bak",
        "file2.log",
        "file3.log",
        "file4.csv",
        "directory1/directory1_2/directory1_2_1/deep1.log",
        "directory1/directory1_2/directory1_2_1/deep2.bak",
        "directory1/directory1_2/directory1_2_1/deep3.bak",
        "directory1/directory1_2/directory1_2_1/something.jpg",
        "directory1/directory1_2/directory1_2_1/something.png",
        "directory2/note.bak",
        "directory2/note.csv",
    ] {
        fs::write(root.join(file), b"").unwrap();
    }
}

pub const FILE_COUNT: usize = 11;
pub const DIR_COUNT: usize = 8;

/// Adds the two extra directories the regex tests match against.
pub fn build_regex_tree(root: &Path) {
    build_tree(root);
    fs::create_dir_all(root.join("patternDirectory_token")).unwrap();
    fs::create_dir_all(root.join("token_patternDirectory")).unwrap();
}

/// The three-entry tree from the scenario matrix:
/// `root/{a.log, sub/{b.log, c.bak}}`.
pub fn build_small_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("a.log"), b"").unwrap();
    fs::write(root.join("sub/b.log"), b"").unwrap();
    fs::write(root.join("sub/c.bak"), b"").unwrap();
}

/// Count of files (not directories) left under `root`.
pub fn count_files(root: &Path) -> usize {
    let mut count = 0;
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += count_files(&path);
        } else {
            count += 1;
        }
    }
    count
}

/// Count of directories left under `root`, the root itself excluded.
pub fn count_dirs(root: &Path) -> usize {
    let mut count = 0;
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += 1 + count_dirs(&path);
        }
    }
    count
}

pub fn exists(root: &Path, rel: &str) -> bool {
    root.join(rel).exists()
}

pub fn path(root: &Path, rel: &str) -> PathBuf {
    root.join(rel)
}
