//! HierarchyBuilder (§4.9): assembles analyzed files into the Repository/
//! Directory/File tree.
//!
//! Each file's repo-relative path is split on `/`; directories are created
//! on demand while walking the path, and the file is inserted at the leaf.
//! `BTreeMap` keys keep both files and directories name-sorted within
//! their parent without an extra sort pass.
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::model::{Directory, File, Repository};

/// Build a `Repository` node from `repo_root`'s analyzed files.
pub fn build(
    repo_root: &Path,
    repo_name: String,
    is_git_repo: bool,
    analysis_window_days: u32,
    base_ref: Option<String>,
    snapshot_time: DateTime<Utc>,
    files: Vec<File>,
) -> Repository {
    let mut root = Directory::new(repo_name.clone(), String::new());
    for file in files {
        insert(&mut root, file);
    }

    Repository {
        repo_name,
        absolute_root: repo_root.to_path_buf(),
        is_git_repo,
        analysis_window_days,
        base_ref,
        snapshot_time,
        root,
    }
}

fn insert(root: &mut Directory, file: File) {
    let rel = PathBuf::from(&file.path_relative_to_repo_root);
    let dir_components: Vec<String> = rel
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .filter_map(|c| c.as_os_str().to_str().map(String::from))
        .collect();

    let mut current = root;
    let mut path_so_far = String::new();
    for component in dir_components {
        path_so_far = if path_so_far.is_empty() {
            component.clone()
        } else {
            format!("{path_so_far}/{component}")
        };
        current = current
            .children
            .entry(component.clone())
            .or_insert_with(|| Directory::new(component, path_so_far.clone()));
    }

    current.files.insert(file.name.clone(), file);
}

#[cfg(test)]
#[path = "hierarchy_test.rs"]
mod tests;
