use super::*;
use std::fs;

fn create_test_repo() -> (tempfile::TempDir, git2::Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();
    (dir, repo)
}

fn make_commit(repo: &git2::Repository, files: &[(&str, &str)], message: &str) {
    let sig = git2::Signature::now("Test", "test@test.com").unwrap();
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

#[test]
fn file_frequencies_are_served_from_cache_on_second_call() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("a.rs", "fn a() {}")], "add a");

    let cache = GitCache::new();
    let first = cache.file_frequencies(dir.path(), None).unwrap();
    let second = cache.file_frequencies(dir.path(), None).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn distinct_since_windows_are_cached_separately() {
    let (dir, repo) = create_test_repo();
    make_commit(&repo, &[("a.rs", "fn a() {}")], "add a");

    let cache = GitCache::new();
    let unfiltered = cache.file_frequencies(dir.path(), None).unwrap();
    let filtered = cache.file_frequencies(dir.path(), Some(0)).unwrap();
    assert!(!Arc::ptr_eq(&unfiltered, &filtered));
}

#[test]
fn repo_handle_is_reused_across_calls() {
    let (dir, _repo) = create_test_repo();
    let cache = GitCache::new();
    let a = cache.repo_for(dir.path()).unwrap();
    let b = cache.repo_for(dir.path()).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}
