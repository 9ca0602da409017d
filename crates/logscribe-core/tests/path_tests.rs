use logscribe_core::*;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_resolve_projects_dir_with_explicit() {
    let result = resolve_projects_dir(Some("/explicit/projects")).unwrap();
    assert_eq!(result, PathBuf::from("/explicit/projects"));
}

#[test]
fn test_resolve_projects_dir_explicit_overrides_env() {
    unsafe {
        env::set_var(PROJECTS_DIR_ENV, "/env/projects");
    }

    let result = resolve_projects_dir(Some("/explicit/root")).unwrap();
    assert_eq!(result, PathBuf::from("/explicit/root"));

    unsafe {
        env::remove_var(PROJECTS_DIR_ENV);
    }
}

#[test]
fn test_absolute_path_is_absolute() {
    let result = absolute_path("some/relative/file.jsonl").unwrap();
    assert!(result.is_absolute());
    assert!(result.ends_with("some/relative/file.jsonl"));
}

#[test]
fn test_normalize_path() {
    let temp_dir = TempDir::new().unwrap();
    let normalized = normalize_path(temp_dir.path());
    assert!(normalized.is_absolute());
}

#[test]
fn test_encoded_name_of_canonical_temp_dir_has_no_separators() {
    let temp_dir = TempDir::new().unwrap();
    let encoded = encode_project_dir_name(&normalize_path(temp_dir.path()));
    assert!(encoded.starts_with('-'));
    assert!(!encoded.contains('/'));
    assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
}
