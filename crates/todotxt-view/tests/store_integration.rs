//! Integration tests for TodoStore.
//!
//! These tests verify that the store correctly reads and writes todo files.

use std::fs;

use tempfile::tempdir;
use todotxt_view_rs::store::{StoreError, TodoStore};

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let todo_path = temp_dir.path().join("todo.txt");
    let store = TodoStore::with_path(todo_path.clone());

    let mut list = store.load_or_default().expect("failed to load");
    list.add("(A) Call mom @phone").unwrap();
    list.add("x 2024-01-02 Pay rent").unwrap();
    store.save(&list).expect("failed to save");

    assert!(todo_path.exists(), "todo file should exist after save");
    assert_eq!(
        fs::read_to_string(&todo_path).unwrap(),
        "(A) Call mom @phone\nx 2024-01-02 Pay rent\n"
    );

    let loaded = store.load().expect("failed to load");
    assert_eq!(loaded.len(), 2);
    assert!(!loaded.is_dirty());
    assert!(loaded.items()[1].is_completed());
}

#[test]
fn test_load_skips_blank_lines() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let todo_path = temp_dir.path().join("todo.txt");
    fs::write(&todo_path, "first\n\n   \nsecond\n").unwrap();

    let list = TodoStore::with_path(todo_path).load().unwrap();
    let lines: Vec<&str> = list.lines().collect();
    assert_eq!(lines, vec!["first", "second"]);
}

#[test]
fn test_load_missing_file_returns_error() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TodoStore::with_path(temp_dir.path().join("missing.txt"));

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::ReadError { .. }));
    assert!(
        err.to_string().contains("failed to read todo file"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_or_default_missing_file() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let store = TodoStore::with_path(temp_dir.path().join("missing.txt"));

    let list = store.load_or_default().expect("missing file is an empty list");
    assert!(list.is_empty());
    assert!(!store.exists());
}

#[test]
fn test_save_creates_parent_directory() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let todo_path = temp_dir.path().join("nested").join("dir").join("todo.txt");
    let store = TodoStore::with_path(todo_path.clone());

    let mut list = store.load_or_default().unwrap();
    list.add("something").unwrap();
    store.save(&list).expect("failed to save");

    assert!(todo_path.exists());
    assert!(!todo_path.with_extension("tmp").exists(), "temp file is renamed away");
}

#[test]
fn test_save_overwrites_existing_file() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let todo_path = temp_dir.path().join("todo.txt");
    fs::write(&todo_path, "old\nolder\n").unwrap();
    let store = TodoStore::with_path(todo_path.clone());

    let mut list = store.load().unwrap();
    list.append(1, "and new").unwrap();
    store.save(&list).unwrap();

    assert_eq!(
        fs::read_to_string(&todo_path).unwrap(),
        "old and new\nolder\n"
    );
}
