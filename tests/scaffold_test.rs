use kiln::error::Error;
use kiln::resolver::VariableContext;
use kiln::scaffold::create_directories;
use std::fs;
use tempfile::TempDir;

fn dirs(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test_log::test]
fn test_creates_nested_and_interpolated_directories() {
    let root = TempDir::new().unwrap();
    let mut context = VariableContext::new();
    context.insert("APP_NAME", "demo".to_string());

    let report = create_directories(
        root.path(),
        &dirs(&["logs", "storage/uploads/{{ APP_NAME }}"]),
        &context,
    );

    assert!(report.failed.is_empty());
    assert_eq!(report.created.len(), 2);
    assert!(root.path().join("logs").is_dir());
    assert!(root.path().join("storage/uploads/demo").is_dir());
}

#[test_log::test]
fn test_failure_does_not_stop_remaining_directories() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("blocked"), "a file, not a directory").unwrap();

    let report = create_directories(
        root.path(),
        &dirs(&["src", "blocked/inner", "../outside", "logs"]),
        &VariableContext::new(),
    );

    assert!(root.path().join("src").is_dir());
    assert!(root.path().join("logs").is_dir());
    assert!(!root.path().parent().unwrap().join("outside").exists());
    assert_eq!(report.created.len(), 2);
    assert_eq!(report.failed.len(), 2);
    match &report.failed[0] {
        Error::DirectoryCreationError { path, .. } => assert_eq!(path, "blocked/inner"),
        other => panic!("Expected DirectoryCreationError, got {other:?}"),
    }
}
