//! Filesystem-level tests for the dynamic API loader: include resolution
//! against the root directory, the two configuration failures, and the
//! non-destructive reload contract.

use std::fs;
use std::path::Path;

use luassist_catalog::{
    load_dynamic, ApiFile, CompletionKind, CompletionProvider, ConfigurationError, Origin,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_loads_declarations_in_file_order() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "api.txt",
        "# host API\n\
         class Domain grid domain\n\
         function void Domain:refine level\n\
         const NumProcs number of processes\n",
    );
    let loaded = load_dynamic(&ApiFile::new(dir.path().join("api.txt"), dir.path())).unwrap();
    assert!(loaded.warnings.is_empty());
    let names: Vec<&str> = loaded.entries.iter().map(|e| e.input_text.as_str()).collect();
    assert_eq!(names, vec!["Domain", "Domain:refine", "NumProcs"]);
    assert!(loaded.entries.iter().all(|e| e.origin == Origin::Dynamic));
    assert!(matches!(
        loaded.entries[1].kind,
        CompletionKind::FunctionSignature { .. }
    ));
}

#[test]
fn test_include_resolved_against_root() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("plugins")).unwrap();
    write(dir.path(), "api.txt", "const A\ninclude plugins/extra.txt\nconst C\n");
    write(
        &dir.path().join("plugins"),
        "extra.txt",
        "const B\n",
    );
    let loaded = load_dynamic(&ApiFile::new(dir.path().join("api.txt"), dir.path())).unwrap();
    let names: Vec<&str> = loaded.entries.iter().map(|e| e.input_text.as_str()).collect();
    // the include expands in place, keeping file order
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn test_include_cycle_is_a_warning_not_a_hang() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", "const A\ninclude b.txt\n");
    write(dir.path(), "b.txt", "const B\ninclude a.txt\n");
    let loaded = load_dynamic(&ApiFile::new(dir.path().join("a.txt"), dir.path())).unwrap();
    let names: Vec<&str> = loaded.entries.iter().map(|e| e.input_text.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(loaded.warnings.len(), 1);
    assert!(loaded.warnings[0].reason.contains("cycle"));
}

#[test]
fn test_missing_include_is_a_warning() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api.txt", "const A\ninclude nowhere.txt\nconst B\n");
    let loaded = load_dynamic(&ApiFile::new(dir.path().join("api.txt"), dir.path())).unwrap();
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.warnings.len(), 1);
    assert_eq!(loaded.warnings[0].line, 2);
}

#[test]
fn test_malformed_lines_skipped_with_warnings() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "api.txt",
        "const A\nthis is not a declaration\nfunction broken\nconst B\n",
    );
    let loaded = load_dynamic(&ApiFile::new(dir.path().join("api.txt"), dir.path())).unwrap();
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.warnings.len(), 2);
    assert_eq!(loaded.warnings[0].line, 2);
    assert_eq!(loaded.warnings[1].line, 3);
}

#[test]
fn test_missing_file_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let result = load_dynamic(&ApiFile::new(dir.path().join("absent.txt"), dir.path()));
    assert!(matches!(
        result,
        Err(ConfigurationError::UnreadableFile { .. })
    ));
}

#[test]
fn test_invalid_root_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api.txt", "const A\n");
    let result = load_dynamic(&ApiFile::new(
        dir.path().join("api.txt"),
        dir.path().join("not-a-directory"),
    ));
    assert!(matches!(result, Err(ConfigurationError::InvalidRoot { .. })));
}

#[test]
fn test_failed_reload_leaves_catalog_unchanged() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api.txt", "const Alive\n");
    let provider = CompletionProvider::new();
    provider
        .reload_dynamic(&ApiFile::new(dir.path().join("api.txt"), dir.path()))
        .unwrap();
    assert_eq!(provider.catalog().dynamic_snapshot().len(), 1);

    let result = provider.reload_dynamic(&ApiFile::new(dir.path().join("gone.txt"), dir.path()));
    assert!(result.is_err());
    // the previous dynamic set survives a failed load untouched
    assert_eq!(provider.catalog().dynamic_snapshot().len(), 1);
    assert_eq!(provider.catalog().dynamic_snapshot()[0].input_text, "Alive");
}

#[test]
fn test_reload_replaces_dynamic_and_keeps_static() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "first.txt", "const One\nconst Two\n");
    write(dir.path(), "second.txt", "const Three\n");
    let provider = CompletionProvider::new();
    let static_count = provider.catalog().static_entries().len();

    provider
        .reload_dynamic(&ApiFile::new(dir.path().join("first.txt"), dir.path()))
        .unwrap();
    assert_eq!(provider.catalog().dynamic_snapshot().len(), 2);

    provider
        .reload_dynamic(&ApiFile::new(dir.path().join("second.txt"), dir.path()))
        .unwrap();
    let snapshot = provider.catalog().dynamic_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].input_text, "Three");
    assert_eq!(provider.catalog().static_entries().len(), static_count);
}
