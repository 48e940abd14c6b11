//! Integration tests: real directory trees through ingestion, the
//! engine, and the worker harness.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use treediff::compare::compare_snapshots;
use treediff::snapshot::{load_snapshot, Blake3Hasher, FileEntry, Snapshot, SnapshotFilter};
use treediff::worker::{AnalysisEvent, AnalysisWorker};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn load(root: &Path, name: &str) -> Snapshot {
    load_snapshot(root, name, &SnapshotFilter::default(), &Blake3Hasher).unwrap()
}

#[test]
fn compare_two_directories_end_to_end() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    write(dir_a.path(), "README.md", "# project\n");
    write(dir_a.path(), "src/main.rs", "fn main() {}\n");
    write(dir_a.path(), "src/util.rs", "pub fn util() {}\n");
    write(dir_a.path(), "docs/old.md", "old documentation\n");

    write(dir_b.path(), "README.md", "# project\n");
    write(dir_b.path(), "src/main.rs", "fn main() { run(); }\n");
    write(dir_b.path(), "lib/util.rs", "pub fn util() {}\n");
    write(dir_b.path(), "docs/new.md", "new documentation\n");

    let records = compare_snapshots(&load(dir_a.path(), "a"), &load(dir_b.path(), "b"));

    let label_for = |path: &str| {
        records
            .iter()
            .find(|r| r.change.path_a() == Some(path) || r.change.path_b() == Some(path))
            .map(|r| r.change.label())
    };
    assert_eq!(records.len(), 4);
    assert_eq!(label_for("src/main.rs"), Some("modified"));
    assert_eq!(label_for("src/util.rs"), Some("moved"));
    assert_eq!(label_for("docs/old.md"), Some("deleted"));
    assert_eq!(label_for("docs/new.md"), Some("added"));
    assert_eq!(label_for("README.md"), None);
}

#[test]
fn excluded_directories_never_reach_the_engine() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    write(dir_a.path(), "app.rs", "code");
    write(dir_a.path(), "node_modules/dep/index.js", "v1");
    write(dir_b.path(), "app.rs", "code");
    write(dir_b.path(), "node_modules/dep/index.js", "v2");

    let records = compare_snapshots(&load(dir_a.path(), "a"), &load(dir_b.path(), "b"));
    assert!(records.is_empty(), "excluded files must not produce records");
}

#[test]
fn renamed_directory_shows_up_as_moves() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    for i in 0..5 {
        let body = format!("module {i}");
        write(dir_a.path(), &format!("old_name/mod{i}.rs"), &body);
        write(dir_b.path(), &format!("new_name/mod{i}.rs"), &body);
    }

    let records = compare_snapshots(&load(dir_a.path(), "a"), &load(dir_b.path(), "b"));
    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.change.label() == "moved"));
}

#[test]
fn non_utf8_content_is_compared_lossily() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    fs::write(dir_a.path().join("blob.bin"), [0xff, 0xfe, b'a']).unwrap();
    fs::write(dir_b.path().join("blob.bin"), [0xff, 0xfe, b'a']).unwrap();

    let records = compare_snapshots(&load(dir_a.path(), "a"), &load(dir_b.path(), "b"));
    assert!(records.is_empty());

    fs::write(dir_b.path().join("blob.bin"), [0xff, 0xfe, b'b']).unwrap();
    let records = compare_snapshots(&load(dir_a.path(), "a"), &load(dir_b.path(), "b"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].change.label(), "modified");
}

#[test]
fn worker_delivers_result_for_loaded_snapshots() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    write(dir_a.path(), "x.txt", "foo");
    write(dir_b.path(), "x.txt", "foobar");

    let mut worker = AnalysisWorker::new();
    let rx = worker.analyze(
        Arc::new(load(dir_a.path(), "a")),
        Arc::new(load(dir_b.path(), "b")),
    );

    let mut terminal = None;
    for event in rx {
        match event {
            AnalysisEvent::Progress(p) => {
                assert!(!p.phase.is_empty());
            }
            other => {
                assert!(terminal.is_none(), "second terminal event");
                terminal = Some(other);
            }
        }
    }
    match terminal {
        Some(AnalysisEvent::Result(records)) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].change.label(), "modified");
        }
        other => panic!("expected a result, got {other:?}"),
    }
}

#[test]
fn duplicate_paths_are_rejected_at_construction() {
    let hasher = Blake3Hasher;
    let err = Snapshot::from_entries(
        "dup",
        vec![
            FileEntry::file("x.txt", "one", &hasher),
            FileEntry::file("x.txt", "two", &hasher),
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Duplicate path"));
}

#[test]
fn hidden_files_respect_the_filter() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    write(dir_a.path(), ".env", "SECRET=1");
    write(dir_b.path(), "visible.txt", "hello");

    let filter = SnapshotFilter::new(&[], true).unwrap();
    let snap_a = load_snapshot(dir_a.path(), "a", &filter, &Blake3Hasher).unwrap();
    let snap_b = load_snapshot(dir_b.path(), "b", &filter, &Blake3Hasher).unwrap();

    let records = compare_snapshots(&snap_a, &snap_b);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].change.label(), "added");
    assert_eq!(records[0].change.path_b(), Some("visible.txt"));
}
