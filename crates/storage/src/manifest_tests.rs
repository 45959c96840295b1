use super::*;

fn sample(id: &str) -> SessionManifest {
    SessionManifest {
        id: id.to_string(),
        command: "claude".to_string(),
        cwd: PathBuf::from("/home/user/project"),
        pid: 4242,
        jsonl_file: None,
        started_at: 1_000,
    }
}

#[test]
fn write_then_scan_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = sample("r-abc123");
    write_manifest(dir.path(), &manifest).unwrap();

    let found = scan_manifests(dir.path());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "r-abc123");
    assert_eq!(found[0].pid, 4242);
}

#[test]
fn manifest_serializes_camel_case_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = sample("r-def456");
    manifest.jsonl_file = Some("session.jsonl".to_string());
    write_manifest(dir.path(), &manifest).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("r-def456.json")).unwrap();
    assert!(raw.contains("\"jsonlFile\""));
    assert!(raw.contains("\"startedAt\""));
}

#[test]
fn remove_manifest_deletes_file() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = sample("r-ghi789");
    write_manifest(dir.path(), &manifest).unwrap();
    remove_manifest(dir.path(), "r-ghi789").unwrap();
    assert!(scan_manifests(dir.path()).is_empty());
}

#[test]
fn remove_missing_manifest_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    remove_manifest(dir.path(), "r-absent").unwrap();
}

#[test]
fn corrupt_manifest_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), b"not json").unwrap();
    write_manifest(dir.path(), &sample("r-ok")).unwrap();

    let found = scan_manifests(dir.path());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "r-ok");
}

#[test]
fn missing_sessions_dir_scans_as_empty() {
    let found = scan_manifests(Path::new("/nonexistent/touchgrass-sessions-dir"));
    assert!(found.is_empty());
}
