use super::*;

#[test]
fn lists_only_jsonl_files_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("b.jsonl"), "").unwrap();
    std::fs::write(tmp.path().join("a.jsonl"), "").unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "").unwrap();

    let files = list_jsonl_files(tmp.path());
    let names: Vec<_> = files.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
    assert_eq!(names, vec!["a.jsonl", "b.jsonl"]);
}

#[test]
fn picks_the_last_file_as_initial() {
    let files = vec![PathBuf::from("a.jsonl"), PathBuf::from("b.jsonl")];
    assert_eq!(pick_initial_file(&files), Some(PathBuf::from("b.jsonl")));
    assert_eq!(pick_initial_file(&[]), None);
}

#[test]
fn detects_rollover_by_session_id_reference() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("rolled.jsonl");
    std::fs::write(&path, "{\"type\":\"assistant\",\"sessionId\":\"abc123\"}\n").unwrap();

    assert!(file_references_session(&path, "abc123"));
    assert!(!file_references_session(&path, "other"));
}

#[test]
fn tailer_reads_only_complete_appended_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("live.jsonl");
    std::fs::write(&path, "{\"a\":1}\n").unwrap();

    let mut tailer = JsonlTailer::new(path.clone());
    assert_eq!(tailer.read_new_lines(), vec!["{\"a\":1}".to_string()]);
    assert!(tailer.read_new_lines().is_empty());

    std::fs::write(&path, "{\"a\":1}\n{\"a\":2}\n{\"a\":3}").unwrap();
    assert_eq!(tailer.read_new_lines(), vec!["{\"a\":2}".to_string()]);

    std::fs::write(&path, "{\"a\":1}\n{\"a\":2}\n{\"a\":3}\n").unwrap();
    assert_eq!(tailer.read_new_lines(), vec!["{\"a\":3}".to_string()]);
}

#[test]
fn switch_to_resets_offset() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("other.jsonl");
    std::fs::write(&path, "{\"a\":1}\n").unwrap();

    let mut tailer = JsonlTailer::new(tmp.path().join("missing.jsonl"));
    tailer.switch_to(path.clone());
    assert_eq!(tailer.path(), path);
    assert_eq!(tailer.read_new_lines(), vec!["{\"a\":1}".to_string()]);
}
