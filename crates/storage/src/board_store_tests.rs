use super::*;
use touchgrass_core::namespace::ChatId;

fn sample_entry() -> StatusBoardEntry {
    StatusBoardEntry::new(ChatId::new("telegram:42"), "default", 1_000)
}

#[test]
fn missing_file_loads_empty_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status-boards.json");
    let state = load(&path).unwrap();
    assert_eq!(state.version, CURRENT_VERSION);
    assert!(state.boards.is_empty());
    assert!(state.jobs.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status-boards.json");
    let mut state = PersistedBoards::new();
    state.boards.push(sample_entry());
    state.jobs.insert(
        "r-abc123".to_string(),
        vec![BackgroundJob::new("task-1", BackgroundJobStatus::Running, 1_000)],
    );
    save_now(&path, &state).unwrap();

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.version, CURRENT_VERSION);
    assert_eq!(loaded.boards.len(), 1);
    assert_eq!(loaded.boards[0].board_key, "default");
    assert_eq!(loaded.jobs["r-abc123"].len(), 1);
    assert_eq!(loaded.jobs["r-abc123"][0].task_id, "task-1");
}

#[cfg(unix)]
#[test]
fn saved_file_is_mode_0600() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status-boards.json");
    save_now(&path, &PersistedBoards::new()).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[tokio::test]
async fn schedule_save_debounces_rapid_calls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status-boards.json");
    let store = BoardStore::new(path.clone());

    let mut first = PersistedBoards::new();
    first.boards.push(sample_entry());
    store.schedule_save(first).await;

    let mut second = PersistedBoards::new();
    second.boards.push(sample_entry());
    second.boards.push(sample_entry());
    store.schedule_save(second).await;

    tokio::time::sleep(std::time::Duration::from_millis(400)).await;

    let loaded = load(&path).unwrap();
    assert_eq!(loaded.boards.len(), 2, "only the latest scheduled state should be written");
}
