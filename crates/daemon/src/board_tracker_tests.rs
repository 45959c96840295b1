use super::*;
use touchgrass_core::SessionId;

fn running(task_id: &str, command: &str) -> BackgroundJob {
    let mut job = BackgroundJob::new(task_id, BackgroundJobStatus::Running, 1_000);
    job.command = Some(command.to_string());
    job
}

#[test]
fn first_running_event_is_started() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    let outcome = tracker.record_job_event(session_id, running("bg_1", "npm run dev"));
    assert!(matches!(outcome, JobEventOutcome::Started(_)));
}

#[test]
fn second_running_event_for_same_task_is_update_not_started() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    tracker.record_job_event(session_id, running("bg_1", "npm run dev"));
    let outcome = tracker.record_job_event(session_id, running("bg_1", "npm run dev"));
    assert!(matches!(outcome, JobEventOutcome::Updated(_)));
}

#[test]
fn terminal_event_removes_job_and_announces_once() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    tracker.record_job_event(session_id, running("bg_1", "npm run dev"));

    let mut completed = BackgroundJob::new("bg_1", BackgroundJobStatus::Completed, 2_000);
    completed.command = Some("npm run dev".to_string());
    let outcome = tracker.record_job_event(session_id, completed);
    assert!(matches!(outcome, JobEventOutcome::Terminal(_)));
    assert!(tracker.jobs_for_session(&session_id).is_empty());
}

#[test]
fn running_job_summaries_feed_board_body_cap() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    for i in 0..10 {
        tracker.record_job_event(session_id, running(&format!("bg_{i}"), "task"));
    }
    let summaries = tracker.running_job_summaries(&session_id);
    assert_eq!(summaries.len(), 10);
    let body = touchgrass_core::board::render_board_body(&summaries);
    assert!(body.contains("+2 more"));
}

#[test]
fn completed_board_attempt_is_not_orphaned() {
    let tracker = BoardTracker::new();
    let chat_id = ChatId::new("telegram:1");
    tracker.upsert_board(chat_id.clone(), "default", "msg-1".to_string(), 0);
    assert!(tracker.orphaned_boards(ORPHAN_MAX_AGE_MS + 1).is_empty());
}

#[test]
fn board_attempt_with_no_message_id_ages_into_orphaned() {
    let tracker = BoardTracker::new();
    let chat_id = ChatId::new("telegram:1");
    tracker.begin_board_attempt(chat_id.clone(), "default", 0);

    assert!(tracker.orphaned_boards(ORPHAN_MAX_AGE_MS - 1).is_empty());
    let orphaned = tracker.orphaned_boards(ORPHAN_MAX_AGE_MS + 1);
    assert_eq!(orphaned, vec![(chat_id, "default".to_string())]);
}

#[test]
fn reconcile_from_jsonl_picks_up_a_missed_stop_event() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    tracker.record_job_event(session_id, running("bg_1", "npm run dev"));

    let line = serde_json::json!({
        "type": "user",
        "message": {"content": [{
            "type": "tool_result",
            "tool_use_id": "toolu_1",
            "content": "Successfully stopped task: bg_1"
        }]}
    })
    .to_string();

    let outcomes = tracker.reconcile_from_jsonl(session_id, std::iter::once(line));
    assert!(matches!(outcomes.as_slice(), [JobEventOutcome::Terminal(job)] if job.task_id == "bg_1"));
    assert!(tracker.jobs_for_session(&session_id).is_empty());
}

#[test]
fn reconcile_from_jsonl_ignores_unparseable_lines() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    let outcomes = tracker.reconcile_from_jsonl(session_id, std::iter::once("not json".to_string()));
    assert!(outcomes.is_empty());
}

#[test]
fn drop_session_clears_its_jobs() {
    let tracker = BoardTracker::new();
    let session_id = SessionId::generate();
    tracker.record_job_event(session_id, running("bg_1", "npm run dev"));
    tracker.drop_session(&session_id);
    assert!(tracker.jobs_for_session(&session_id).is_empty());
}
