// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The interactive CLI adapter (spec §4.4): spawns the assistant under a
//! PTY, mirrors its output to our own stdout while watching it for
//! approval prompts, tails its JSONL event log, and drains queued chat
//! input back into the PTY. Cooperatively concurrent — one task per
//! responsibility, per spec §5 — with no component crashing the session
//! on a transient daemon error.

mod input_pump;
mod raw_term;
mod tail;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::{Datelike, Timelike};
use tokio::sync::mpsc;
use touchgrass_adapters::{detect_approval_prompt, PtyRing, Vendor, ATTRIBUTION_ALLOWLIST};
use touchgrass_core::{Clock, SystemClock};
use touchgrass_heartbeat::{build_context, format_heartbeat_prompt, parse_heartbeat_block, SessionHeartbeatState};
use touchgrass_parser::{parse_jsonl_message, should_forward_tool_result, ToolUseCache};
use touchgrass_pty::{Pty, PtySession};
use touchgrass_wire::{ApprovalNeededEvent, AssistantEvent, BackgroundJobEvent, QuestionEvent, ThinkingEvent, ToolCallEvent, ToolResultEvent};

use crate::ensure_daemon::Daemon;
use crate::exit_error::ExitError;
use input_pump::{plan_input, PtyWrite, INPUT_POLL_INTERVAL};
use raw_term::RawModeGuard;
use tail::JsonlTailer;

const JSONL_POLL_FALLBACK: Duration = Duration::from_secs(2);
const APPROVAL_SCAN_INTERVAL: Duration = Duration::from_millis(300);
const APPROVAL_NOTIFY_DELAY: Duration = Duration::from_secs(1);
const HEARTBEAT_TICK_INTERVAL: Duration = Duration::from_secs(60);

/// A tool call recently seen in the JSONL stream, used to attribute an
/// approval prompt detected moments later in the PTY ring (spec §4.4.1).
#[derive(Clone)]
struct LastToolCall {
    name: String,
    input: serde_json::Value,
}

pub async fn run_interactive(
    daemon: &Daemon,
    session_id: &str,
    vendor: Vendor,
    cwd: &Path,
    extra_args: &[String],
) -> Result<i32, ExitError> {
    let command = crate::commands::launch::vendor_binary(vendor);
    let env: HashMap<String, String> = std::env::vars().collect();
    let (rows, cols) = terminal_size();

    let pty = PtySession::spawn(command, extra_args, cwd, &env, rows, cols)
        .map_err(|e| ExitError::config(format!("could not launch {command}: {e}")))?;
    let pty: Arc<dyn Pty> = Arc::new(pty);

    let _raw_mode = RawModeGuard::enable().ok();
    let caffeinate = hold_system_awake();

    let (write_tx, write_rx) = mpsc::channel::<PtyWrite>(64);
    let ring = Arc::new(StdMutex::new(PtyRing::new()));
    let last_tool_call: Arc<StdMutex<Option<LastToolCall>>> = Arc::new(StdMutex::new(None));

    let writer_task = tokio::spawn(run_pty_writer(pty.clone(), write_rx));
    let stdin_task = tokio::spawn(forward_stdin(write_tx.clone()));
    let output_task = tokio::spawn(mirror_output(pty.clone(), ring.clone()));
    let approval_task =
        tokio::spawn(watch_approvals(daemon.clone(), session_id.to_string(), vendor, ring.clone(), last_tool_call.clone()));
    let tail_task = tokio::spawn(tail_jsonl(daemon.clone(), session_id.to_string(), vendor, cwd.to_path_buf(), last_tool_call));
    let input_task = tokio::spawn(pump_input(
        daemon.clone(),
        session_id.to_string(),
        command.to_string(),
        cwd.to_path_buf(),
        pty.clone(),
        write_tx.clone(),
    ));
    let heartbeat_task = tokio::spawn(run_heartbeat(cwd.to_path_buf(), write_tx.clone()));

    let exit_code = tokio::select! {
        code = pty.wait() => code,
        code = wait_for_signal() => code,
    };

    for handle in [stdin_task, output_task, approval_task, tail_task, input_task, heartbeat_task, writer_task] {
        handle.abort();
    }
    drop(caffeinate);

    Ok(exit_code)
}

fn terminal_size() -> (u16, u16) {
    let rows = std::env::var("LINES").ok().and_then(|s| s.parse().ok()).unwrap_or(24);
    let cols = std::env::var("COLUMNS").ok().and_then(|s| s.parse().ok()).unwrap_or(80);
    (rows, cols)
}

/// Hold `caffeinate -i -w <pid>` on macOS so the machine doesn't sleep
/// mid-session (spec §4.4). A no-op elsewhere, and best-effort even on
/// macOS: a missing `caffeinate` binary just means no sleep prevention.
#[cfg(target_os = "macos")]
fn hold_system_awake() -> Option<std::process::Child> {
    std::process::Command::new("caffeinate")
        .arg("-i")
        .arg("-w")
        .arg(std::process::id().to_string())
        .spawn()
        .ok()
}

#[cfg(not(target_os = "macos"))]
fn hold_system_awake() -> Option<std::process::Child> {
    None
}

async fn run_pty_writer(pty: Arc<dyn Pty>, mut rx: mpsc::Receiver<PtyWrite>) {
    while let Some(write) = rx.recv().await {
        match write {
            PtyWrite::Bytes(bytes) => {
                let _ = pty.write(&bytes);
            }
            PtyWrite::Delayed { first, delay, then } => {
                let _ = pty.write(&first);
                tokio::time::sleep(delay).await;
                let _ = pty.write(&then);
            }
        }
    }
}

async fn forward_stdin(write_tx: mpsc::Sender<PtyWrite>) {
    use tokio::io::AsyncReadExt;
    let mut stdin = tokio::io::stdin();
    let mut buf = [0u8; 4096];
    loop {
        match stdin.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if write_tx.send(PtyWrite::Bytes(buf[..n].to_vec())).await.is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

async fn mirror_output(pty: Arc<dyn Pty>, ring: Arc<StdMutex<PtyRing>>) {
    use tokio::io::AsyncWriteExt;
    let mut rx = pty.subscribe_output();
    let mut stdout = tokio::io::stdout();
    loop {
        match rx.recv().await {
            Ok(bytes) => {
                let _ = stdout.write_all(&bytes).await;
                let _ = stdout.flush().await;
                if let Ok(mut guard) = ring.lock() {
                    guard.push(&bytes);
                }
            }
            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Scan the PTY ring for an approval prompt every [`APPROVAL_SCAN_INTERVAL`],
/// waiting [`APPROVAL_NOTIFY_DELAY`] before notifying so the preceding
/// tool-call event has a chance to arrive first (spec §4.4.1).
async fn watch_approvals(
    daemon: Daemon,
    session_id: String,
    vendor: Vendor,
    ring: Arc<StdMutex<PtyRing>>,
    last_tool_call: Arc<StdMutex<Option<LastToolCall>>>,
) {
    if vendor.approval_phrases().is_none() {
        return;
    }

    let mut last_notified: Option<String> = None;
    loop {
        tokio::time::sleep(APPROVAL_SCAN_INTERVAL).await;
        let text = match ring.lock() {
            Ok(guard) => guard.as_text(),
            Err(_) => continue,
        };
        let Some(prompt) = detect_approval_prompt(&text, vendor) else { continue };
        if last_notified.as_deref() == Some(prompt.prompt_text.as_str()) {
            continue;
        }
        last_notified = Some(prompt.prompt_text.clone());

        tokio::time::sleep(APPROVAL_NOTIFY_DELAY).await;

        let (name, input) = match last_tool_call.lock().ok().and_then(|g| g.clone()) {
            Some(call) if ATTRIBUTION_ALLOWLIST.contains(&call.name.as_str()) => (call.name, call.input),
            _ => (String::new(), serde_json::Value::Null),
        };

        let event = ApprovalNeededEvent {
            name,
            input,
            prompt_text: prompt.prompt_text,
            poll_options: if prompt.poll_options.is_empty() { None } else { Some(prompt.poll_options) },
        };
        let _ = daemon.client.approval_needed(&session_id, &event).await;
    }
}

/// Watch the vendor's JSONL directory for new files and tail the active
/// one, forwarding parsed events to the daemon (spec §4.4.2).
async fn tail_jsonl(
    daemon: Daemon,
    session_id: String,
    vendor: Vendor,
    cwd: std::path::PathBuf,
    last_tool_call: Arc<StdMutex<Option<LastToolCall>>>,
) {
    let home = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    let today = current_date();
    let dir = touchgrass_adapters::project_dir(vendor, &home, &cwd, today);
    std::fs::create_dir_all(&dir).ok();

    let mut known = tail::list_jsonl_files(&dir);
    let mut tailer = tail::pick_initial_file(&known).map(JsonlTailer::new);
    let mut active_session_id = tailer.as_ref().and_then(|t| tail::first_session_id(t.path()));
    let mut cache = ToolUseCache::new();

    let (notify_tx, mut notify_rx) = mpsc::channel::<()>(8);
    let _watcher = spawn_directory_watcher(dir.clone(), notify_tx);

    loop {
        let _ = tokio::time::timeout(JSONL_POLL_FALLBACK, notify_rx.recv()).await;

        let current = tail::list_jsonl_files(&dir);
        if current.len() != known.len() {
            if let Some(newest) = current.last() {
                let is_new = !known.contains(newest);
                if is_new {
                    let switches = match (&tailer, &active_session_id) {
                        (Some(_), Some(sid)) => tail::file_references_session(newest, sid),
                        (None, _) => true,
                        _ => false,
                    };
                    if switches {
                        tailer = Some(JsonlTailer::new(newest.clone()));
                        active_session_id =
                            active_session_id.or_else(|| tail::first_session_id(newest));
                    }
                }
            }
            known = current;
        }

        let Some(tailer) = tailer.as_mut() else { continue };
        for line in tailer.read_new_lines() {
            let Ok(record) = serde_json::from_str::<serde_json::Value>(&line) else { continue };
            if active_session_id.is_none() {
                active_session_id = record.get("sessionId").and_then(|v| v.as_str()).map(str::to_string);
            }
            let parsed = parse_jsonl_message(&record, &mut cache);
            if parsed.is_empty() {
                continue;
            }
            emit_parsed_events(&daemon, &session_id, parsed, &last_tool_call).await;
        }
    }
}

fn current_date() -> (i32, u32, u32) {
    let now = chrono::Utc::now();
    (now.year(), now.month(), now.day())
}

fn spawn_directory_watcher(dir: std::path::PathBuf, notify_tx: mpsc::Sender<()>) -> Option<notify::RecommendedWatcher> {
    use notify::{RecursiveMode, Watcher};
    let mut watcher = notify::recommended_watcher(move |_event: notify::Result<notify::Event>| {
        let _ = notify_tx.try_send(());
    })
    .ok()?;
    watcher.watch(&dir, RecursiveMode::NonRecursive).ok()?;
    Some(watcher)
}

async fn emit_parsed_events(
    daemon: &Daemon,
    session_id: &str,
    parsed: touchgrass_parser::ParsedMessage,
    last_tool_call: &Arc<StdMutex<Option<LastToolCall>>>,
) {
    if let Some(text) = parsed.assistant_text {
        let _ = daemon.client.assistant(session_id, &AssistantEvent { text }).await;
    }
    if let Some(text) = parsed.thinking {
        let _ = daemon.client.thinking(session_id, &ThinkingEvent { text }).await;
    }
    for question in parsed.questions {
        let _ = daemon.client.question(session_id, &QuestionEvent { question, options: Vec::new() }).await;
    }
    for call in parsed.tool_calls {
        if let Ok(mut guard) = last_tool_call.lock() {
            *guard = Some(LastToolCall { name: call.name.clone(), input: call.input.clone() });
        }
        let event = ToolCallEvent { tool_use_id: call.tool_use_id, name: call.name, input: call.input };
        let _ = daemon.client.tool_call(session_id, &event).await;
    }
    for result in parsed.tool_results {
        if !should_forward_tool_result(result.name.as_deref(), &result.content, result.is_error) {
            continue;
        }
        let event = ToolResultEvent {
            tool_use_id: result.tool_use_id,
            name: result.name,
            content: result.content,
            is_error: result.is_error,
        };
        let _ = daemon.client.tool_result(session_id, &event).await;
    }
    for job in parsed.background_job_events {
        let event = BackgroundJobEvent {
            task_id: job.task_id,
            status: job.status,
            command: job.command,
            output_file: job.output_file,
            summary: job.summary,
            urls: job.urls,
        };
        let _ = daemon.client.background_job(session_id, &event).await;
    }
}

/// Drain queued chat input every 200 ms and translate it into PTY writes
/// (spec §4.4.3); also drains the `{unknown:true}` re-registration path
/// and control actions (spec §7).
async fn pump_input(
    daemon: Daemon,
    session_id: String,
    command: String,
    cwd: std::path::PathBuf,
    pty: Arc<dyn Pty>,
    write_tx: mpsc::Sender<PtyWrite>,
) {
    loop {
        tokio::time::sleep(INPUT_POLL_INTERVAL).await;
        let Ok(response) = daemon.client.get_input(&session_id).await else { continue };

        if response.unknown {
            let chat_id = touchgrass_core::ChatId::new(format!("cli:{session_id}"));
            let owner_user_id = touchgrass_core::UserId::new(format!("cli:{session_id}"));
            input_pump::reregister(&daemon, &command, chat_id, owner_user_id, &cwd, &session_id).await;
            continue;
        }

        for raw in response.input {
            let plan = plan_input(&raw);
            if write_tx.send(plan).await.is_err() {
                return;
            }
        }

        if let Some(action) = response.control.as_ref().and_then(touchgrass_core::parse_remote_control_action) {
            apply_control_action(&pty, action).await;
        }
    }
}

async fn apply_control_action(pty: &Arc<dyn Pty>, action: touchgrass_core::RemoteControlAction) {
    use touchgrass_core::RemoteControlAction;
    match action {
        RemoteControlAction::Kill => {
            let _ = pty.write(b"\x03");
            let _ = pty.kill();
        }
        RemoteControlAction::Stop => {
            let _ = pty.write(b"\x03");
            tokio::time::sleep(Duration::from_secs(1)).await;
            if !pty.has_exited() {
                let _ = pty.kill();
            }
        }
        // Resume/Start target a not-yet-running session; they're only
        // meaningful to the daemon's own session manager, not to an
        // already-attached interactive adapter.
        RemoteControlAction::Resume { .. } | RemoteControlAction::Start { .. } => {}
    }
}

/// Run the `<agent-heartbeat>` scheduler (spec §4.5) if `cwd/AGENTS.md`
/// declares one, enqueueing due workflow prompts as ordinary PTY input.
async fn run_heartbeat(cwd: std::path::PathBuf, write_tx: mpsc::Sender<PtyWrite>) {
    let Ok(agents_md) = std::fs::read_to_string(cwd.join("AGENTS.md")) else { return };
    let Some(block) = parse_heartbeat_block(&agents_md) else { return };

    let clock = SystemClock;
    let mut state = SessionHeartbeatState::new();
    loop {
        tokio::time::sleep(HEARTBEAT_TICK_INTERVAL).await;
        let now_ms = clock.epoch_ms();
        let now = chrono::Local::now();
        let today = now.date_naive();
        let weekday = now.weekday();
        let now_minutes_of_day = now.hour() * 60 + now.minute();

        for due in state.resolve_tick(&block, now_ms, today, weekday, now_minutes_of_day) {
            let Some(workflow) = due.workflow else {
                enqueue_heartbeat_text(&write_tx, &block.text, now_ms).await;
                continue;
            };
            let Ok(workflow_text) = touchgrass_heartbeat::load_workflow_text(&cwd, &workflow) else {
                state.warn_missing_workflow_once(&workflow);
                continue;
            };
            let context = build_context(&block.text, &workflow_text);
            let timestamp = now.to_rfc3339();
            let prompt = format_heartbeat_prompt(&workflow, &timestamp, &context);
            let _ = write_tx.send(plan_input(&prompt)).await;
        }
    }
}

async fn enqueue_heartbeat_text(write_tx: &mpsc::Sender<PtyWrite>, block_text: &str, _now_ms: u64) {
    if block_text.trim().is_empty() {
        return;
    }
    let _ = write_tx.send(plan_input(block_text)).await;
}

async fn wait_for_signal() -> i32 {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => return 143,
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => 130,
            _ = sigterm.recv() => 143,
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        130
    }
}
