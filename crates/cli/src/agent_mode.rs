// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The agent-mode CLI adapter (spec §4.4): no PTY. Each queued chat turn
//! runs the assistant as a one-shot subprocess in its own
//! print/non-interactive mode, its JSONL stdout parsed the same way the
//! interactive adapter tails a JSONL file, and the vendor's own resume
//! flag is threaded from one turn's captured session id into the next
//! turn's invocation to keep the conversation continuous. There is no PTY
//! ring to scan for approval prompts here, so approval detection is out of
//! scope for this mode — a subprocess that blocks on a permission prompt
//! just runs until it exits or is cancelled. Poll-reply tokens are
//! meaningless without a PTY to replay keystrokes into, so they're
//! dropped rather than sent through as prompt text.

use std::path::Path;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use touchgrass_adapters::Vendor;
use touchgrass_daemon::lifecycle;
use touchgrass_parser::{parse_jsonl_message, should_forward_tool_result, ToolUseCache};
use touchgrass_wire::{AssistantEvent, BackgroundJobEvent, QuestionEvent, ThinkingEvent, ToolCallEvent, ToolResultEvent};

use crate::ensure_daemon::Daemon;
use crate::exit_error::ExitError;

/// How often to poll the daemon for queued chat turns — same cadence the
/// interactive adapter drains its PTY input queue at.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Grace period before a `Stop` escalates from `SIGTERM` to `SIGKILL`
/// (spec §5), same budget the interactive adapter gives the PTY child.
const STOP_GRACE: Duration = Duration::from_secs(1);

/// The flags that put each vendor into one-shot, machine-readable print
/// mode, plus its continuation flag once a session id is known.
fn turn_args(vendor: Vendor, resume_id: Option<&str>) -> Vec<String> {
    let mut args: Vec<String> = match vendor {
        Vendor::Claude => vec!["--print".into(), "--output-format".into(), "stream-json".into(), "--verbose".into()],
        Vendor::Codex => vec!["exec".into(), "--json".into()],
        Vendor::Pi => vec!["--mode".into(), "rpc".into()],
        Vendor::Kimi => vec!["--mode".into(), "rpc".into()],
    };
    if let Some(id) = resume_id {
        match vendor {
            Vendor::Claude => {
                args.push("--resume".into());
                args.push(id.to_string());
            }
            Vendor::Codex => {
                args.push("resume".into());
                args.push(id.to_string());
            }
            Vendor::Pi | Vendor::Kimi => {
                args.push("--session".into());
                args.push(id.to_string());
            }
        }
    }
    args
}

/// The only state one turn's subprocess leaves behind for the next:
/// whatever session id it reported in its own JSONL output.
fn extract_session_id(record: &serde_json::Value) -> Option<String> {
    record
        .get("session_id")
        .or_else(|| record.get("sessionId"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

pub async fn run(daemon: &Daemon, session_id: &str, vendor: Vendor, cwd: &Path, extra_args: &[String]) -> Result<i32, ExitError> {
    let command = crate::commands::launch::vendor_binary(vendor);
    let child_pid: Arc<StdMutex<Option<u32>>> = Arc::new(StdMutex::new(None));
    let mut resume_id: Option<String> = None;
    let mut cache = ToolUseCache::new();

    loop {
        tokio::time::sleep(INPUT_POLL_INTERVAL).await;
        let Ok(response) = daemon.client.get_input(session_id).await else { continue };

        if response.unknown {
            let chat_id = touchgrass_core::ChatId::new(format!("cli:{session_id}"));
            let owner_user_id = touchgrass_core::UserId::new(format!("cli:{session_id}"));
            let _ =
                crate::bootstrap::register_session(daemon, command, chat_id, owner_user_id, cwd, Some(session_id.to_string()))
                    .await;
            continue;
        }

        if let Some(action) = response.control.as_ref().and_then(touchgrass_core::parse_remote_control_action) {
            apply_control_action(&child_pid, action).await;
        }

        for raw in response.input {
            if touchgrass_adapters::parse_poll_token(&raw).is_some() || raw.trim().is_empty() {
                continue;
            }
            run_turn(daemon, session_id, vendor, command, cwd, extra_args, &raw, &mut resume_id, &mut cache, &child_pid).await;
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_turn(
    daemon: &Daemon,
    session_id: &str,
    vendor: Vendor,
    command: &str,
    cwd: &Path,
    extra_args: &[String],
    text: &str,
    resume_id: &mut Option<String>,
    cache: &mut ToolUseCache,
    child_pid: &Arc<StdMutex<Option<u32>>>,
) {
    let mut args = turn_args(vendor, resume_id.as_deref());
    args.extend_from_slice(extra_args);
    args.push(text.to_string());

    let mut child = match Command::new(command)
        .args(&args)
        .current_dir(cwd)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            report_failure(daemon, session_id, &format!("could not launch {command}: {e}")).await;
            return;
        }
    };

    if let Some(pid) = child.id() {
        if let Ok(mut guard) = child_pid.lock() {
            *guard = Some(pid);
        }
    }

    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let Ok(record) = serde_json::from_str::<serde_json::Value>(&line) else { continue };
            if resume_id.is_none() {
                *resume_id = extract_session_id(&record);
            }
            let parsed = parse_jsonl_message(&record, cache);
            if !parsed.is_empty() {
                emit_parsed_events(daemon, session_id, parsed).await;
            }
        }
    }

    let status = child.wait().await;
    if let Ok(mut guard) = child_pid.lock() {
        *guard = None;
    }

    match status {
        Ok(status) if !status.success() => {
            report_failure(daemon, session_id, &format!("{command} exited with status {status}")).await;
        }
        Err(e) => {
            report_failure(daemon, session_id, &format!("{command} failed: {e}")).await;
        }
        Ok(_) => {}
    }
}

async fn report_failure(daemon: &Daemon, session_id: &str, text: &str) {
    let _ = daemon.client.assistant(session_id, &AssistantEvent { text: text.to_string() }).await;
}

async fn emit_parsed_events(daemon: &Daemon, session_id: &str, parsed: touchgrass_parser::ParsedMessage) {
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
        let event = ToolCallEvent { tool_use_id: call.tool_use_id, name: call.name, input: call.input };
        let _ = daemon.client.tool_call(session_id, &event).await;
    }
    for result in parsed.tool_results {
        if !should_forward_tool_result(result.name.as_deref(), &result.content, result.is_error) {
            continue;
        }
        let event =
            ToolResultEvent { tool_use_id: result.tool_use_id, name: result.name, content: result.content, is_error: result.is_error };
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

/// `Kill` ends the in-flight subprocess immediately; `Stop` gives it
/// [`STOP_GRACE`] to exit on its own first (spec §5). Neither a `Resume`
/// nor a `Start` targets an already-running agent-mode loop.
async fn apply_control_action(child_pid: &Arc<StdMutex<Option<u32>>>, action: touchgrass_core::RemoteControlAction) {
    use touchgrass_core::RemoteControlAction;
    let Some(pid) = child_pid.lock().ok().and_then(|g| *g) else { return };
    match action {
        RemoteControlAction::Kill => {
            let _ = lifecycle::terminate_with_grace(pid, Duration::ZERO).await;
        }
        RemoteControlAction::Stop => {
            let _ = lifecycle::terminate_with_grace(pid, STOP_GRACE).await;
        }
        RemoteControlAction::Resume { .. } | RemoteControlAction::Start { .. } => {}
    }
}

#[cfg(test)]
#[path = "agent_mode_tests.rs"]
mod tests;
