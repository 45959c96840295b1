// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Route handlers for the control server (spec §4.6), plus the ambient
//! `/metrics` endpoint (observability the spec's non-goals don't cover).

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use touchgrass_core::{BackgroundJob, BackgroundJobStatus, ChatId, SessionId};
use touchgrass_wire::{
    ApiError, BindChatRequest, ExitRequest, GenerateCodeRequest, GenerateCodeResponse, HealthResponse,
    InputResponse, OkResponse, RegisterRequest, RegisterResponse, SendInputRequest, SessionSummary,
    StatusResponse, SubscribedGroupsResponse,
};
use touchgrass_wire::{ApprovalNeededEvent, AssistantEvent, BackgroundJobEvent, QuestionEvent, ThinkingEvent, ToolCallEvent, ToolResultEvent, TypingEvent};

use super::auth::api_error;
use super::state::AppState;
use crate::board_tracker::JobEventOutcome;

fn parse_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).ok_or(ApiError::UnknownSession)
}

fn err(e: ApiError) -> Response {
    api_error(e)
}

pub async fn not_found() -> Response {
    api_error(ApiError::BadRequest("no such route".to_string()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { pid: std::process::id(), started_at: state.started_at })
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let sessions = state
        .sessions
        .all_sessions()
        .into_iter()
        .map(|s| SessionSummary {
            id: s.id.to_string(),
            command: s.command,
            state: "running".to_string(),
            created_at: s.created_at,
        })
        .collect();
    let uptime = state.now_ms().saturating_sub(state.started_at) / 1000;
    Json(StatusResponse { pid: std::process::id(), uptime, sessions })
}

pub async fn shutdown(State(state): State<AppState>) -> Json<OkResponse> {
    state.shutdown.notify_one();
    Json(OkResponse::default())
}

pub async fn generate_code(
    State(state): State<AppState>,
    Json(req): Json<GenerateCodeRequest>,
) -> Json<GenerateCodeResponse> {
    let (code, expires_at) = state.pairing_codes.generate(req.channel, state.now_ms());
    Json(GenerateCodeResponse { code, expires_at })
}

pub async fn channels(State(state): State<AppState>) -> Json<Vec<touchgrass_wire::ChannelSummary>> {
    let guard = state.config.read();
    let summaries = guard
        .channels
        .values()
        .flat_map(|channel| {
            channel.linked_groups.iter().map(move |group| touchgrass_wire::ChannelSummary {
                chat_id: group.chat_id.clone(),
                title: group.title.clone().unwrap_or_default(),
                kind: channel.channel_type.clone(),
                busy: false,
                busy_label: None,
            })
        })
        .collect();
    Json(summaries)
}

pub async fn register(State(state): State<AppState>, Json(req): Json<RegisterRequest>) -> Response {
    let already_attached = state.sessions.get_attached_remote(&req.chat_id);
    let session = state.sessions.register_remote(
        req.command,
        req.chat_id.clone(),
        req.owner_user_id,
        req.cwd,
        req.existing_id.as_deref(),
    );
    for group in req.subscribed_groups {
        state.sessions.subscribe_group(&session.id, group);
    }

    let dm_busy = already_attached.is_some_and(|id| id != session.id);
    let linked_groups = state.sessions.get_subscribed_groups(&session.id).into_iter().collect();
    let channel = req.chat_id.channel();
    let all_linked_groups = state
        .config
        .read()
        .channels
        .get(channel)
        .map(|c| c.linked_groups.iter().map(|g| g.chat_id.clone()).collect())
        .unwrap_or_default();

    Json(RegisterResponse {
        session_id: session.id.to_string(),
        dm_busy,
        linked_groups,
        all_linked_groups,
    })
    .into_response()
}

pub async fn bind_chat(State(state): State<AppState>, Json(req): Json<BindChatRequest>) -> Response {
    let session_id = match parse_id(&req.session_id) {
        Ok(id) => id,
        Err(e) => return err(e),
    };
    if state.sessions.attach(req.chat_id, session_id) {
        Json(OkResponse::default()).into_response()
    } else {
        err(ApiError::UnknownSession)
    }
}

pub async fn get_input(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_id(&id) {
        Ok(id) => id,
        Err(_) => return Json(InputResponse::unknown()).into_response(),
    };
    if state.sessions.get_remote(&session_id).is_none() {
        return Json(InputResponse::unknown()).into_response();
    }
    state.sessions.touch_heartbeat(&session_id);
    let input = state.sessions.drain_remote_input(&session_id);
    let control = state.sessions.drain_remote_control(&session_id).and_then(|a| serde_json::to_value(a).ok());
    Json(InputResponse { unknown: false, input, control }).into_response()
}

pub async fn send_input(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<SendInputRequest>,
) -> Response {
    let session_id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return err(e),
    };
    if state.sessions.enqueue_input(&session_id, req.text) {
        Json(OkResponse::default()).into_response()
    } else {
        err(ApiError::UnknownSession)
    }
}

pub async fn exit_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(_req): Json<ExitRequest>,
) -> Response {
    let session_id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return err(e),
    };
    state.boards.drop_session(&session_id);
    match state.sessions.remove_remote(&session_id) {
        Some(_) => Json(OkResponse::default()).into_response(),
        None => err(ApiError::UnknownSession),
    }
}

pub async fn subscribed_groups(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let session_id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return err(e),
    };
    if state.sessions.get_remote(&session_id).is_none() {
        return err(ApiError::UnknownSession);
    }
    let chat_ids = state.sessions.get_subscribed_groups(&session_id).into_iter().collect();
    let bound_chat = state.sessions.get_bound_chat(&session_id);
    Json(SubscribedGroupsResponse { chat_ids, bound_chat }).into_response()
}

async fn bound_chat_or_unknown(state: &AppState, id: &str) -> Result<(SessionId, ChatId), Response> {
    let session_id = parse_id(id).map_err(err)?;
    match state.sessions.get_bound_chat(&session_id) {
        Some(chat_id) => Ok((session_id, chat_id)),
        None => Err(err(ApiError::UnknownSession)),
    }
}

pub async fn tool_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ToolCallEvent>,
) -> Response {
    let (_, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    let _ = state.chat_adapter.set_typing(&chat_id, true).await;
    let _ = state.chat_adapter.send(&chat_id, &format!("Running: {}", event.name)).await;
    Json(OkResponse::default()).into_response()
}

pub async fn tool_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ToolResultEvent>,
) -> Response {
    let (_, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    if event.is_error {
        let name = event.name.unwrap_or_else(|| "tool".to_string());
        let _ = state.chat_adapter.send(&chat_id, &format!("{name} failed: {}", event.content)).await;
    }
    Json(OkResponse::default()).into_response()
}

pub async fn approval_needed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ApprovalNeededEvent>,
) -> Response {
    let (session_id, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    let options = event.poll_options.unwrap_or_else(|| vec!["Approve".to_string(), "Deny".to_string()]);
    if let Ok(poll_id) = state.chat_adapter.send_poll(&chat_id, &event.prompt_text, &options).await {
        let owner = state.sessions.get_remote(&session_id).map(|s| s.owner_user_id);
        if let Some(owner) = owner {
            state.sessions.create_picker(touchgrass_core::PickerState::new(
                poll_id,
                session_id,
                chat_id,
                owner,
                touchgrass_core::PickerKind::Question,
                options,
                5,
            ));
        }
    }
    Json(OkResponse::default()).into_response()
}

pub async fn question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<QuestionEvent>,
) -> Response {
    let (session_id, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    if let Ok(poll_id) = state.chat_adapter.send_poll(&chat_id, &event.question, &event.options).await {
        let owner = state.sessions.get_remote(&session_id).map(|s| s.owner_user_id);
        if let Some(owner) = owner {
            state.sessions.create_picker(touchgrass_core::PickerState::new(
                poll_id,
                session_id,
                chat_id,
                owner,
                touchgrass_core::PickerKind::Question,
                event.options,
                5,
            ));
        }
    }
    Json(OkResponse::default()).into_response()
}

pub async fn thinking(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<ThinkingEvent>,
) -> Response {
    let (_, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    if state.config.read().preference(&chat_id).thinking_or_default() {
        let _ = state.chat_adapter.send(&chat_id, &format!("_{}_", event.text)).await;
    }
    Json(OkResponse::default()).into_response()
}

pub async fn assistant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<AssistantEvent>,
) -> Response {
    let (_, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    let _ = state.chat_adapter.send(&chat_id, &event.text).await;
    Json(OkResponse::default()).into_response()
}

pub async fn typing(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<TypingEvent>,
) -> Response {
    let (_, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    let _ = state.chat_adapter.set_typing(&chat_id, event.on).await;
    Json(OkResponse::default()).into_response()
}

pub async fn background_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<BackgroundJobEvent>,
) -> Response {
    let (session_id, chat_id) = match bound_chat_or_unknown(&state, &id).await {
        Ok(v) => v,
        Err(r) => return r,
    };
    let status = match event.status.as_str() {
        "completed" => BackgroundJobStatus::Completed,
        "failed" => BackgroundJobStatus::Failed,
        "killed" => BackgroundJobStatus::Killed,
        _ => BackgroundJobStatus::Running,
    };
    let now = state.now_ms();
    let mut job = BackgroundJob::new(event.task_id, status, now);
    job.command = event.command;
    job.output_file = event.output_file;
    job.summary = event.summary;
    job.urls = event.urls;

    let announcement = match state.boards.record_job_event(session_id, job) {
        JobEventOutcome::Started(job) => Some(format!("Started background job: {}", job.task_id)),
        JobEventOutcome::Updated(_) => None,
        JobEventOutcome::Terminal(job) => {
            Some(format!("Background job {} finished: {:?}", job.task_id, job.status))
        }
    };
    if let Some(text) = announcement {
        let _ = state.chat_adapter.send(&chat_id, &text).await;
    }

    let summaries = state.boards.running_job_summaries(&session_id);
    let body = touchgrass_core::board::render_board_body(&summaries);
    if let Ok(message_id) = state.chat_adapter.upsert_status_board(&chat_id, "default", &body).await {
        state.boards.upsert_board(chat_id, "default", message_id, now);
        let _ = state.boards.persist(&state.board_store).await;
    }

    Json(OkResponse::default()).into_response()
}

pub async fn metrics(State(state): State<AppState>) -> String {
    let session_count = state.sessions.all_sessions().len();
    let uptime = state.now_ms().saturating_sub(state.started_at) / 1000;
    format!(
        "# HELP touchgrass_sessions_active Number of live sessions.\n\
         # TYPE touchgrass_sessions_active gauge\n\
         touchgrass_sessions_active {session_count}\n\
         # HELP touchgrass_uptime_seconds Seconds since the daemon started.\n\
         # TYPE touchgrass_uptime_seconds gauge\n\
         touchgrass_uptime_seconds {uptime}\n"
    )
}
