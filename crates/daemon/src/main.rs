// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tgd`: the touchgrass daemon binary. Acquires the lock file, loads
//! config, wires the Session Manager and control server together, then
//! runs the inbound chat-poll loop and the periodic reconciliation/reaper
//! timers until told to shut down.

use std::sync::Arc;

use chrono::Datelike;
use parking_lot::RwLock;
use tokio::net::TcpListener;
use touchgrass_adapters::TelegramLongPollAdapter;
use touchgrass_core::Session;
use touchgrass_daemon::board_tracker::{BoardTracker, JobEventOutcome};
use touchgrass_daemon::pairing::PairingCodes;
use touchgrass_daemon::server::{self, AppState};
use touchgrass_daemon::session_manager::SessionManager;
use touchgrass_daemon::{dispatch, env, lifecycle};
use touchgrass_storage::BoardStore;
use touchgrass_wire::ChatAdapter;

fn now_ms() -> u64 {
    std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap_or_default().as_millis() as u64
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("touchgrass_daemon=info,tower_http=warn"));
    let state_dir = env::state_dir();
    std::fs::create_dir_all(&state_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&state_dir, "daemon.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(non_blocking).with_ansi(false).init();

    if let Err(err) = run(state_dir).await {
        tracing::error!(error = %err, "daemon exited with an error");
        std::process::exit(1);
    }
}

async fn run(state_dir: std::path::PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = lifecycle::acquire_lock(&env::lock_path(&state_dir))?;
    std::fs::write(env::pid_path(&state_dir), std::process::id().to_string())?;

    let config_path = env::config_path(&state_dir);
    let config = touchgrass_storage::load_config(&config_path).unwrap_or_default();
    let auth_token = std::fs::read_to_string(env::auth_token_path(&state_dir))
        .unwrap_or_else(|_| env::generate_auth_token());
    std::fs::write(env::auth_token_path(&state_dir), &auth_token)?;

    let bot_token = std::env::var("TOUCHGRASS_TELEGRAM_BOT_TOKEN")
        .map_err(|_| "TOUCHGRASS_TELEGRAM_BOT_TOKEN must be set")?;
    let bot_name = std::env::var("TOUCHGRASS_BOT_NAME").unwrap_or_else(|_| "touchgrass_bot".to_string());
    let telegram = Arc::new(TelegramLongPollAdapter::new(bot_token));
    let chat_adapter: Arc<dyn ChatAdapter> = telegram.clone();

    let board_store = Arc::new(BoardStore::new(env::status_boards_path(&state_dir)));
    let boards = Arc::new(BoardTracker::new());

    let state = AppState {
        sessions: Arc::new(SessionManager::new()),
        boards,
        board_store,
        config: Arc::new(RwLock::new(config)),
        config_path: Arc::new(config_path),
        pairing_codes: Arc::new(PairingCodes::new()),
        chat_adapter,
        auth_token: Arc::new(auth_token),
        started_at: now_ms(),
        bot_name: Arc::new(bot_name),
        shutdown: Arc::new(tokio::sync::Notify::new()),
    };

    let router = server::build_router(state.clone());

    let server_task = if let Some(port) = env::tcp_port_override() {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        std::fs::write(env::port_path(&state_dir), listener.local_addr()?.port().to_string())?;
        tracing::info!(port, "control server listening on tcp");
        tokio::spawn(serve(listener, router, state.shutdown.clone()))
    } else {
        let sock_path = env::sock_path(&state_dir);
        let _ = std::fs::remove_file(&sock_path);
        let listener = tokio::net::UnixListener::bind(&sock_path)?;
        set_socket_permissions(&sock_path);
        tracing::info!(path = %sock_path.display(), "control server listening on unix socket");
        tokio::spawn(serve_unix(listener, router, state.shutdown.clone()))
    };

    let poll_task = tokio::spawn(inbound_poll_loop(state.clone(), telegram));
    let reconcile_task = tokio::spawn(board_reconcile_loop(state.clone()));
    let reaper_task = tokio::spawn(stale_session_reaper_loop(state.clone()));

    state.shutdown.notified().await;
    tracing::info!("shutdown requested, stopping background tasks");
    poll_task.abort();
    reconcile_task.abort();
    reaper_task.abort();
    server_task.abort();

    lifecycle::remove_process_files(&state_dir);
    Ok(())
}

#[cfg(unix)]
fn set_socket_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Ok(meta) = std::fs::metadata(path) {
        let mut perms = meta.permissions();
        perms.set_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }
}

async fn serve(listener: TcpListener, router: axum::Router, shutdown: Arc<tokio::sync::Notify>) {
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await;
    if let Err(err) = result {
        tracing::error!(error = %err, "control server (tcp) stopped");
    }
}

async fn serve_unix(listener: tokio::net::UnixListener, router: axum::Router, shutdown: Arc<tokio::sync::Notify>) {
    let result = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await;
    if let Err(err) = result {
        tracing::error!(error = %err, "control server (unix) stopped");
    }
}

/// Long-poll the chat network and apply every message/poll answer that
/// comes back through the router and dispatch layer (spec §4.7).
async fn inbound_poll_loop(state: AppState, telegram: Arc<TelegramLongPollAdapter>) {
    loop {
        match telegram.poll_updates().await {
            Ok(batch) => {
                for message in batch.messages {
                    dispatch::handle_inbound_message(
                        &state.sessions,
                        &state.config,
                        &state.pairing_codes,
                        state.chat_adapter.as_ref(),
                        &state.bot_name,
                        &message.chat_id,
                        &message.user_id,
                        &message.text,
                        state.now_ms(),
                    )
                    .await;
                }
                for answer in batch.poll_answers {
                    dispatch::handle_poll_answer(
                        &state.sessions,
                        state.chat_adapter.as_ref(),
                        touchgrass_wire::PollAnswer {
                            poll_id: answer.poll_id,
                            // Telegram's poll_answer update carries no chat id;
                            // the picker record (looked up by poll_id) supplies it.
                            chat_id: touchgrass_core::ChatId::new(""),
                            user_id: answer.user_id,
                            selected_indices: answer.selected_indices,
                            free_text: None,
                        },
                    )
                    .await;
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "getUpdates failed, retrying");
                tokio::time::sleep(std::time::Duration::from_secs(2)).await;
            }
        }
    }
}

async fn board_reconcile_loop(state: AppState) {
    let mut ticker = tokio::time::interval(lifecycle::BOARD_RECONCILE_INTERVAL);
    loop {
        ticker.tick().await;
        for session in state.sessions.all_sessions() {
            reconcile_session_jsonl(&state, &session).await;
        }
        for (chat_id, board_key) in state.boards.orphaned_boards(state.now_ms()) {
            state.boards.clear_board(&chat_id, &board_key);
        }
        if let Err(err) = state.boards.persist(&state.board_store).await {
            tracing::warn!(error = %err, "failed to persist status boards");
        }
    }
}

/// Re-read a session's vendor JSONL for terminal background-job events
/// the CLI's own POST might have missed, and announce them the same way
/// the live `background_job` route does.
async fn reconcile_session_jsonl(state: &AppState, session: &Session) {
    let Some(vendor) = touchgrass_adapters::Vendor::from_command(&session.command) else { return };
    let Some(home) = dirs::home_dir() else { return };
    let now = chrono::Utc::now();
    let dir = touchgrass_adapters::project_dir(vendor, &home, std::path::Path::new(&session.cwd), (now.year(), now.month(), now.day()));
    let Some(path) = latest_jsonl(&dir) else { return };
    let Ok(content) = tokio::fs::read_to_string(&path).await else { return };

    for outcome in state.boards.reconcile_from_jsonl(session.id, content.lines().map(str::to_string)) {
        if let JobEventOutcome::Terminal(job) = outcome {
            if let Some(chat_id) = state.sessions.get_bound_chat(&session.id) {
                let text = format!("Background job {} finished: {:?}", job.task_id, job.status);
                let _ = state.chat_adapter.send(&chat_id, &text).await;
            }
        }
    }
}

fn latest_jsonl(dir: &std::path::Path) -> Option<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "jsonl"))
        .max_by_key(|entry| entry.metadata().and_then(|m| m.modified()).ok())
        .map(|entry| entry.path())
}

async fn stale_session_reaper_loop(state: AppState) {
    let mut ticker = tokio::time::interval(lifecycle::REAPER_INTERVAL);
    loop {
        ticker.tick().await;
        let reaped = state.sessions.reap_stale_remotes(lifecycle::STALE_SESSION_MAX_AGE_MS);
        for session in reaped {
            tracing::info!(session = %session.id, "reaped stale session");
            let _ = state.chat_adapter.send(&session.chat_id, "disconnected (CLI stopped responding)").await;
            state.boards.drop_session(&session.id);
        }
    }
}
