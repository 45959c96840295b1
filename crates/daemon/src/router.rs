// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command router (spec §4.7): normalizes `/cmd@BotName` and `tg <cmd>`
//! into one canonical command, then decides what the daemon should do
//! without performing any chat-network I/O itself — callers apply the
//! returned [`RouterOutcome`] through a `ChatAdapter`.

use touchgrass_core::{
    ChatId, Config, OutputMode, PickerKind, PickerState, RemoteControlAction, SessionId, UserId,
};

use crate::session_manager::SessionManager;

const ALWAYS_ALLOWED_BEFORE_LINK: &[&str] = &["link", "unlink", "start", "kill", "stop", "pair"];

/// A normalized command, parsed from either Telegram slash-command syntax
/// or the `tg <cmd>` alias form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pair { code: Option<String> },
    Start { tool: Option<String>, args: Vec<String> },
    Help,
    Kill,
    Resume { last: bool },
    Files { query: Option<String> },
    OutputMode { mode: Option<OutputModeArg> },
    Thinking { setting: Option<ThinkingArg> },
    Link,
    Unlink,
    PlainText(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputModeArg {
    Simple,
    Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingArg {
    On,
    Off,
    Toggle,
}

/// What the daemon should do in response to a parsed command. Performing
/// the corresponding chat-network call is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterOutcome {
    NeedsPairing,
    GroupNotLinked,
    EnqueueControl { session_id: SessionId, action: RemoteControlAction },
    EnqueueInput { session_id: SessionId, text: String },
    OpenPicker(PickerState),
    SetOutputMode { chat_id: ChatId, mode: OutputMode },
    SetThinking { chat_id: ChatId, on: bool },
    CampInactive,
    NoSessionAttached,
    Reply(String),
    /// `/pair <code>`: the caller must validate `code` against its own
    /// pending-pairing-code store and mutate config, since the router only
    /// ever reads config.
    CompletePairing { chat_id: ChatId, user_id: UserId, code: String },
}

const HELP_TEXT: &str = "Commands: /start /kill /resume /files /output_mode /thinking /pair /link /unlink";

/// Split `"/cmd@BotName"` into `"/cmd"`, and accept a leading `tg ` alias.
/// Returns `None` (i.e. plain text) when the input isn't command-shaped.
fn normalize_command(raw: &str, bot_name: &str) -> Command {
    let trimmed = raw.trim();

    let body = if let Some(rest) = trimmed.strip_prefix('/') {
        let at_suffix = format!("@{bot_name}");
        Some(rest.strip_suffix(&at_suffix).unwrap_or(rest).to_string())
    } else if let Some(rest) = trimmed.strip_prefix("tg ") {
        Some(rest.to_string())
    } else {
        None
    };

    let Some(body) = body else {
        return Command::PlainText(trimmed.to_string());
    };

    let mut parts = body.split_whitespace();
    let name = parts.next().unwrap_or("").to_lowercase();
    let rest: Vec<&str> = parts.collect();

    match name.as_str() {
        "pair" => Command::Pair { code: rest.first().map(|s| s.to_string()) },
        "start" => Command::Start {
            tool: rest.first().map(|s| s.to_string()),
            args: rest.get(1..).map(|r| r.iter().map(|s| s.to_string()).collect()).unwrap_or_default(),
        },
        "help" => Command::Help,
        "kill" | "stop" => Command::Kill,
        "resume" => Command::Resume { last: rest.first() == Some(&"--last") },
        "files" => Command::Files { query: if rest.is_empty() { None } else { Some(rest.join(" ")) } },
        "output_mode" => Command::OutputMode {
            mode: match rest.first().copied() {
                Some("simple") => Some(OutputModeArg::Simple),
                Some("verbose") => Some(OutputModeArg::Verbose),
                _ => None,
            },
        },
        "thinking" => Command::Thinking {
            setting: match rest.first().copied() {
                Some("on") => Some(ThinkingArg::On),
                Some("off") => Some(ThinkingArg::Off),
                Some("toggle") => Some(ThinkingArg::Toggle),
                _ => None,
            },
        },
        "link" => Command::Link,
        "unlink" => Command::Unlink,
        _ => Command::PlainText(trimmed.to_string()),
    }
}

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Pair { .. } => "pair",
        Command::Start { .. } => "start",
        Command::Help => "help",
        Command::Kill => "kill",
        Command::Resume { .. } => "resume",
        Command::Files { .. } => "files",
        Command::OutputMode { .. } => "output_mode",
        Command::Thinking { .. } => "thinking",
        Command::Link => "link",
        Command::Unlink => "unlink",
        Command::PlainText(_) => "plaintext",
    }
}

pub struct CommandRouter<'a> {
    pub sessions: &'a SessionManager,
    pub config: &'a Config,
    pub bot_name: &'a str,
}

impl<'a> CommandRouter<'a> {
    pub fn new(sessions: &'a SessionManager, config: &'a Config, bot_name: &'a str) -> Self {
        Self { sessions, config, bot_name }
    }

    /// Route one inbound chat message. `is_group` and `thread` are carried
    /// by `chat_id` itself via `ChatId::thread()`/namespacing conventions.
    pub fn route(&self, chat_id: &ChatId, user_id: &UserId, text: &str) -> RouterOutcome {
        let cmd = normalize_command(text, self.bot_name);

        if let Command::Pair { code } = cmd {
            return self.handle_pair(chat_id, user_id, code);
        }

        // Telegram convention: group/supergroup chat ids are negative; a
        // thread id implies a forum topic, itself only possible in a group.
        let is_group = chat_id.thread().is_some() || chat_id.native_id().starts_with('-');
        if is_group
            && !self.config.is_linked(chat_id)
            && !ALWAYS_ALLOWED_BEFORE_LINK.contains(&command_name(&cmd))
        {
            return RouterOutcome::GroupNotLinked;
        }

        // Priority order from spec: /pair, /start in a DM, /help all bypass
        // the pairing gate; everything else needs a paired owner.
        let bypasses_pairing =
            matches!(cmd, Command::Help) || (matches!(cmd, Command::Start { .. }) && !is_group);
        if !self.config.is_paired(user_id) && !bypasses_pairing {
            return RouterOutcome::NeedsPairing;
        }

        match cmd {
            Command::Pair { .. } => unreachable!("handled above"),
            Command::Help => RouterOutcome::Reply(HELP_TEXT.to_string()),
            Command::Link | Command::Unlink => RouterOutcome::Reply("ok".to_string()),
            Command::Start { tool, args } => self.handle_start(chat_id, user_id, tool, args),
            Command::Kill => self.handle_kill(chat_id),
            Command::Resume { last } => self.handle_resume(chat_id, user_id, last),
            Command::Files { query } => self.handle_files(chat_id, user_id, query),
            Command::OutputMode { mode } => self.handle_output_mode(chat_id, mode),
            Command::Thinking { setting } => self.handle_thinking(chat_id, setting),
            Command::PlainText(body) => self.handle_plain_text(chat_id, body),
        }
    }

    fn handle_pair(&self, chat_id: &ChatId, user_id: &UserId, code: Option<String>) -> RouterOutcome {
        match code {
            Some(code) => {
                RouterOutcome::CompletePairing { chat_id: chat_id.clone(), user_id: user_id.clone(), code }
            }
            None => RouterOutcome::Reply(
                "Run `tg pair` in your terminal, then send /pair <code> here to link this account."
                    .to_string(),
            ),
        }
    }

    fn handle_start(
        &self,
        chat_id: &ChatId,
        user_id: &UserId,
        tool: Option<String>,
        args: Vec<String>,
    ) -> RouterOutcome {
        match self.sessions.get_attached_remote(chat_id) {
            Some(session_id) if self.sessions.can_user_access_session(user_id, &session_id) => {
                RouterOutcome::EnqueueControl {
                    session_id,
                    action: RemoteControlAction::Start { tool, args: Some(args) },
                }
            }
            Some(_) => RouterOutcome::Reply("Only the session owner can do that.".to_string()),
            None => RouterOutcome::CampInactive,
        }
    }

    fn handle_kill(&self, chat_id: &ChatId) -> RouterOutcome {
        match self.sessions.get_attached_remote(chat_id) {
            Some(session_id) => {
                RouterOutcome::EnqueueControl { session_id, action: RemoteControlAction::Kill }
            }
            None => RouterOutcome::NoSessionAttached,
        }
    }

    fn handle_resume(&self, chat_id: &ChatId, user_id: &UserId, _last: bool) -> RouterOutcome {
        let Some(session_id) = self.sessions.get_attached_remote(chat_id) else {
            return RouterOutcome::NoSessionAttached;
        };
        // The caller supplies the actual file listing (vendor-specific);
        // this only opens the picker shell with it already resolved.
        RouterOutcome::OpenPicker(PickerState::new(
            format!("resume-{session_id}"),
            session_id,
            chat_id.clone(),
            user_id.clone(),
            PickerKind::ResumeSession,
            Vec::new(),
            5,
        ))
    }

    fn handle_files(&self, chat_id: &ChatId, user_id: &UserId, _query: Option<String>) -> RouterOutcome {
        let Some(session_id) = self.sessions.get_attached_remote(chat_id) else {
            return RouterOutcome::NoSessionAttached;
        };
        RouterOutcome::OpenPicker(PickerState::new(
            format!("files-{session_id}"),
            session_id,
            chat_id.clone(),
            user_id.clone(),
            PickerKind::ResumeFile,
            Vec::new(),
            8,
        ))
    }

    fn handle_output_mode(&self, chat_id: &ChatId, mode: Option<OutputModeArg>) -> RouterOutcome {
        let mode = match mode {
            Some(OutputModeArg::Simple) => OutputMode::Compact,
            Some(OutputModeArg::Verbose) => OutputMode::Verbose,
            None => self.config.preference(chat_id).output_mode_or_default(),
        };
        RouterOutcome::SetOutputMode { chat_id: chat_id.clone(), mode }
    }

    fn handle_thinking(&self, chat_id: &ChatId, setting: Option<ThinkingArg>) -> RouterOutcome {
        let current = self.config.preference(chat_id).thinking_or_default();
        let on = match setting {
            Some(ThinkingArg::On) => true,
            Some(ThinkingArg::Off) => false,
            Some(ThinkingArg::Toggle) | None => !current,
        };
        RouterOutcome::SetThinking { chat_id: chat_id.clone(), on }
    }

    fn handle_plain_text(&self, chat_id: &ChatId, body: String) -> RouterOutcome {
        match self.sessions.get_attached_remote(chat_id) {
            Some(session_id) => RouterOutcome::EnqueueInput { session_id, text: body },
            None => RouterOutcome::NoSessionAttached,
        }
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
