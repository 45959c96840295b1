// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Session Manager (spec §4.1): the single shared-state authority for
//! every registry the daemon holds — sessions, chat attachments, group
//! subscriptions, pickers, and pending file mentions — behind one mutex,
//! matching the teacher's owner-gated-mutation, cascade-cleanup pattern in
//! its listener mutation modules.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use touchgrass_core::{
    Clock, PickerState, RemoteControlAction, Session, SessionId, SystemClock, UserId,
};
use touchgrass_core::ChatId;

#[derive(Default)]
struct Registries {
    sessions: HashMap<SessionId, Session>,
    /// Forward: which session a chat currently feeds input to / receives
    /// primary output from.
    chat_attachments: HashMap<ChatId, SessionId>,
    /// Reverse of `chat_attachments`, for cascade-on-remove with no
    /// back-pointers (spec §9).
    session_chats: HashMap<SessionId, HashSet<ChatId>>,
    pickers: HashMap<String, PickerState>,
    /// Reverse of `pickers`, keyed by session id.
    session_pickers: HashMap<SessionId, HashSet<String>>,
    pending_file_mentions: HashMap<(SessionId, ChatId, UserId), Vec<String>>,
}

/// Owns every live registry the daemon reasons about, under one mutex
/// held only for the duration of a single operation (spec §5).
pub struct SessionManager<C: Clock = SystemClock> {
    clock: C,
    inner: Mutex<Registries>,
}

impl SessionManager<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SessionManager<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionManager<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, inner: Mutex::new(Registries::default()) }
    }

    /// Register a fresh session, or reconnect one if `existing_id` names a
    /// session already tracked. Auto-attaches to `chat_id` iff no session
    /// is already attached there.
    pub fn register_remote(
        &self,
        command: impl Into<String>,
        chat_id: ChatId,
        owner_user_id: UserId,
        cwd: impl Into<String>,
        existing_id: Option<&str>,
    ) -> Session {
        let now = self.clock.epoch_ms();
        let mut g = self.inner.lock();

        if let Some(existing) = existing_id.and_then(SessionId::parse) {
            if let Some(session) = g.sessions.get_mut(&existing) {
                session.last_heartbeat_at = now;
                let reconnected = session.clone();
                let id = reconnected.id;
                drop(g);
                self.attach_if_unbound(id, chat_id);
                return reconnected;
            }
        }

        let mut id = existing_id.and_then(SessionId::parse).unwrap_or_else(SessionId::generate);
        while g.sessions.contains_key(&id) {
            id = SessionId::generate();
        }
        let session = Session::new(id, command, cwd, chat_id.clone(), owner_user_id, now);
        g.sessions.insert(id, session.clone());
        drop(g);
        self.attach_if_unbound(id, chat_id);
        self.get_remote(&id).unwrap_or(session)
    }

    fn attach_if_unbound(&self, id: SessionId, chat_id: ChatId) {
        let mut g = self.inner.lock();
        if !g.chat_attachments.contains_key(&chat_id) {
            g.chat_attachments.insert(chat_id.clone(), id);
            g.session_chats.entry(id).or_default().insert(chat_id);
        }
    }

    /// Cascading removal: detach every chat bound to this session, drop
    /// its group subscriptions, evict its pickers and pending mentions.
    pub fn remove_remote(&self, id: &SessionId) -> Option<Session> {
        let mut g = self.inner.lock();
        let session = g.sessions.remove(id)?;

        if let Some(chats) = g.session_chats.remove(id) {
            for chat in chats {
                g.chat_attachments.remove(&chat);
            }
        }
        if let Some(poll_ids) = g.session_pickers.remove(id) {
            for poll_id in poll_ids {
                g.pickers.remove(&poll_id);
            }
        }
        g.pending_file_mentions.retain(|(session_id, _, _), _| session_id != id);
        Some(session)
    }

    pub fn get_remote(&self, id: &SessionId) -> Option<Session> {
        self.inner.lock().sessions.get(id).cloned()
    }

    pub fn get_attached_remote(&self, chat_id: &ChatId) -> Option<SessionId> {
        self.inner.lock().chat_attachments.get(chat_id).copied()
    }

    /// The chat a session's non-tool output should go to: a non-owner
    /// bound chat (group/topic) takes precedence over the owner DM.
    pub fn get_bound_chat(&self, id: &SessionId) -> Option<ChatId> {
        let g = self.inner.lock();
        let session = g.sessions.get(id)?;
        if let Some(chats) = g.session_chats.get(id) {
            if let Some(non_owner) = chats.iter().find(|c| **c != session.chat_id) {
                return Some(non_owner.clone());
            }
        }
        Some(session.chat_id.clone())
    }

    /// Bind `chat_id` to `session_id`, detaching it from any prior session.
    pub fn attach(&self, chat_id: ChatId, session_id: SessionId) -> bool {
        let mut g = self.inner.lock();
        if !g.sessions.contains_key(&session_id) {
            return false;
        }
        if let Some(prior) = g.chat_attachments.get(&chat_id).copied() {
            if let Some(chats) = g.session_chats.get_mut(&prior) {
                chats.remove(&chat_id);
            }
        }
        g.chat_attachments.insert(chat_id.clone(), session_id);
        g.session_chats.entry(session_id).or_default().insert(chat_id);
        true
    }

    pub fn detach(&self, chat_id: &ChatId) -> bool {
        let mut g = self.inner.lock();
        match g.chat_attachments.remove(chat_id) {
            Some(session_id) => {
                if let Some(chats) = g.session_chats.get_mut(&session_id) {
                    chats.remove(chat_id);
                }
                true
            }
            None => false,
        }
    }

    pub fn subscribe_group(&self, session_id: &SessionId, chat_id: ChatId) -> bool {
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => {
                session.group_subscriptions.insert(chat_id);
                true
            }
            None => false,
        }
    }

    pub fn unsubscribe_group(&self, session_id: &SessionId, chat_id: &ChatId) -> bool {
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => session.group_subscriptions.remove(chat_id),
            None => false,
        }
    }

    pub fn get_subscribed_groups(&self, session_id: &SessionId) -> HashSet<ChatId> {
        self.inner
            .lock()
            .sessions
            .get(session_id)
            .map(|s| s.group_subscriptions.clone())
            .unwrap_or_default()
    }

    pub fn can_user_access_session(&self, user_id: &UserId, session_id: &SessionId) -> bool {
        self.inner.lock().sessions.get(session_id).is_some_and(|s| &s.owner_user_id == user_id)
    }

    pub fn drain_remote_input(&self, session_id: &SessionId) -> Vec<String> {
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => session.drain_input(),
            None => Vec::new(),
        }
    }

    pub fn drain_remote_control(&self, session_id: &SessionId) -> Option<RemoteControlAction> {
        let mut g = self.inner.lock();
        g.sessions.get_mut(session_id)?.drain_control()
    }

    /// Enqueue an arbitrary control action, merging with whatever is
    /// already pending (spec §4.1's `RemoteControlAction::merge`).
    pub fn enqueue_control(&self, session_id: &SessionId, action: RemoteControlAction) -> bool {
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => {
                session.enqueue_control(action);
                true
            }
            None => false,
        }
    }

    pub fn request_remote_stop(&self, session_id: &SessionId) -> bool {
        self.enqueue_control(session_id, RemoteControlAction::Stop)
    }

    pub fn request_remote_kill(&self, session_id: &SessionId) -> bool {
        self.enqueue_control(session_id, RemoteControlAction::Kill)
    }

    pub fn request_remote_resume(&self, session_id: &SessionId, session_ref: String) -> bool {
        if !RemoteControlAction::is_safe_session_ref(&session_ref) {
            return false;
        }
        self.enqueue_control(session_id, RemoteControlAction::Resume { session_ref })
    }

    pub fn request_remote_start(
        &self,
        session_id: &SessionId,
        tool: Option<String>,
        args: Option<Vec<String>>,
    ) -> bool {
        self.enqueue_control(session_id, RemoteControlAction::Start { tool, args })
    }

    pub fn enqueue_input(&self, session_id: &SessionId, text: String) -> bool {
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => {
                session.input_queue.push_back(text);
                true
            }
            None => false,
        }
    }

    pub fn touch_heartbeat(&self, session_id: &SessionId) -> bool {
        let now = self.clock.epoch_ms();
        let mut g = self.inner.lock();
        match g.sessions.get_mut(session_id) {
            Some(session) => {
                session.last_heartbeat_at = now;
                true
            }
            None => false,
        }
    }

    pub fn create_picker(&self, picker: PickerState) {
        let mut g = self.inner.lock();
        g.session_pickers.entry(picker.session_id).or_default().insert(picker.poll_id.clone());
        g.pickers.insert(picker.poll_id.clone(), picker);
    }

    pub fn get_picker(&self, poll_id: &str) -> Option<PickerState> {
        self.inner.lock().pickers.get(poll_id).cloned()
    }

    pub fn update_picker(&self, poll_id: &str, f: impl FnOnce(&mut PickerState)) -> bool {
        let mut g = self.inner.lock();
        match g.pickers.get_mut(poll_id) {
            Some(picker) => {
                f(picker);
                true
            }
            None => false,
        }
    }

    pub fn remove_picker(&self, poll_id: &str) -> Option<PickerState> {
        let mut g = self.inner.lock();
        let picker = g.pickers.remove(poll_id)?;
        if let Some(poll_ids) = g.session_pickers.get_mut(&picker.session_id) {
            poll_ids.remove(poll_id);
        }
        Some(picker)
    }

    pub fn set_pending_file_mentions(
        &self,
        session_id: SessionId,
        chat_id: ChatId,
        user_id: UserId,
        mentions: Vec<String>,
    ) {
        self.inner.lock().pending_file_mentions.insert((session_id, chat_id, user_id), mentions);
    }

    /// Single-use: takes and clears the pending mentions for this key.
    pub fn take_pending_file_mentions(
        &self,
        session_id: &SessionId,
        chat_id: &ChatId,
        user_id: &UserId,
    ) -> Option<Vec<String>> {
        self.inner
            .lock()
            .pending_file_mentions
            .remove(&(*session_id, chat_id.clone(), user_id.clone()))
    }

    pub fn all_sessions(&self) -> Vec<Session> {
        self.inner.lock().sessions.values().cloned().collect()
    }

    /// Remove every session whose `lastHeartbeatAt` is older than
    /// `max_age_ms`, cascading the same cleanup as `remove_remote`.
    pub fn reap_stale_remotes(&self, max_age_ms: u64) -> Vec<Session> {
        let now = self.clock.epoch_ms();
        let stale_ids: Vec<SessionId> = self
            .inner
            .lock()
            .sessions
            .values()
            .filter(|s| s.is_stale(now, max_age_ms))
            .map(|s| s.id)
            .collect();
        stale_ids.iter().filter_map(|id| self.remove_remote(id)).collect()
    }

    /// Drop every trace of a chat: detach it, unsubscribe it from every
    /// session, and purge its pending file mentions (spec §4.9).
    pub fn purge_chat(&self, chat_id: &ChatId) {
        self.detach(chat_id);
        let mut g = self.inner.lock();
        for session in g.sessions.values_mut() {
            session.group_subscriptions.remove(chat_id);
        }
        g.pending_file_mentions.retain(|(_, chat, _), _| chat != chat_id);
    }
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
