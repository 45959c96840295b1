// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applies a [`RouterOutcome`] through a [`ChatAdapter`]: the glue between
//! the pure command router and actual chat-network I/O. Kept as a thin
//! free function rather than a struct method so either the HTTP-bound
//! inbound-message path or a future adapter can drive it identically.

use parking_lot::RwLock;
use touchgrass_core::{ChatId, Config, PickerKind, PickerState, UserId};
use touchgrass_wire::{ChatAdapter, PollAnswer};

use crate::pairing::{pair_user, PairingCodes};
use crate::router::{CommandRouter, RouterOutcome};
use crate::session_manager::SessionManager;

/// Trailing sentinel option that pages to the next slice of a picker's
/// option list. Consumes one page slot, per the `nextOffset` formula on
/// [`PickerState::next_offset`].
const MORE: &str = "➡️ More";
/// File-picker-only sentinel: discards the accumulated toggle selections.
/// Only shown once something has been toggled on.
const CLEAR_SELECTED: &str = "🧹 Clear selected";
/// File-picker-only sentinel: closes the picker without writing any
/// pending mentions.
const CANCEL: &str = "❌ Cancel";

fn picker_question(kind: PickerKind) -> &'static str {
    match kind {
        PickerKind::ResumeSession => "Pick a session to resume:",
        PickerKind::ResumeFile => "Pick a file to attach:",
        PickerKind::Question => "Question:",
        PickerKind::OutputMode => "Pick an output mode:",
    }
}

/// The options a picker's next poll should actually show: its current
/// page, a trailing "More" when there's another page, and — for file
/// pickers only — "Clear selected" (once something is toggled) and
/// "Cancel".
fn picker_display_options(picker: &PickerState) -> Vec<String> {
    let mut options: Vec<String> = picker.current_page().to_vec();
    if picker.has_more() {
        options.push(MORE.to_string());
    }
    if picker.kind == PickerKind::ResumeFile {
        if !picker.selected_mentions.is_empty() {
            options.push(CLEAR_SELECTED.to_string());
        }
        options.push(CANCEL.to_string());
    }
    options
}

/// Close out the current poll and open a fresh one reflecting the
/// picker's latest state, under the same `poll_id` slot.
async fn redraw_picker(sessions: &SessionManager, chat_adapter: &dyn ChatAdapter, poll_id: &str) {
    let Some(picker) = sessions.remove_picker(poll_id) else { return };
    let question = picker_question(picker.kind);
    let options = picker_display_options(&picker);
    if let Ok(new_poll_id) = chat_adapter.send_poll(&picker.chat_id, question, &options).await {
        let mut picker = picker;
        picker.poll_id = new_poll_id;
        sessions.create_picker(picker);
    }
}

/// Route one inbound chat message and carry out its effect: reply text,
/// preference updates, or queuing work onto the attached session.
pub async fn handle_inbound_message(
    sessions: &SessionManager,
    config: &RwLock<Config>,
    pairing_codes: &PairingCodes,
    chat_adapter: &dyn ChatAdapter,
    bot_name: &str,
    chat_id: &ChatId,
    user_id: &UserId,
    text: &str,
    now_ms: u64,
) {
    let outcome = {
        let guard = config.read();
        CommandRouter::new(sessions, &guard, bot_name).route(chat_id, user_id, text)
    };

    match outcome {
        RouterOutcome::NeedsPairing => {
            let _ = chat_adapter.send(chat_id, "You need to /pair before using this bot.").await;
        }
        RouterOutcome::GroupNotLinked => {
            let _ = chat_adapter.send(chat_id, "This group isn't linked yet. Use /link to link it.").await;
        }
        RouterOutcome::EnqueueControl { session_id, action } => {
            sessions.enqueue_control(&session_id, action);
        }
        RouterOutcome::EnqueueInput { session_id, text } => {
            let text = match sessions.take_pending_file_mentions(&session_id, chat_id, user_id) {
                Some(mentions) if !mentions.is_empty() => {
                    let prefix = mentions.iter().map(|m| format!("@{m}")).collect::<Vec<_>>().join(" ");
                    format!("{prefix} {text}")
                }
                _ => text,
            };
            sessions.enqueue_input(&session_id, text);
        }
        RouterOutcome::OpenPicker(picker) => {
            let question = picker_question(picker.kind);
            let options = picker_display_options(&picker);
            if let Ok(poll_id) = chat_adapter.send_poll(&picker.chat_id, question, &options).await {
                let mut picker = picker;
                picker.poll_id = poll_id;
                sessions.create_picker(picker);
            }
        }
        RouterOutcome::SetOutputMode { chat_id, mode } => {
            {
                let mut guard = config.write();
                guard.chat_preferences.entry(chat_id.clone()).or_default().output_mode = Some(mode);
            }
            let _ = chat_adapter.send(&chat_id, &format!("Output mode set to {mode:?}.")).await;
        }
        RouterOutcome::SetThinking { chat_id, on } => {
            {
                let mut guard = config.write();
                guard.chat_preferences.entry(chat_id.clone()).or_default().thinking = Some(on);
            }
            let label = if on { "on" } else { "off" };
            let _ = chat_adapter.send(&chat_id, &format!("Thinking display turned {label}.")).await;
        }
        RouterOutcome::CampInactive => {
            let _ = chat_adapter
                .send(chat_id, "No assistant is camped here yet. Use /start <tool> to launch one.")
                .await;
        }
        RouterOutcome::NoSessionAttached => {
            let _ = chat_adapter.send(chat_id, "No session is attached to this chat.").await;
        }
        RouterOutcome::Reply(text) => {
            let _ = chat_adapter.send(chat_id, &text).await;
        }
        RouterOutcome::CompletePairing { chat_id, user_id, code } => match pairing_codes.redeem(&code, now_ms) {
            Some(channel) => {
                {
                    let mut guard = config.write();
                    pair_user(&mut guard, &channel, user_id, now_ms);
                }
                let _ = chat_adapter.send(&chat_id, "Paired! You can now use the bot.").await;
            }
            None => {
                let _ = chat_adapter.send(&chat_id, "That pairing code is invalid or expired.").await;
            }
        },
    }
}

/// Apply a poll/selection answer. A tap on "More" or (file pickers only)
/// "Clear selected" redraws the poll in place; a real option on a file
/// picker toggles its mention and stays open; a real option on any other
/// picker translates into a replayable keystroke token and closes.
pub async fn handle_poll_answer(sessions: &SessionManager, chat_adapter: &dyn ChatAdapter, answer: PollAnswer) {
    let Some(picker) = sessions.get_picker(&answer.poll_id) else {
        return;
    };
    if picker.owner_user_id != answer.user_id {
        return;
    }
    let Some(&tapped) = answer.selected_indices.first() else {
        return;
    };
    let display = picker_display_options(&picker);
    let Some(choice) = display.get(tapped) else {
        return;
    };
    let page_len = picker.current_page().len();

    match choice.as_str() {
        MORE => {
            sessions.update_picker(&answer.poll_id, |p| p.offset = p.next_offset());
            redraw_picker(sessions, chat_adapter, &answer.poll_id).await;
        }
        CLEAR_SELECTED if picker.kind == PickerKind::ResumeFile => {
            sessions.update_picker(&answer.poll_id, PickerState::clear_mentions);
            sessions.set_pending_file_mentions(picker.session_id, picker.chat_id.clone(), picker.owner_user_id.clone(), Vec::new());
            redraw_picker(sessions, chat_adapter, &answer.poll_id).await;
        }
        CANCEL if picker.kind == PickerKind::ResumeFile => {
            sessions.remove_picker(&answer.poll_id);
        }
        _ if tapped < page_len && picker.kind == PickerKind::ResumeFile => {
            sessions.update_picker(&answer.poll_id, |p| p.toggle_mention(choice));
            let mentions =
                sessions.get_picker(&answer.poll_id).map(|p| p.selected_mentions).unwrap_or_default();
            sessions.set_pending_file_mentions(picker.session_id, picker.chat_id.clone(), picker.owner_user_id.clone(), mentions);
            redraw_picker(sessions, chat_adapter, &answer.poll_id).await;
        }
        _ if tapped < page_len => {
            let global_index = picker.offset + tapped;
            sessions.enqueue_input(&picker.session_id, format!("\x1b[POLL:{global_index}:0]"));
            sessions.remove_picker(&answer.poll_id);
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
