// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poll keystroke replay (§4.4.3): queued input is either ordinary text or
//! an ANSI-escape-prefixed control token describing keystrokes to send to
//! the assistant's in-terminal picker.

const BRACKETED_PASTE_START: &str = "\x1b[200~";
const BRACKETED_PASTE_END: &str = "\x1b[201~";

/// Wrap `text` in a bracketed-paste sequence so the assistant's terminal
/// treats it as pasted text rather than in-terminal picker shortcuts (the
/// `@` mention menu, slash-command completion, etc).
pub fn bracketed_paste(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + BRACKETED_PASTE_START.len() + BRACKETED_PASTE_END.len());
    out.extend_from_slice(BRACKETED_PASTE_START.as_bytes());
    out.extend_from_slice(text.as_bytes());
    out.extend_from_slice(BRACKETED_PASTE_END.as_bytes());
    out
}

/// True iff `path` looks like an uploaded attachment the assistant needs
/// extra time to load before the Enter keystroke follows.
pub fn is_upload_path(text: &str) -> bool {
    text.contains("/.touchgrass/uploads/")
}

/// A parsed queued-input control token (§4.4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollToken {
    /// Step to each option index and press Enter (single-select) or press
    /// Enter at each without submitting (multi-select).
    Select { option_indices: Vec<usize>, multi: bool },
    /// Step to the "Next" button and press Enter.
    Next { last_position: usize, count: usize },
    /// Press Enter on the already-focused "Submit answers" line.
    Submit,
    /// No keystrokes; the next plain text input is a free-text response.
    Other,
}

/// A single terminal keystroke in a replay plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Down,
    Enter,
}

/// Parse a queued-input string into a [`PollToken`], or `None` if it is
/// ordinary text (to be sent via [`bracketed_paste`] instead).
pub fn parse_poll_token(input: &str) -> Option<PollToken> {
    let body = input.strip_prefix("\x1b[")?.strip_suffix(']')?;

    if body == "POLL_SUBMIT" {
        return Some(PollToken::Submit);
    }
    if body == "POLL_OTHER" {
        return Some(PollToken::Other);
    }
    if let Some(rest) = body.strip_prefix("POLL_NEXT:") {
        let mut parts = rest.splitn(2, ':');
        let last_position = parts.next()?.parse().ok()?;
        let count = parts.next()?.parse().ok()?;
        return Some(PollToken::Next { last_position, count });
    }
    if let Some(rest) = body.strip_prefix("POLL:") {
        let mut parts = rest.splitn(2, ':');
        let ids = parts.next()?;
        let multi = parts.next()? == "1";
        let option_indices: Vec<usize> = ids
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<_, _>>()
            .ok()?;
        if option_indices.is_empty() {
            return None;
        }
        return Some(PollToken::Select { option_indices, multi });
    }

    None
}

/// Expand a [`PollToken`] into the keystroke sequence the PTY writer
/// replays. `current_position` is the index the picker's cursor currently
/// sits at (always 0 immediately after a poll is rendered).
pub fn replay_keystrokes(token: &PollToken) -> Vec<Keystroke> {
    match token {
        PollToken::Select { option_indices, multi: _ } => {
            // Single- and multi-select replay identically here: Enter at
            // each target index. Multi-select relies on a later
            // `POLL_SUBMIT` token rather than an extra keystroke now.
            let mut keys = Vec::new();
            let mut position = 0usize;
            for &target in option_indices {
                for _ in position..target {
                    keys.push(Keystroke::Down);
                }
                keys.push(Keystroke::Enter);
                position = target;
            }
            keys
        }
        PollToken::Next { last_position, count } => {
            let mut keys = Vec::new();
            for _ in 0..(*count - *last_position) {
                keys.push(Keystroke::Down);
            }
            keys.push(Keystroke::Enter);
            keys
        }
        PollToken::Submit => vec![Keystroke::Enter],
        PollToken::Other => Vec::new(),
    }
}

#[cfg(test)]
#[path = "poll_replay_tests.rs"]
mod tests;
