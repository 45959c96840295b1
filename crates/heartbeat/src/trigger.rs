// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `<run>` trigger attributes: `always`, `every="<duration>"`, `at="HH:MM"`.
//! A run with none of the three defaults to `Always`.

use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Always,
    Every(Duration),
    At { hour: u32, minute: u32 },
}

fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(r#"{name}\s*=\s*"([^"]*)""#)).expect("static attr pattern is valid regex")
}

fn attr<'a>(attrs: &'a str, name: &str) -> Option<std::borrow::Cow<'a, str>> {
    attr_regex(name).captures(attrs).map(|c| std::borrow::Cow::Owned(c[1].to_string()))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "" | "true" | "1" | "yes")
}

/// `N`, `Nm`, or `Nh`, minutes by default.
fn parse_every_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let (num_str, suffix) = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| (&s[..i], &s[i..]))
        .unwrap_or((s, ""));
    let num: u64 = num_str.parse().ok()?;
    let minutes = match suffix {
        "" | "m" => num,
        "h" => num * 60,
        _ => return None,
    };
    Some(Duration::from_secs(minutes * 60))
}

fn parse_at(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour < 24 && minute < 60 {
        Some((hour, minute))
    } else {
        None
    }
}

impl Trigger {
    pub fn from_attrs(attrs: &str) -> Self {
        if let Some(every) = attr(attrs, "every") {
            if let Some(duration) = parse_every_duration(&every) {
                return Trigger::Every(duration);
            }
        }
        if let Some(at) = attr(attrs, "at") {
            if let Some((hour, minute)) = parse_at(&at) {
                return Trigger::At { hour, minute };
            }
        }
        if let Some(always) = attr(attrs, "always") {
            if is_truthy(&always) {
                return Trigger::Always;
            }
        }
        Trigger::Always
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
