// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `on="daily|weekdays|weekends|<day-name-list>"` day-of-week gating.

use chrono::Weekday;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayGate {
    Daily,
    Weekdays,
    Weekends,
    Named(Vec<Weekday>),
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

impl DayGate {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => DayGate::Daily,
            "weekdays" => DayGate::Weekdays,
            "weekends" => DayGate::Weekends,
            other => {
                let days: Vec<Weekday> = other.split(',').filter_map(parse_weekday).collect();
                if days.is_empty() {
                    DayGate::Daily
                } else {
                    DayGate::Named(days)
                }
            }
        }
    }

    pub fn allows(&self, weekday: Weekday) -> bool {
        match self {
            DayGate::Daily => true,
            DayGate::Weekdays => !matches!(weekday, Weekday::Sat | Weekday::Sun),
            DayGate::Weekends => matches!(weekday, Weekday::Sat | Weekday::Sun),
            DayGate::Named(days) => days.contains(&weekday),
        }
    }
}

#[cfg(test)]
#[path = "day_gate_tests.rs"]
mod tests;
