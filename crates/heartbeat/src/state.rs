// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session heartbeat scheduler state and tick resolution. Pure: the
//! only inputs are the block, the current instant, and this state; no
//! clock or file-system access happens here.

use crate::block::{HeartbeatBlock, RunRule};
use crate::day_gate::DayGate;
use crate::trigger::Trigger;
use chrono::{NaiveDate, Weekday};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueWorkflow {
    /// `None` for the "plain text, no `<run>` tags" case (spec §4.5).
    pub workflow: Option<String>,
}

#[derive(Debug, Default)]
pub struct SessionHeartbeatState {
    last_every_run_at_ms: HashMap<String, u64>,
    last_at_run_date: HashMap<String, NaiveDate>,
    missing_workflow_warned: HashSet<String>,
}

impl SessionHeartbeatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn_missing_workflow_once(&mut self, workflow: &str) -> bool {
        self.missing_workflow_warned.insert(workflow.to_string())
    }

    /// Resolve the set of workflows due to fire this tick, mutating
    /// rate-limit state for any run that becomes due. `today`, `weekday`,
    /// and `now_minutes_of_day` are the caller's wall-clock reading in the
    /// timezone `at`/`on` are meant to be evaluated in (local, per spec);
    /// this module never touches a clock itself.
    pub fn resolve_tick(
        &mut self,
        block: &HeartbeatBlock,
        now_ms: u64,
        today: NaiveDate,
        weekday: Weekday,
        now_minutes_of_day: u32,
    ) -> Vec<DueWorkflow> {
        if block.runs.is_empty() {
            return if block.text.trim().is_empty() {
                Vec::new()
            } else {
                vec![DueWorkflow { workflow: None }]
            };
        }

        block
            .runs
            .iter()
            .filter(|run| self.is_due(run, block.interval_minutes, now_ms, today, weekday, now_minutes_of_day))
            .map(|run| DueWorkflow { workflow: Some(run.workflow.clone()) })
            .collect()
    }

    fn is_due(
        &mut self,
        run: &RunRule,
        interval_minutes: u32,
        now_ms: u64,
        today: NaiveDate,
        weekday: Weekday,
        now_minutes_of_day: u32,
    ) -> bool {
        if let Some(on) = &run.on {
            if !DayGate::parse(on).allows(weekday) {
                return false;
            }
        }

        match &run.trigger {
            Trigger::Always => true,
            Trigger::Every(duration) => {
                let last = self.last_every_run_at_ms.get(&run.workflow).copied().unwrap_or(0);
                let due = now_ms.saturating_sub(last) >= duration.as_millis() as u64;
                if due {
                    self.last_every_run_at_ms.insert(run.workflow.clone(), now_ms);
                }
                due
            }
            Trigger::At { hour, minute } => {
                let scheduled_minutes_of_day = hour * 60 + minute;
                let lag = now_minutes_of_day as i64 - scheduled_minutes_of_day as i64;
                let already_ran_today = self.last_at_run_date.get(&run.workflow) == Some(&today);
                let due = !already_ran_today && lag >= 0 && lag < interval_minutes as i64;
                if due {
                    self.last_at_run_date.insert(run.workflow.clone(), today);
                }
                due
            }
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
