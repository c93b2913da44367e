//! Activity log aggregation for `fleetdash activity`.

use std::collections::HashMap;

use serde::Serialize;

use crate::analytics::logger::{ActivityEntry, ActivityKind};

#[derive(Debug, Default, Serialize)]
pub struct ActivitySummary {
    pub total: usize,
    pub tab_switches: usize,
    pub actions: usize,
    pub failed_actions: usize,
    pub chat_sends: usize,
    pub fetch_failures: usize,
    /// Most visited tabs, busiest first.
    pub tabs: Vec<Count>,
    /// Regions or actions that failed most often.
    pub failing: Vec<Count>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub subject: String,
    pub count: usize,
}

pub fn summarize(entries: &[ActivityEntry]) -> ActivitySummary {
    let mut summary = ActivitySummary {
        total: entries.len(),
        ..Default::default()
    };
    let mut tabs: HashMap<&str, usize> = HashMap::new();
    let mut failing: HashMap<&str, usize> = HashMap::new();

    for e in entries {
        match e.kind {
            ActivityKind::TabSwitch => {
                summary.tab_switches += 1;
                *tabs.entry(&e.subject).or_default() += 1;
            }
            ActivityKind::Action => {
                summary.actions += 1;
                if !e.success {
                    summary.failed_actions += 1;
                }
            }
            ActivityKind::ChatSend => summary.chat_sends += 1,
            ActivityKind::FetchFailure => summary.fetch_failures += 1,
        }
        if !e.success {
            *failing.entry(&e.subject).or_default() += 1;
        }
    }

    summary.tabs = ranked(tabs);
    summary.failing = ranked(failing);
    summary
}

fn ranked(counts: HashMap<&str, usize>) -> Vec<Count> {
    let mut out: Vec<Count> = counts
        .into_iter()
        .map(|(subject, count)| Count {
            subject: subject.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.subject.cmp(&b.subject)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: ActivityKind, subject: &str, success: bool) -> ActivityEntry {
        ActivityEntry {
            timestamp: "2026-01-01T00:00:00+00:00".into(),
            kind,
            subject: subject.into(),
            success,
            detail: None,
        }
    }

    #[test]
    fn counts_by_kind_and_ranks_failures() {
        let entries = vec![
            entry(ActivityKind::TabSwitch, "garves", true),
            entry(ActivityKind::TabSwitch, "atlas", true),
            entry(ActivityKind::TabSwitch, "garves", true),
            entry(ActivityKind::Action, "approve 3", false),
            entry(ActivityKind::FetchFailure, "garves-logs", false),
            entry(ActivityKind::FetchFailure, "garves-logs", false),
            entry(ActivityKind::ChatSend, "all", true),
        ];
        let s = summarize(&entries);
        assert_eq!(s.total, 7);
        assert_eq!(s.tab_switches, 3);
        assert_eq!(s.failed_actions, 1);
        assert_eq!(s.fetch_failures, 2);
        assert_eq!(s.chat_sends, 1);
        assert_eq!(s.tabs[0], Count { subject: "garves".into(), count: 2 });
        assert_eq!(s.failing[0].subject, "garves-logs");
    }

    #[test]
    fn empty_log_summarizes_to_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0);
        assert!(s.tabs.is_empty());
    }
}
