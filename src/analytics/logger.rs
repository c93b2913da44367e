use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::expand_home;
use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Activity entry (JSONL)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    TabSwitch,
    Action,
    ChatSend,
    FetchFailure,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TabSwitch => "tab-switch",
            Self::Action => "action",
            Self::ChatSend => "chat-send",
            Self::FetchFailure => "fetch-failure",
        }
    }
}

/// One line of `~/.fleetdash/activity.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub kind: ActivityKind,
    /// Tab key, action label, chat target or region id.
    pub subject: String,
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Log handle
// ---------------------------------------------------------------------------

/// Best-effort activity log. Write failures are ignored.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    path: Option<PathBuf>,
}

impl ActivityLog {
    pub fn from_config(cfg: &LoggingConfig) -> Self {
        if cfg.enabled {
            Self::at(expand_home(&cfg.path))
        } else {
            Self::disabled()
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn record(&self, kind: ActivityKind, subject: &str, success: bool, detail: Option<&str>) {
        let entry = ActivityEntry {
            timestamp: Utc::now().to_rfc3339(),
            kind,
            subject: subject.to_string(),
            success,
            detail: detail.map(str::to_string),
        };
        let _ = self.append(&entry);
    }

    fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;
        Ok(())
    }

    /// All entries, skipping malformed lines.
    pub fn read_all(&self) -> Vec<ActivityEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };
        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ActivityEntry>(&line).ok())
            .collect()
    }

    /// Entries from the last `days` days, or all of them.
    pub fn read_since_days(&self, days: Option<u32>) -> Vec<ActivityEntry> {
        let entries = self.read_all();
        let Some(days) = days else {
            return entries;
        };
        let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();
        entries
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> ActivityLog {
        let path = std::env::temp_dir().join(format!(
            "fleetdash-{name}-{}.jsonl",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        ActivityLog::at(path)
    }

    #[test]
    fn records_and_reads_back() {
        let log = temp_log("roundtrip");
        log.record(ActivityKind::TabSwitch, "atlas", true, None);
        log.record(ActivityKind::FetchFailure, "garves-logs", false, Some("timed out"));
        let entries = log.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].kind, ActivityKind::FetchFailure);
        assert_eq!(entries[1].detail.as_deref(), Some("timed out"));
        let _ = fs::remove_file(log.path().unwrap());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let log = temp_log("malformed");
        fs::write(log.path().unwrap(), "not json\n").unwrap();
        log.record(ActivityKind::Action, "health scan", true, None);
        assert_eq!(log.read_all().len(), 1);
        let _ = fs::remove_file(log.path().unwrap());
    }

    #[test]
    fn disabled_log_is_silent() {
        let log = ActivityLog::disabled();
        log.record(ActivityKind::ChatSend, "all", true, None);
        assert!(log.read_all().is_empty());
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ActivityKind::FetchFailure).unwrap();
        assert_eq!(json, "\"fetch-failure\"");
        assert_eq!(ActivityKind::FetchFailure.as_str(), "fetch-failure");
    }
}
