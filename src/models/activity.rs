use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Temperature,
    HeartRate,
    System,
    Sleep,
    User,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Immutable feed entry. The `time` label is computed at read time from the
/// injected clock, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub message: String,
    pub severity: Severity,
    pub time: String,
}

/// Human-readable "how long ago" label for the activity feed.
pub fn relative_time_label(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let diff_ms = (now - then).num_milliseconds();
    let diff_minutes = diff_ms / 60_000;
    let diff_hours = diff_ms / 3_600_000;
    let diff_days = diff_ms / 86_400_000;

    if diff_ms < 60_000 {
        "Just now".to_string()
    } else if diff_minutes < 60 {
        format!("{} min ago", diff_minutes)
    } else if diff_hours < 24 {
        if diff_hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", diff_hours)
        }
    } else if diff_days == 1 {
        "1 day ago".to_string()
    } else {
        format!("{} days ago", diff_days)
    }
}
