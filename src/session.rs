use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// How far in the past a fresh session is anchored, so a full night of data
/// is already on screen when the dashboard opens.
const DEFAULT_BACKDATE_HOURS: i64 = 8;

/// A single monitoring period. The start timestamp is fixed at construction
/// and never mutated; all phase and cumulative-sleep math is relative to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    started_at: DateTime<Utc>,
}

impl Session {
    /// New session backdated by the default full-night offset.
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            started_at: clock.now() - Duration::hours(DEFAULT_BACKDATE_HOURS),
        }
    }

    /// New session with an explicit start, for tests and scripted demos.
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        now - self.started_at
    }

    pub fn duration_hours(&self, now: DateTime<Utc>) -> f64 {
        (now - self.started_at).num_milliseconds() as f64 / 3_600_000.0
    }
}
