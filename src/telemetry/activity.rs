use chrono::Duration;
use uuid::Uuid;

use crate::models::activity::relative_time_label;
use crate::models::{ActivityKind, ActivityLogEntry, Severity};

use super::simulator::TelemetrySimulator;

impl TelemetrySimulator {
    /// Fixed activity feed for the dashboard sidebar. Timestamps hang off the
    /// current clock so the relative labels stay fresh on every poll.
    pub fn activity_log(&self) -> Vec<ActivityLogEntry> {
        let now = self.clock().now();
        let entry = |back: Duration, kind: ActivityKind, message: &str| {
            let timestamp = now - back;
            ActivityLogEntry {
                id: Uuid::new_v4().to_string(),
                timestamp,
                kind,
                message: message.to_string(),
                severity: Severity::Info,
                time: relative_time_label(now, timestamp),
            }
        };

        let session_start = self.session().started_at();
        vec![
            entry(
                Duration::minutes(2),
                ActivityKind::System,
                "Temperature adjusted to optimize sleep quality",
            ),
            entry(
                Duration::minutes(8),
                ActivityKind::Sleep,
                "Deep sleep phase detected",
            ),
            entry(
                Duration::minutes(15),
                ActivityKind::HeartRate,
                "Heart rate stabilized at 68 BPM",
            ),
            entry(
                Duration::minutes(30),
                ActivityKind::Temperature,
                "Cooling system activated",
            ),
            entry(
                Duration::hours(1),
                ActivityKind::User,
                "Sleep session started",
            ),
            ActivityLogEntry {
                id: Uuid::new_v4().to_string(),
                timestamp: session_start,
                kind: ActivityKind::System,
                message: "Smart pillow monitoring session initiated".to_string(),
                severity: Severity::Info,
                time: relative_time_label(now, session_start),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::DateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::clock::ManualClock;
    use crate::session::Session;

    #[test]
    fn feed_is_ordered_newest_first_and_labeled() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let clock = Arc::new(ManualClock::new(now));
        let session = Arc::new(Session::starting_at(now - Duration::hours(8)));
        let simulator =
            TelemetrySimulator::with_rng(clock, session, StdRng::seed_from_u64(1));

        let log = simulator.activity_log();
        assert_eq!(log.len(), 6);
        for pair in log.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(log[0].time, "2 min ago");
        assert_eq!(log[4].time, "1 hour ago");
        assert_eq!(log[5].time, "8 hours ago");
        assert_eq!(log[5].kind, ActivityKind::System);
    }
}
