use std::sync::{Arc, Mutex};

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;
use crate::models::HistoricalPoint;
use crate::session::Session;

// Sleep efficiency: no more than 90% of time in bed, never more than 8h.
const SLEEP_EFFICIENCY: f64 = 0.9;
const MAX_SLEEP_MINUTES: f64 = 480.0;
const TARGET_SESSION_HOURS: f64 = 8.0;
// Floor on session progress so the most recent bucket always shows a
// substantial total instead of ramping discontinuously from zero.
const PROGRESS_FLOOR: f64 = 0.85;

const LIGHT_SLEEP_RATIO: f64 = 0.58;
const REM_SLEEP_RATIO: f64 = 0.22;

/// Reconstructs a bounded hourly series of cumulative sleep consistent with
/// overall session progress. The series is synthesized on every call; only
/// the session anchor makes consecutive calls agree with each other.
pub struct HistoryAggregator {
    clock: Arc<dyn Clock>,
    session: Arc<Session>,
    rng: Mutex<StdRng>,
}

impl HistoryAggregator {
    pub fn new(clock: Arc<dyn Clock>, session: Arc<Session>) -> Self {
        Self::with_rng(clock, session, StdRng::from_entropy())
    }

    pub fn with_rng(clock: Arc<dyn Clock>, session: Arc<Session>, rng: StdRng) -> Self {
        Self {
            clock,
            session,
            rng: Mutex::new(rng),
        }
    }

    /// One point per hour boundary ending at "now", oldest first. Cumulative
    /// sleep minutes never decrease along the returned series. Zero hours
    /// back yields an empty series.
    pub fn historical_series(&self, hours_back: u32) -> Vec<HistoricalPoint> {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        let start_ms = self.session.started_at().timestamp_millis();
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let session_hours = self.session.duration_hours(now);
        let session_minutes = (session_hours * 60.0).max(0.0);
        let max_sleep_minutes = (session_minutes * SLEEP_EFFICIENCY).min(MAX_SLEEP_MINUTES);

        let progress = (session_hours / TARGET_SESSION_HOURS).min(1.0);
        let current_total_sleep = max_sleep_minutes * progress.max(PROGRESS_FLOOR);

        // Deep sleep concentrates in the first half of the night.
        let deep_ratio = if session_hours < 4.0 { 0.25 } else { 0.2 };
        let current_deep = current_total_sleep * deep_ratio;
        let current_light = current_total_sleep * LIGHT_SLEEP_RATIO;
        let current_rem = current_total_sleep * REM_SLEEP_RATIO;

        let mut series = Vec::with_capacity(hours_back as usize);
        for i in (0..hours_back as i64).rev() {
            let timestamp = now - Duration::hours(i);
            let ts_ms = timestamp.timestamp_millis();

            if ts_ms <= start_ms {
                // Before the session: baseline environmental noise, no sleep.
                series.push(HistoricalPoint {
                    timestamp,
                    deep_sleep: 0.0,
                    light_sleep: 0.0,
                    rem_sleep: 0.0,
                    temperature: 22.0 + rng.gen_range(0.0..2.0),
                    heart_rate: 60.0 + rng.gen_range(0.0..15.0),
                    sleep_score: 0.0,
                    humidity: 45.0 + rng.gen_range(0.0..10.0),
                    co2_level: 400.0 + rng.gen_range(0.0..50.0),
                });
            } else if i == 0 {
                // Most recent bucket carries the full cumulative totals.
                let sleep_score = if current_total_sleep > 300.0 {
                    75.0 + rng.gen_range(0.0..20.0)
                } else {
                    (current_total_sleep / 10.0).max(0.0)
                };
                series.push(HistoricalPoint {
                    timestamp,
                    deep_sleep: current_deep,
                    light_sleep: current_light,
                    rem_sleep: current_rem,
                    temperature: 22.0 + rng.gen_range(0.0..2.0),
                    heart_rate: 60.0 + rng.gen_range(0.0..15.0),
                    sleep_score,
                    humidity: 45.0 + rng.gen_range(0.0..10.0),
                    co2_level: 400.0 + rng.gen_range(0.0..50.0),
                });
            } else {
                // Earlier in-session buckets scale the split by how far
                // through the session the bucket falls.
                let time_progress = ((ts_ms - start_ms) as f64 / (now_ms - start_ms) as f64)
                    .clamp(0.0, 1.0);
                let sleep_score = if time_progress > 0.3 {
                    75.0 + rng.gen_range(0.0..20.0)
                } else {
                    (time_progress * 60.0).max(0.0)
                };
                series.push(HistoricalPoint {
                    timestamp,
                    deep_sleep: current_deep * time_progress,
                    light_sleep: current_light * time_progress,
                    rem_sleep: current_rem * time_progress,
                    temperature: 22.0 + rng.gen_range(0.0..2.0),
                    heart_rate: 60.0 + rng.gen_range(0.0..15.0),
                    sleep_score,
                    humidity: 45.0 + rng.gen_range(0.0..10.0),
                    co2_level: 400.0 + rng.gen_range(0.0..50.0),
                });
            }
        }

        series
    }
}
