use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DemoEvent, DemoScenario};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EngineStatus {
    Idle,
    Running,
}

impl Default for EngineStatus {
    fn default() -> Self {
        EngineStatus::Idle
    }
}

/// What one evaluation of the running timeline produced.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No scenario running; the ticker should not be alive.
    Idle,
    /// Events whose offset matched the elapsed second (possibly none).
    Fired(Vec<DemoEvent>),
    /// The run reached its duration and the state has been reset.
    Finished,
}

/// Playback cursor for the one scenario that can run at a time. Pure state
/// machine; the async ticker in `engine` drives it and all time comes in as
/// an argument, so it is testable without a runtime.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    status: EngineStatus,
    scenario: Option<DemoScenario>,
    run_started_at: Option<DateTime<Utc>>,
    last_tick_secs: Option<i64>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.status == EngineStatus::Running
    }

    pub fn scenario_name(&self) -> Option<&str> {
        self.scenario.as_ref().map(|scenario| scenario.name.as_str())
    }

    pub fn begin(&mut self, scenario: DemoScenario, now: DateTime<Utc>) {
        *self = Self {
            status: EngineStatus::Running,
            scenario: Some(scenario),
            run_started_at: Some(now),
            last_tick_secs: None,
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn elapsed_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        self.run_started_at
            .map(|started| (now - started).num_milliseconds().div_euclid(1000))
    }

    /// Evaluate the timeline against "now". Each elapsed second is processed
    /// at most once, so a tick that lands twice in the same second cannot
    /// re-fire events.
    pub fn on_tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.status != EngineStatus::Running {
            return TickOutcome::Idle;
        }
        let Some(elapsed) = self.elapsed_secs(now) else {
            return TickOutcome::Idle;
        };
        let Some(scenario) = self.scenario.as_ref() else {
            return TickOutcome::Idle;
        };

        if elapsed >= scenario.duration_secs as i64 {
            self.clear();
            return TickOutcome::Finished;
        }

        if elapsed < 0 || self.last_tick_secs == Some(elapsed) {
            return TickOutcome::Fired(Vec::new());
        }

        let due: Vec<DemoEvent> = scenario
            .events
            .iter()
            .filter(|event| event.offset_secs as i64 == elapsed)
            .cloned()
            .collect();
        self.last_tick_secs = Some(elapsed);
        TickOutcome::Fired(due)
    }

    /// Fraction of the running scenario completed, 0 when idle.
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let (Some(scenario), Some(started)) = (self.scenario.as_ref(), self.run_started_at) else {
            return 0.0;
        };
        if self.status != EngineStatus::Running || scenario.duration_secs == 0 {
            return 0.0;
        }
        let elapsed = (now - started).num_milliseconds() as f64 / 1000.0;
        (elapsed / scenario.duration_secs as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventKind, EventValue};
    use chrono::Duration;

    fn scenario_x() -> DemoScenario {
        DemoScenario {
            name: "X".to_string(),
            description: "single alert".to_string(),
            duration_secs: 10,
            events: vec![DemoEvent {
                offset_secs: 3,
                kind: EventKind::Alert,
                action: "co2_rise".to_string(),
                value: Some(EventValue::Number(520.0)),
                message: None,
            }],
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn event_fires_exactly_once_at_its_offset() {
        let mut state = EngineState::new();
        state.begin(scenario_x(), t0());

        let mut fired = Vec::new();
        for second in 0..10 {
            match state.on_tick(t0() + Duration::seconds(second)) {
                TickOutcome::Fired(events) => fired.extend(events),
                other => panic!("unexpected outcome at {}s: {:?}", second, other),
            }
        }
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, "co2_rise");

        // Reaching the duration resets the machine.
        assert_eq!(state.on_tick(t0() + Duration::seconds(10)), TickOutcome::Finished);
        assert!(!state.is_running());
        assert_eq!(state.progress(t0() + Duration::seconds(11)), 0.0);
    }

    #[test]
    fn same_second_is_not_processed_twice() {
        let mut state = EngineState::new();
        state.begin(scenario_x(), t0());

        let now = t0() + Duration::seconds(3);
        let first = state.on_tick(now);
        let second = state.on_tick(now + Duration::milliseconds(400));

        assert!(matches!(first, TickOutcome::Fired(ref events) if events.len() == 1));
        assert_eq!(second, TickOutcome::Fired(Vec::new()));
    }

    #[test]
    fn progress_is_monotone_and_clamped() {
        let mut state = EngineState::new();
        assert_eq!(state.progress(t0()), 0.0);

        state.begin(scenario_x(), t0());
        let mut last = -1.0;
        for second in 0..=12 {
            let progress = state.progress(t0() + Duration::seconds(second));
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        assert_eq!(state.progress(t0() + Duration::seconds(12)), 1.0);
    }

    #[test]
    fn idle_state_ticks_to_idle() {
        let mut state = EngineState::new();
        assert_eq!(state.on_tick(t0()), TickOutcome::Idle);
        assert_eq!(state.scenario_name(), None);
    }

    #[test]
    fn begin_replaces_a_previous_run() {
        let mut state = EngineState::new();
        state.begin(scenario_x(), t0());
        assert!(matches!(
            state.on_tick(t0() + Duration::seconds(3)),
            TickOutcome::Fired(ref events) if events.len() == 1
        ));

        let mut other = scenario_x();
        other.name = "Y".to_string();
        other.events[0].action = "other".to_string();
        state.begin(other, t0() + Duration::seconds(5));

        assert_eq!(state.scenario_name(), Some("Y"));
        // Offsets are now relative to the new anchor.
        match state.on_tick(t0() + Duration::seconds(8)) {
            TickOutcome::Fired(events) => {
                assert_eq!(events.len(), 1);
                assert_eq!(events[0].action, "other");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
