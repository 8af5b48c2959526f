use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::models::{DemoEvent, DemoScenario, EventKind, EventValue, ScenarioInfo, SleepPhase};

use super::scenarios::builtin_scenarios;
use super::state::{EngineState, TickOutcome};

type ListenerFn = Box<dyn Fn(&DemoEvent) + Send + Sync>;

/// Handle returned by [`DemoEngine::add_listener`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Timed playback of scripted demo scenarios.
///
/// At most one scenario runs at a time. While running, a one-second ticker
/// evaluates the timeline and dispatches due events to every registered
/// listener in registration order. Constructed explicitly and handed to
/// whoever wires up the UI; there is no global instance.
pub struct DemoEngine {
    clock: Arc<dyn Clock>,
    scenarios: Vec<DemoScenario>,
    state: Arc<Mutex<EngineState>>,
    listeners: Arc<Mutex<Vec<(ListenerId, ListenerFn)>>>,
    next_listener_id: AtomicU64,
    ticker: Mutex<Option<(JoinHandle<()>, CancellationToken)>>,
    rng: std::sync::Mutex<StdRng>,
}

impl DemoEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_scenarios(clock, builtin_scenarios())
    }

    pub fn with_scenarios(clock: Arc<dyn Clock>, scenarios: Vec<DemoScenario>) -> Self {
        Self {
            clock,
            scenarios,
            state: Arc::new(Mutex::new(EngineState::new())),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(1),
            ticker: Mutex::new(None),
            rng: std::sync::Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Begin playback of the named scenario. Returns false (and leaves any
    /// active run untouched) when no scenario matches the name exactly.
    /// Starting while already running supersedes the previous run; its ticker
    /// is cancelled before the new one spawns.
    pub async fn start(&self, name: &str) -> bool {
        let Some(scenario) = self
            .scenarios
            .iter()
            .find(|scenario| scenario.name == name)
            .cloned()
        else {
            error!("demo scenario {:?} not found", name);
            return false;
        };

        self.cancel_ticker().await;

        info!(
            "starting demo: {} ({}s) - {}",
            scenario.name, scenario.duration_secs, scenario.description
        );
        {
            let mut state = self.state.lock().await;
            state.begin(scenario, self.clock.now());
        }
        self.spawn_ticker().await;
        true
    }

    /// Force Idle. Safe to call at any time; a no-op when nothing runs.
    pub async fn stop(&self) {
        self.cancel_ticker().await;
        let mut state = self.state.lock().await;
        if state.is_running() {
            info!("demo stopped");
        }
        state.clear();
    }

    pub async fn is_running(&self) -> bool {
        self.state.lock().await.is_running()
    }

    pub async fn current_scenario(&self) -> Option<String> {
        self.state
            .lock()
            .await
            .scenario_name()
            .map(str::to_string)
    }

    /// Fraction of the active run completed, in [0, 1]; 0 when Idle.
    pub async fn progress(&self) -> f64 {
        self.state.lock().await.progress(self.clock.now())
    }

    /// Scenario metadata without the event timelines.
    pub fn list_scenarios(&self) -> Vec<ScenarioInfo> {
        self.scenarios.iter().map(DemoScenario::info).collect()
    }

    /// Register a listener; events reach listeners in registration order.
    /// Listeners run with the registry locked, so they must not call back
    /// into the engine or mutate the registry.
    pub async fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&DemoEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().await.push((id, Box::new(listener)));
        id
    }

    /// No-op when the id was never registered or was already removed.
    pub async fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .lock()
            .await
            .retain(|(listener_id, _)| *listener_id != id);
    }

    // Manual triggers bypass the timeline for live demo control. They
    // dispatch immediately and never touch the Running/Idle state.

    pub async fn trigger_temperature_spike(&self) {
        self.dispatch_manual(
            EventKind::Temperature,
            "spike",
            Some(EventValue::Number(25.2)),
            "Manual demo: Temperature spike triggered".to_string(),
        )
        .await;
    }

    pub async fn trigger_heart_rate_change(&self) {
        let bpm = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            78.0 + rng.gen_range(0.0..10.0)
        };
        self.dispatch_manual(
            EventKind::HeartRate,
            "change",
            Some(EventValue::Number(bpm)),
            "Manual demo: Heart rate fluctuation".to_string(),
        )
        .await;
    }

    pub async fn trigger_co2_alert(&self) {
        self.dispatch_manual(
            EventKind::Alert,
            "co2_high",
            Some(EventValue::Number(580.0)),
            "Manual demo: High CO2 levels detected".to_string(),
        )
        .await;
    }

    pub async fn trigger_sleep_phase_change(&self) {
        const PHASES: [SleepPhase; 3] = [SleepPhase::Light, SleepPhase::Deep, SleepPhase::Rem];
        let phase = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            PHASES[rng.gen_range(0..PHASES.len())]
        };
        self.dispatch_manual(
            EventKind::SleepPhase,
            "change",
            Some(EventValue::Text(phase.as_str().to_string())),
            format!("Manual demo: Sleep phase changed to {}", phase.as_str()),
        )
        .await;
    }

    async fn dispatch_manual(
        &self,
        kind: EventKind,
        action: &str,
        value: Option<EventValue>,
        message: String,
    ) {
        let event = DemoEvent {
            offset_secs: 0,
            kind,
            action: action.to_string(),
            value,
            message: Some(message),
        };
        info!("manual demo trigger: {}", event.action);
        dispatch_to_listeners(&self.listeners, &event).await;
    }

    async fn spawn_ticker(&self) {
        let mut guard = self.ticker.lock().await;
        if let Some((handle, token)) = guard.take() {
            token.cancel();
            handle.abort();
        }

        let state = self.state.clone();
        let listeners = self.listeners.clone();
        let clock = self.clock.clone();
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let outcome = state.lock().await.on_tick(clock.now());
                        match outcome {
                            TickOutcome::Fired(events) => {
                                for event in &events {
                                    info!("demo event at {}s: {}", event.offset_secs, event.action);
                                    dispatch_to_listeners(&listeners, event).await;
                                }
                            }
                            TickOutcome::Finished => {
                                info!("demo scenario finished");
                                break;
                            }
                            TickOutcome::Idle => break,
                        }
                    }
                    _ = task_token.cancelled() => break,
                }
            }
        });

        *guard = Some((handle, token));
    }

    async fn cancel_ticker(&self) {
        if let Some((handle, token)) = self.ticker.lock().await.take() {
            token.cancel();
            handle.abort();
        }
    }
}

/// Deliver one event to every listener in order. A panicking listener is
/// logged and skipped; it never blocks later listeners or the tick.
async fn dispatch_to_listeners(
    listeners: &Mutex<Vec<(ListenerId, ListenerFn)>>,
    event: &DemoEvent,
) {
    let guard = listeners.lock().await;
    for (id, listener) in guard.iter() {
        if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
            error!("demo listener {:?} panicked handling {}", id, event.action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::DateTime;
    use std::sync::Mutex as StdMutex;

    fn scenario(name: &str, duration_secs: u64, offset: u64, action: &str) -> DemoScenario {
        DemoScenario {
            name: name.to_string(),
            description: "test scenario".to_string(),
            duration_secs,
            events: vec![DemoEvent {
                offset_secs: offset,
                kind: EventKind::Alert,
                action: action.to_string(),
                value: None,
                message: None,
            }],
        }
    }

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        ))
    }

    async fn step_one_second(clock: &ManualClock) {
        clock.advance(chrono::Duration::seconds(1));
        time::advance(Duration::from_secs(1)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn unknown_scenario_is_rejected_without_state_change() {
        let engine = DemoEngine::new(manual_clock());
        assert!(!engine.start("does-not-exist").await);
        assert!(!engine.is_running().await);
        assert_eq!(engine.current_scenario().await, None);
        assert_eq!(engine.progress().await, 0.0);
    }

    #[tokio::test]
    async fn unknown_name_while_running_leaves_the_run_alone() {
        let clock = manual_clock();
        let engine = DemoEngine::with_scenarios(clock, vec![scenario("A", 30, 5, "a_evt")]);
        assert!(engine.start("A").await);
        assert!(!engine.start("does-not-exist").await);
        assert!(engine.is_running().await);
        assert_eq!(engine.current_scenario().await, Some("A".to_string()));
        engine.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_event_fires_once_then_engine_goes_idle() {
        let clock = manual_clock();
        let engine =
            DemoEngine::with_scenarios(clock.clone(), vec![scenario("X", 10, 3, "co2_rise")]);

        let seen: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        engine
            .add_listener(move |event| sink.lock().unwrap().push(event.action.clone()))
            .await;

        assert!(engine.start("X").await);
        tokio::task::yield_now().await;

        for _ in 0..12 {
            step_one_second(&clock).await;
        }

        assert_eq!(seen.lock().unwrap().as_slice(), ["co2_rise".to_string()]);
        assert!(!engine.is_running().await);
        assert_eq!(engine.progress().await, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_the_previous_timeline() {
        let clock = manual_clock();
        let engine = DemoEngine::with_scenarios(
            clock.clone(),
            vec![scenario("A", 30, 2, "a_evt"), scenario("B", 30, 2, "b_evt")],
        );

        let seen: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        engine
            .add_listener(move |event| sink.lock().unwrap().push(event.action.clone()))
            .await;

        assert!(engine.start("A").await);
        tokio::task::yield_now().await;
        step_one_second(&clock).await;

        // Supersede A before its event fires.
        assert!(engine.start("B").await);
        tokio::task::yield_now().await;
        for _ in 0..4 {
            step_one_second(&clock).await;
        }

        assert_eq!(seen.lock().unwrap().as_slice(), ["b_evt".to_string()]);
        assert_eq!(engine.current_scenario().await, Some("B".to_string()));
        engine.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_listener_does_not_block_the_next_one() {
        let clock = manual_clock();
        let engine =
            DemoEngine::with_scenarios(clock.clone(), vec![scenario("X", 10, 1, "alert")]);

        engine.add_listener(|_event| panic!("listener bug")).await;
        let seen: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        engine
            .add_listener(move |event| sink.lock().unwrap().push(event.action.clone()))
            .await;

        assert!(engine.start("X").await);
        tokio::task::yield_now().await;
        step_one_second(&clock).await;
        step_one_second(&clock).await;

        assert_eq!(seen.lock().unwrap().as_slice(), ["alert".to_string()]);
        engine.stop().await;
    }

    #[tokio::test]
    async fn manual_triggers_dispatch_without_touching_engine_state() {
        let engine = DemoEngine::new(manual_clock());
        let seen: Arc<StdMutex<Vec<DemoEvent>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        engine
            .add_listener(move |event| sink.lock().unwrap().push(event.clone()))
            .await;

        engine.trigger_temperature_spike().await;
        engine.trigger_heart_rate_change().await;
        engine.trigger_co2_alert().await;
        engine.trigger_sleep_phase_change().await;

        let events = seen.lock().unwrap().clone();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].kind, EventKind::Temperature);
        assert!(matches!(
            events[1].value,
            Some(EventValue::Number(bpm)) if (78.0..88.0).contains(&bpm)
        ));
        assert_eq!(events[2].value, Some(EventValue::Number(580.0)));
        assert!(matches!(events[3].value, Some(EventValue::Text(_))));

        assert!(!engine.is_running().await);
        assert_eq!(engine.current_scenario().await, None);
    }

    #[tokio::test]
    async fn removed_listener_no_longer_receives_events() {
        let engine = DemoEngine::new(manual_clock());
        let seen: Arc<StdMutex<Vec<String>>> = Arc::new(StdMutex::new(Vec::new()));
        let sink = seen.clone();
        let id = engine
            .add_listener(move |event| sink.lock().unwrap().push(event.action.clone()))
            .await;

        engine.trigger_co2_alert().await;
        engine.remove_listener(id).await;
        engine.trigger_co2_alert().await;
        // Removing twice is a no-op.
        engine.remove_listener(id).await;

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let engine = DemoEngine::new(manual_clock());
        engine.stop().await;
        assert!(engine.start("Sleep Transition Demo").await);
        engine.stop().await;
        engine.stop().await;
        assert!(!engine.is_running().await);
    }

    #[tokio::test]
    async fn list_scenarios_hides_the_timelines() {
        let engine = DemoEngine::new(manual_clock());
        let infos = engine.list_scenarios();
        assert_eq!(infos.len(), 3);
        assert!(infos.iter().any(|info| info.name == "Sleep Transition Demo"));
        assert!(infos.iter().all(|info| info.duration_secs > 0));
    }
}
