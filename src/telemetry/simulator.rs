use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::Clock;
use crate::models::SensorReading;
use crate::session::Session;

use super::phase::phase_for_session_hours;

// Heating kicks in below the dead band, cooling above it.
const HEATING_THRESHOLD_C: f64 = 22.5;
const COOLING_THRESHOLD_C: f64 = 23.5;

/// Fabricates plausible sensor snapshots as a function of the injected clock
/// and the session's elapsed time. Never touches hardware.
pub struct TelemetrySimulator {
    clock: Arc<dyn Clock>,
    session: Arc<Session>,
    rng: Mutex<StdRng>,
}

impl TelemetrySimulator {
    pub fn new(clock: Arc<dyn Clock>, session: Arc<Session>) -> Self {
        Self::with_rng(clock, session, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn with_rng(clock: Arc<dyn Clock>, session: Arc<Session>, rng: StdRng) -> Self {
        Self {
            clock,
            session,
            rng: Mutex::new(rng),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Current snapshot. "Now" is captured once at entry so every field in
    /// one reading is derived from the same instant.
    pub fn current_reading(&self) -> SensorReading {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis() as f64;
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // Slow oscillators so repeated polls within a few seconds look
        // continuous rather than jittery.
        let base_temp = 22.0 + 2.0 * (now_ms / 60_000.0).sin();
        let base_hr = 65.0 + 8.0 * (now_ms / 45_000.0).sin();

        let is_heating = base_temp < HEATING_THRESHOLD_C;
        let is_cooling = base_temp > COOLING_THRESHOLD_C;

        let heating_power = if is_heating {
            rng.gen_range(60.0..80.0)
        } else {
            0.0
        };
        let cooling_power = if is_cooling {
            rng.gen_range(50.0..75.0)
        } else {
            0.0
        };

        let session_hours = self.session.duration_hours(now);
        let sleep_phase = phase_for_session_hours(session_hours, &mut *rng);

        // Secondary metrics ride oscillators with distinct periods to avoid
        // visible correlation artifacts between charts.
        SensorReading {
            temperature: (base_temp * 10.0).round() / 10.0,
            heart_rate: base_hr.round() as u32,
            is_heating,
            is_cooling,
            timestamp: now,
            humidity: 45.0 + 10.0 * (now_ms / 80_000.0).sin(),
            air_quality: "Good".to_string(),
            co2: 420.0 + 30.0 * (now_ms / 90_000.0).sin(),
            pm25: 8.0 + rng.gen_range(0.0..4.0),
            heating_power,
            cooling_power,
            sleep_phase,
            breathing_rate: 12.0 + 3.0 * (now_ms / 70_000.0).sin(),
            movement: rng.gen_range(0.0..20.0),
        }
    }
}
