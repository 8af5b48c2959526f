use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SleepPhase {
    Awake,
    Light,
    Deep,
    Rem,
}

impl SleepPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepPhase::Awake => "awake",
            SleepPhase::Light => "light",
            SleepPhase::Deep => "deep",
            SleepPhase::Rem => "rem",
        }
    }
}

/// Point-in-time snapshot of everything the pillow "measures".
///
/// Invariant: at most one of `is_heating` / `is_cooling` is true. The dead
/// band between the heating and cooling thresholds leaves both false.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Degrees Celsius, one decimal.
    pub temperature: f64,
    /// Beats per minute.
    pub heart_rate: u32,
    pub is_heating: bool,
    pub is_cooling: bool,
    pub timestamp: DateTime<Utc>,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub air_quality: String,
    /// Parts per million.
    pub co2: f64,
    /// Micrograms per cubic meter.
    pub pm25: f64,
    /// Percent of full output; zero unless `is_heating`.
    pub heating_power: f64,
    /// Percent of full output; zero unless `is_cooling`.
    pub cooling_power: f64,
    pub sleep_phase: SleepPhase,
    /// Breaths per minute.
    pub breathing_rate: f64,
    /// Unitless restlessness index, 0-20.
    pub movement: f64,
}
