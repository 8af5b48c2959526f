use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hour bucket in a reconstructed session series.
///
/// Sleep fields are cumulative minutes as of the bucket timestamp, so they
/// never decrease along a series, and are zero for buckets that predate the
/// session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub timestamp: DateTime<Utc>,
    pub deep_sleep: f64,
    pub light_sleep: f64,
    pub rem_sleep: f64,
    pub temperature: f64,
    pub heart_rate: f64,
    /// 0-100; zero until the session has accumulated meaningful sleep.
    pub sleep_score: f64,
    pub humidity: f64,
    pub co2_level: f64,
}

impl HistoricalPoint {
    pub fn total_sleep(&self) -> f64 {
        self.deep_sleep + self.light_sleep + self.rem_sleep
    }
}
