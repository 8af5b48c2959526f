//! Fixed-shape derived tables for the analytics charts. Each numeric field is
//! drawn once per call from a narrow band around its documented midpoint;
//! nothing here carries state.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySleepTrend {
    pub day: String,
    /// Minutes.
    pub deep_sleep: u32,
    pub light_sleep: u32,
    pub rem_sleep: u32,
    pub quality: u32,
    pub score: u32,
    /// Hours, one decimal.
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalCorrelation {
    pub factor: String,
    pub correlation: f64,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempHeartRatePoint {
    pub range: String,
    pub temp: f64,
    pub avg_heart_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumidityQualityPoint {
    pub range: String,
    pub humidity: f64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalInsights {
    pub correlations: Vec<EnvironmentalCorrelation>,
    pub temperature_vs_heart_rate: Vec<TempHeartRatePoint>,
    pub humidity_vs_sleep_quality: Vec<HumidityQualityPoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MetricStatus {
    Good,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetric {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub status: MetricStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub metrics: Vec<SystemMetric>,
    /// Percent of nights the comfort target was held.
    pub target_achievement_rate: f64,
    /// kWh consumed by heating/cooling over the last week.
    pub total_energy_week: f64,
}

struct NightPattern {
    duration: f64,
    deep_sleep: f64,
    light_sleep: f64,
    rem_sleep: f64,
    quality: f64,
    score: f64,
}

fn weekday_pattern<R: Rng + ?Sized>(rng: &mut R) -> NightPattern {
    let quality = 82.0 + (rng.gen::<f64>() - 0.5) * 12.0;
    NightPattern {
        duration: 7.5 + (rng.gen::<f64>() - 0.5) * 0.6,
        deep_sleep: 90.0 + (rng.gen::<f64>() - 0.5) * 20.0,
        light_sleep: 260.0 + (rng.gen::<f64>() - 0.5) * 30.0,
        rem_sleep: 100.0 + (rng.gen::<f64>() - 0.5) * 20.0,
        quality,
        score: quality,
    }
}

fn weekend_pattern<R: Rng + ?Sized>(rng: &mut R) -> NightPattern {
    let quality = 86.0 + (rng.gen::<f64>() - 0.5) * 10.0;
    NightPattern {
        duration: 8.2 + (rng.gen::<f64>() - 0.5) * 0.8,
        deep_sleep: 100.0 + (rng.gen::<f64>() - 0.5) * 20.0,
        light_sleep: 290.0 + (rng.gen::<f64>() - 0.5) * 40.0,
        rem_sleep: 115.0 + (rng.gen::<f64>() - 0.5) * 20.0,
        quality,
        score: quality,
    }
}

/// Mon-Sun rows; one weekday and one weekend pattern are drawn per call and
/// shared across the matching days.
pub fn weekly_sleep_trends<R: Rng + ?Sized>(rng: &mut R) -> Vec<WeeklySleepTrend> {
    const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    let weekday = weekday_pattern(rng);
    let weekend = weekend_pattern(rng);

    DAYS.iter()
        .enumerate()
        .map(|(index, day)| {
            let pattern = if index >= 5 { &weekend } else { &weekday };
            WeeklySleepTrend {
                day: day.to_string(),
                deep_sleep: pattern.deep_sleep.round() as u32,
                light_sleep: pattern.light_sleep.round() as u32,
                rem_sleep: pattern.rem_sleep.round() as u32,
                quality: pattern.quality.round() as u32,
                score: pattern.score.round() as u32,
                duration: (pattern.duration * 10.0).round() / 10.0,
            }
        })
        .collect()
}

/// Correlation coefficients plus the two small chart point tables.
pub fn environmental_correlations() -> EnvironmentalInsights {
    let correlation = |factor: &str, correlation: f64, impact: &str| EnvironmentalCorrelation {
        factor: factor.to_string(),
        correlation,
        impact: impact.to_string(),
    };

    EnvironmentalInsights {
        correlations: vec![
            correlation(
                "Room Temperature",
                0.85,
                "High positive correlation with sleep quality",
            ),
            correlation("Humidity Level", 0.62, "Moderate impact on comfort"),
            correlation(
                "Air Quality (CO2)",
                -0.78,
                "High negative correlation when elevated",
            ),
            correlation(
                "External Noise",
                -0.45,
                "Moderate disruption to light sleep",
            ),
        ],
        temperature_vs_heart_rate: [(20.0, 75.0), (22.0, 68.0), (24.0, 65.0), (26.0, 70.0)]
            .iter()
            .map(|&(temp, hr)| TempHeartRatePoint {
                range: format!("{}°C", temp as i32),
                temp,
                avg_heart_rate: hr,
            })
            .collect(),
        humidity_vs_sleep_quality: [(40.0, 75.0), (50.0, 85.0), (60.0, 80.0), (70.0, 70.0)]
            .iter()
            .map(|&(humidity, score)| HumidityQualityPoint {
                range: format!("{}%", humidity as i32),
                humidity,
                avg_score: score,
            })
            .collect(),
    }
}

/// Device health panel. All values land in their "good" bands; the status
/// field exists so the UI can render degraded states fed from demo events.
pub fn system_metrics<R: Rng + ?Sized>(rng: &mut R) -> SystemHealth {
    let metric = |name: &str, value: f64, unit: &str| SystemMetric {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
        status: MetricStatus::Good,
    };

    SystemHealth {
        metrics: vec![
            metric("CPU Usage", 12.0 + rng.gen_range(0.0..8.0), "%"),
            metric("Memory Usage", 42.0 + rng.gen_range(0.0..12.0), "%"),
            metric("Network Latency", 8.0 + rng.gen_range(0.0..6.0), "ms"),
            metric("Sensor Accuracy", 97.0 + rng.gen_range(0.0..3.0), "%"),
            metric("Battery Level", 88.0 + rng.gen_range(0.0..8.0), "%"),
        ],
        target_achievement_rate: 88.0 + rng.gen_range(0.0..8.0),
        total_energy_week: 2.3 + rng.gen_range(0.0..0.3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weekly_trends_cover_the_week_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let trends = weekly_sleep_trends(&mut rng);
        assert_eq!(trends.len(), 7);
        assert_eq!(trends[0].day, "Mon");
        assert_eq!(trends[6].day, "Sun");

        for trend in &trends[..5] {
            assert!((7.2..=7.8).contains(&trend.duration));
            assert!((80..=100).contains(&trend.deep_sleep));
            assert!((76..=88).contains(&trend.quality));
        }
        for trend in &trends[5..] {
            assert!((7.8..=8.6).contains(&trend.duration));
            assert!((90..=110).contains(&trend.deep_sleep));
            assert!((81..=91).contains(&trend.quality));
        }
    }

    #[test]
    fn weekend_rows_share_one_drawn_pattern() {
        let mut rng = StdRng::seed_from_u64(2);
        let trends = weekly_sleep_trends(&mut rng);
        assert_eq!(trends[5].deep_sleep, trends[6].deep_sleep);
        assert_eq!(trends[5].duration, trends[6].duration);
    }

    #[test]
    fn correlations_are_fixed() {
        let insights = environmental_correlations();
        assert_eq!(insights.correlations.len(), 4);
        assert_eq!(insights.correlations[0].correlation, 0.85);
        assert_eq!(insights.correlations[2].correlation, -0.78);
        assert_eq!(insights.temperature_vs_heart_rate.len(), 4);
        assert_eq!(insights.humidity_vs_sleep_quality.len(), 4);
        assert_eq!(insights.temperature_vs_heart_rate[1].range, "22°C");
    }

    #[test]
    fn system_metrics_stay_in_their_bands() {
        let mut rng = StdRng::seed_from_u64(3);
        let health = system_metrics(&mut rng);
        assert_eq!(health.metrics.len(), 5);
        for metric in &health.metrics {
            assert_eq!(metric.status, MetricStatus::Good);
        }
        assert!((12.0..20.0).contains(&health.metrics[0].value));
        assert!((97.0..100.0).contains(&health.metrics[3].value));
        assert!((88.0..96.0).contains(&health.target_achievement_rate));
        assert!((2.3..2.6).contains(&health.total_energy_week));
    }
}
