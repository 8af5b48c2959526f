use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Temperature,
    HeartRate,
    SleepPhase,
    Alert,
    System,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Temperature => "temperature",
            EventKind::HeartRate => "heartRate",
            EventKind::SleepPhase => "sleepPhase",
            EventKind::Alert => "alert",
            EventKind::System => "system",
        }
    }
}

/// Optional payload carried by a demo event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EventValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

/// One scripted moment in a scenario timeline. `offset_secs` is seconds from
/// scenario start; the event fires on the tick whose elapsed second equals it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DemoEvent {
    pub offset_secs: u64,
    pub kind: EventKind,
    pub action: String,
    pub value: Option<EventValue>,
    pub message: Option<String>,
}

/// A named, fixed timeline used to script a presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoScenario {
    pub name: String,
    pub description: String,
    pub duration_secs: u64,
    pub events: Vec<DemoEvent>,
}

impl DemoScenario {
    /// Metadata-only view; the event timeline stays private to the engine.
    pub fn info(&self) -> ScenarioInfo {
        ScenarioInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_secs: self.duration_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInfo {
    pub name: String,
    pub description: String,
    pub duration_secs: u64,
}
