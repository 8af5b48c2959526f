pub mod activity;
pub mod event;
pub mod history;
pub mod reading;

pub use activity::{ActivityKind, ActivityLogEntry, Severity};
pub use event::{DemoEvent, DemoScenario, EventKind, EventValue, ScenarioInfo};
pub use history::HistoricalPoint;
pub use reading::{SensorReading, SleepPhase};
