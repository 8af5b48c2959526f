//! Demo data core for the Somnus sleep-climate dashboard.
//!
//! Nothing here talks to hardware: the simulator fabricates plausible sensor
//! values and timelines for presentation purposes, and the demo engine plays
//! back scripted event scenarios to registered listeners.

pub mod clock;
pub mod demo;
pub mod history;
pub mod insights;
pub mod models;
pub mod session;
pub mod telemetry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use demo::{DemoEngine, ListenerId};
pub use history::HistoryAggregator;
pub use session::Session;
pub use telemetry::TelemetrySimulator;
