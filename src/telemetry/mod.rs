mod activity;
mod phase;
mod simulator;

pub use simulator::TelemetrySimulator;
