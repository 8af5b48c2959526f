mod engine;
mod scenarios;
mod state;

pub use engine::{DemoEngine, ListenerId};
pub use state::EngineStatus;
