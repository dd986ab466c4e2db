pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod scheduler;
pub mod sim;
pub mod stats;

pub use crate::core::{Engine, EventKind, Phase, TraceEvent};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use scheduler::Scheduler;
pub use sim::{ProcessSpec, Sim};
pub use stats::Stats;
