pub mod driver;
pub mod event;
pub mod observer;
pub mod registry;
pub mod state;

pub use driver::{Engine, Phase};
pub use event::{EventKind, TraceEvent};
pub use registry::ProcessRegistry;
pub use state::{
    BlockOwner, EngineState, ExecutionBlock, Process, ProcessId, ProcessState, RunningSlot, Ticks,
};
