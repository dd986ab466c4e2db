pub mod rr;

use crate::core::{
    Ticks,
    state::{EngineState, ProcessId},
};
pub use rr::RoundRobin;

pub type EnqueueFlags = u64;

// First time on the ready queue
pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
// Put back after the slice ran out
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 1;

/// Ready-queue policy plugged into the engine.
///
/// The engine owns the queue inside [`EngineState`]; a policy only decides where a
/// process goes and which one comes out next.
pub trait Scheduler: Clone {
    fn init(ctx: &mut EngineState) -> Self;

    fn enqueue(&mut self, ctx: &mut EngineState, pid: ProcessId, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut EngineState) -> Option<ProcessId>;

    /// Ticks a freshly dispatched process may hold the CPU.
    fn slice(&self, ctx: &EngineState) -> Ticks {
        ctx.quantum
    }
}
