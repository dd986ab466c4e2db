use super::{EngineState, EnqueueFlags, ProcessId, Scheduler};

/// FIFO ready queue; arrivals and preempted processes both join the tail.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl Scheduler for RoundRobin {
    fn init(_ctx: &mut EngineState) -> Self {
        Self
    }

    fn enqueue(&mut self, ctx: &mut EngineState, pid: ProcessId, flags: EnqueueFlags) {
        let _ = flags;
        ctx.queue_push_back(pid);
    }

    fn dispatch(&mut self, ctx: &mut EngineState) -> Option<ProcessId> {
        ctx.queue_pop_front()
    }
}
