use super::{
    registry::ProcessRegistry,
    state::{EngineState, ProcessState},
};

/// Cross-checks engine bookkeeping after every tick (debug builds only).
#[derive(Debug, Clone, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, registry: &ProcessRegistry, state: &EngineState) {
        self.step += 1;

        if let Some(slot) = state.running {
            let process = registry.process(slot.pid);
            debug_assert_eq!(
                process.state,
                ProcessState::Running,
                "running process {} must be Running",
                slot.pid
            );
            debug_assert!(
                slot.slices_used <= state.quantum,
                "process {} overran its slice",
                slot.pid
            );
            debug_assert!(
                !state.ready_queue.contains(&slot.pid),
                "running process {} must not appear in the ready queue",
                slot.pid
            );
        }

        for &pid in &state.ready_queue {
            debug_assert_eq!(
                registry.process(pid).state,
                ProcessState::Ready,
                "queued process {pid} must be Ready"
            );
        }

        for process in registry.processes() {
            debug_assert!(
                process.remaining <= process.burst,
                "process {} remaining exceeds burst",
                process.id
            );
            debug_assert_eq!(
                process.is_completed(),
                process.finish.is_some(),
                "process {} finish tick out of sync with its state",
                process.id
            );
        }

        // Every tick of simulated time belongs to exactly one block
        if cfg!(debug_assertions) {
            let mut covered = 0;
            for block in &state.blocks {
                debug_assert_eq!(
                    block.start, covered,
                    "timeline gap or overlap at tick {covered} (step {})",
                    self.step
                );
                covered = block.end;
            }
            if let Some(slot) = state.running {
                debug_assert_eq!(
                    slot.run_start, covered,
                    "open slice of process {} does not start where the blocks end",
                    slot.pid
                );
                covered = state.clock;
            }
            debug_assert_eq!(covered, state.clock, "timeline does not reach the clock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::state::RunningSlot, sim::ProcessSpec};

    // First slice closed at tick 3, second one open since `run_start`
    fn mid_slice(run_start: u64) -> (ProcessRegistry, EngineState) {
        let mut registry = ProcessRegistry::create(&[ProcessSpec::new("A", 0, 8)]).unwrap();
        registry.all_arrived_at(0);
        registry.mark_ready(0);
        registry.mark_running(0, 0);

        let mut state = EngineState::new(3);
        state.close_block(0, 0, 3);
        state.running = Some(RunningSlot {
            pid: 0,
            run_start,
            slices_used: 2,
        });
        state.clock = 5;
        (registry, state)
    }

    #[test]
    fn open_slice_closes_the_timeline() {
        let (registry, state) = mid_slice(3);
        let mut observer = Observer::new();
        observer.observe(&registry, &state);
        observer.observe(&registry, &state);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "does not start where the blocks end")]
    fn gap_before_open_slice_is_caught() {
        let (registry, state) = mid_slice(4);
        Observer::new().observe(&registry, &state);
    }
}
