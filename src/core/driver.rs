use tracing::{debug, info, trace};

use super::{
    event::{EventKind, TraceEvent},
    observer::Observer,
    registry::ProcessRegistry,
    state::{BlockOwner, EngineState, ExecutionBlock, Process, ProcessId, RunningSlot, Ticks},
};
use crate::{
    error::{SimError, SimResult},
    scheduler::{ENQ_ARRIVAL, ENQ_PREEMPT, RoundRobin, Scheduler},
    sim::ProcessSpec,
    stats::{self, Stats},
};

/// Where the machine stands once a tick has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    // No process on the CPU; the ready queue may still hold work for the next tick
    Idle,
    Dispatching,
    Running,
    Preempting,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Engine<S: Scheduler = RoundRobin> {
    registry: ProcessRegistry,
    state: EngineState,
    scheduler: S,
    observer: Observer,
    completed: bool,
}

impl<S: Scheduler> Engine<S> {
    pub fn new(specs: &[ProcessSpec], quantum: i64) -> SimResult<Self> {
        if quantum <= 0 {
            return Err(SimError::InvalidQuantum(quantum));
        }
        let registry = ProcessRegistry::create(specs)?;

        let mut state = EngineState::new(quantum as Ticks);
        let scheduler = S::init(&mut state);
        let completed = registry.all_completed();

        debug!(processes = registry.len(), quantum, "engine created");

        Ok(Self {
            registry,
            state,
            scheduler,
            observer: Observer::new(),
            completed,
        })
    }

    /// Advance simulated time by one tick. A no-op once every process has finished.
    pub fn tick(&mut self) -> Phase {
        if self.completed {
            return Phase::Completed;
        }

        let now = self.state.clock;
        self.handle_arrivals(now);

        let dispatched = self.state.cpu_is_idle() && self.try_dispatch(now);

        let mut phase = match self.state.running.take() {
            Some(slot) => self.run_slot(slot, now, dispatched),
            None => {
                self.state.account_idle(now);
                self.state.record(now, EventKind::Idle, None);
                trace!(tick = now, "cpu idle");
                Phase::Idle
            }
        };

        self.state.advance_time(1);

        if self.registry.all_completed() {
            self.completed = true;
            phase = Phase::Completed;
            info!(clock = self.state.clock, "all processes completed");
        }

        self.observer.observe(&self.registry, &self.state);
        phase
    }

    fn handle_arrivals(&mut self, now: Ticks) {
        for pid in self.registry.all_arrived_at(now) {
            self.registry.mark_ready(pid);
            self.state.record(now, EventKind::Arrived, Some(pid));
            self.scheduler.enqueue(&mut self.state, pid, ENQ_ARRIVAL);
            debug!(tick = now, pid = %self.registry.name(pid), "arrived");
        }
    }

    fn try_dispatch(&mut self, now: Ticks) -> bool {
        let Some(pid) = self.scheduler.dispatch(&mut self.state) else {
            return false;
        };

        self.registry.mark_running(pid, now);
        self.state.running = Some(RunningSlot {
            pid,
            run_start: now,
            slices_used: 0,
        });
        self.state.record(now, EventKind::Started, Some(pid));
        debug!(tick = now, pid = %self.registry.name(pid), "started");
        true
    }

    // Charge the tick [now, now + 1) to `slot`. Completion wins over slice expiry.
    fn run_slot(&mut self, mut slot: RunningSlot, now: Ticks, dispatched: bool) -> Phase {
        let pid = slot.pid;
        let end = now + 1;
        let remaining = self.registry.consume(pid);
        slot.slices_used += 1;

        if remaining == 0 {
            self.state.close_block(pid, slot.run_start, end);
            self.state.record(end, EventKind::Finished, Some(pid));
            self.registry.mark_completed(pid, end);
            debug!(tick = end, pid = %self.registry.name(pid), "finished");
            return Phase::Idle;
        }

        if slot.slices_used == self.scheduler.slice(&self.state) {
            self.state.close_block(pid, slot.run_start, end);
            self.state.record(end, EventKind::Preempted, Some(pid));
            self.registry.mark_ready(pid);
            self.scheduler.enqueue(&mut self.state, pid, ENQ_PREEMPT);
            debug!(tick = end, pid = %self.registry.name(pid), remaining, "preempted");
            return Phase::Preempting;
        }

        self.state.running = Some(slot);
        if dispatched {
            Phase::Dispatching
        } else {
            Phase::Running
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn clock(&self) -> Ticks {
        self.state.clock
    }

    pub fn quantum(&self) -> Ticks {
        self.state.quantum
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn processes(&self) -> &[Process] {
        self.registry.processes()
    }

    pub fn process(&self, pid: ProcessId) -> &Process {
        self.registry.process(pid)
    }

    pub fn ready_queue_ids(&self) -> Vec<&str> {
        self.state
            .ready_queue
            .iter()
            .map(|&pid| self.registry.name(pid))
            .collect()
    }

    pub fn running_id(&self) -> Option<&str> {
        self.state.running.map(|slot| self.registry.name(slot.pid))
    }

    pub fn blocks(&self) -> &[ExecutionBlock] {
        &self.state.blocks
    }

    pub fn timeline(&self) -> Vec<ExecutionBlock> {
        self.state.timeline()
    }

    pub fn trace(&self) -> &[TraceEvent] {
        &self.state.trace
    }

    pub fn label(&self, owner: BlockOwner) -> &str {
        match owner {
            BlockOwner::Process(pid) => self.registry.name(pid),
            BlockOwner::Idle => "idle",
        }
    }

    pub fn pid_label(&self, pid: Option<ProcessId>) -> &str {
        pid.map_or("", |pid| self.registry.name(pid))
    }

    pub fn stats(&self) -> Stats {
        stats::compute(&self.registry, &self.state)
    }
}
