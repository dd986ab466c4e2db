use std::collections::VecDeque;

use super::event::{EventKind, TraceEvent};

// Index into the registry's process Vec
pub type ProcessId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    // Not arrived yet
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub priority: i64,
    pub state: ProcessState,
    pub remaining: Ticks,
    pub first_start: Option<Ticks>,
    pub finish: Option<Ticks>,
}

impl Process {
    pub fn is_completed(&self) -> bool {
        self.state == ProcessState::Completed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockOwner {
    Process(ProcessId),
    Idle,
}

/// CPU occupancy over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionBlock {
    pub owner: BlockOwner,
    pub start: Ticks,
    pub end: Ticks,
}

impl ExecutionBlock {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_idle(&self) -> bool {
        self.owner == BlockOwner::Idle
    }
}

/// The process currently holding the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningSlot {
    pub pid: ProcessId,
    pub run_start: Ticks,
    pub slices_used: Ticks,
}

#[derive(Debug, Clone)]
pub struct EngineState {
    pub clock: Ticks,
    pub quantum: Ticks,
    pub ready_queue: VecDeque<ProcessId>,
    pub running: Option<RunningSlot>,
    pub blocks: Vec<ExecutionBlock>,
    pub trace: Vec<TraceEvent>,
}

impl EngineState {
    pub fn new(quantum: Ticks) -> Self {
        Self {
            clock: 0,
            quantum,
            ready_queue: VecDeque::new(),
            running: None,
            blocks: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.clock = self.clock.saturating_add(delta);
    }

    pub fn queue_push_back(&mut self, pid: ProcessId) {
        debug_assert!(
            !self.ready_queue.contains(&pid),
            "Process {pid} already present in the ready queue"
        );
        debug_assert!(
            self.running.map(|slot| slot.pid) != Some(pid),
            "Running process {pid} must not be enqueued"
        );
        self.ready_queue.push_back(pid);
    }

    pub fn queue_pop_front(&mut self) -> Option<ProcessId> {
        self.ready_queue.pop_front()
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.running.is_none()
    }

    pub fn record(&mut self, tick: Ticks, kind: EventKind, pid: Option<ProcessId>) {
        self.trace.push(TraceEvent { tick, kind, pid });
    }

    pub fn close_block(&mut self, pid: ProcessId, start: Ticks, end: Ticks) {
        debug_assert!(start < end, "Empty block for process {pid}");
        self.blocks.push(ExecutionBlock {
            owner: BlockOwner::Process(pid),
            start,
            end,
        });
    }

    // Grow the trailing idle block when it ends at `tick`, otherwise open a new one
    pub fn account_idle(&mut self, tick: Ticks) {
        if let Some(last) = self.blocks.last_mut() {
            if last.is_idle() && last.end == tick {
                last.end = tick + 1;
                return;
            }
        }

        self.blocks.push(ExecutionBlock {
            owner: BlockOwner::Idle,
            start: tick,
            end: tick + 1,
        });
    }

    /// Closed blocks followed by the still-open block of the running process.
    pub fn timeline(&self) -> Vec<ExecutionBlock> {
        let mut blocks = self.blocks.clone();
        if let Some(slot) = self.running {
            if slot.run_start < self.clock {
                blocks.push(ExecutionBlock {
                    owner: BlockOwner::Process(slot.pid),
                    start: slot.run_start,
                    end: self.clock,
                });
            }
        }
        blocks
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.blocks
            .iter()
            .filter(|block| block.is_idle())
            .map(ExecutionBlock::len)
            .sum()
    }
}
