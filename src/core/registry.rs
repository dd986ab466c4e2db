use rustc_hash::FxHashMap;

use super::state::{Process, ProcessId, ProcessState, Ticks};
use crate::{
    error::{InvalidProcessReason, SimError, SimResult},
    sim::ProcessSpec,
};

/// Authoritative process table for one simulation run.
///
/// Static fields are public through [`ProcessRegistry::process`]; run-time fields
/// are only written by the engine through the `pub(crate)` mutators.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
    by_name: FxHashMap<String, ProcessId>,
    // Process ids sorted by arrival; stable, so equal arrivals keep input order
    by_arrival: Vec<ProcessId>,
    // Everything before the cursor has been handed out by all_arrived_at()
    arrival_cursor: usize,
    handed_out: Vec<bool>,
    completed: usize,
}

impl ProcessRegistry {
    pub fn create(specs: &[ProcessSpec]) -> SimResult<Self> {
        let mut processes = Vec::with_capacity(specs.len());
        let mut by_name = FxHashMap::default();

        for spec in specs {
            let reject = |reason| SimError::InvalidProcess {
                id: spec.id.clone(),
                reason,
            };

            if spec.burst <= 0 {
                return Err(reject(InvalidProcessReason::NonPositiveBurst));
            }
            if spec.arrival < 0 {
                return Err(reject(InvalidProcessReason::NegativeArrival));
            }

            let id = processes.len();
            if by_name.insert(spec.id.clone(), id).is_some() {
                return Err(reject(InvalidProcessReason::DuplicateId));
            }

            processes.push(Process {
                id,
                name: spec.id.clone(),
                arrival: spec.arrival as Ticks,
                burst: spec.burst as Ticks,
                priority: spec.priority,
                state: ProcessState::Pending,
                remaining: spec.burst as Ticks,
                first_start: None,
                finish: None,
            });
        }

        let mut by_arrival: Vec<ProcessId> = (0..processes.len()).collect();
        by_arrival.sort_by_key(|&pid| processes[pid].arrival);

        Ok(Self {
            processes,
            by_name,
            by_arrival,
            arrival_cursor: 0,
            handed_out: vec![false; specs.len()],
            completed: 0,
        })
    }

    /// Processes arriving at `tick`, in input order. Each process is handed out once,
    /// whatever order the ticks are asked for in.
    pub fn all_arrived_at(&mut self, tick: Ticks) -> Vec<ProcessId> {
        let mut arrived = Vec::new();

        for &pid in &self.by_arrival[self.arrival_cursor..] {
            let arrival = self.processes[pid].arrival;
            if arrival > tick {
                break;
            }
            if arrival == tick && !self.handed_out[pid] {
                self.handed_out[pid] = true;
                arrived.push(pid);
            }
        }

        // Skip the handed-out prefix; anything after a gap is still owed to an earlier tick
        while let Some(&pid) = self.by_arrival.get(self.arrival_cursor) {
            if !self.handed_out[pid] {
                break;
            }
            self.arrival_cursor += 1;
        }

        arrived
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.processes.len()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn process(&self, pid: ProcessId) -> &Process {
        &self.processes[pid]
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn lookup(&self, name: &str) -> Option<ProcessId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, pid: ProcessId) -> &str {
        &self.processes[pid].name
    }

    pub(crate) fn mark_ready(&mut self, pid: ProcessId) {
        let process = &mut self.processes[pid];
        debug_assert!(
            process.state != ProcessState::Completed,
            "Completed process {pid} cannot be ready"
        );
        process.state = ProcessState::Ready;
    }

    pub(crate) fn mark_running(&mut self, pid: ProcessId, now: Ticks) {
        let process = &mut self.processes[pid];
        debug_assert_eq!(
            process.state,
            ProcessState::Ready,
            "Process {pid} must be ready before dispatch"
        );
        process.state = ProcessState::Running;
        process.first_start.get_or_insert(now);
    }

    // Burn one tick of CPU; returns the remaining burst
    pub(crate) fn consume(&mut self, pid: ProcessId) -> Ticks {
        let process = &mut self.processes[pid];
        debug_assert!(process.remaining > 0, "Process {pid} has no work left");
        process.remaining -= 1;
        process.remaining
    }

    pub(crate) fn mark_completed(&mut self, pid: ProcessId, finish: Ticks) {
        let process = &mut self.processes[pid];
        debug_assert_eq!(process.remaining, 0, "Process {pid} completed with work left");
        debug_assert!(process.finish.is_none(), "Process {pid} finished twice");
        process.state = ProcessState::Completed;
        process.finish = Some(finish);
        self.completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new("A", 2, 3),
            ProcessSpec::new("B", 0, 1),
            ProcessSpec::new("C", 2, 4),
        ]
    }

    #[test]
    fn create_initializes_remaining() {
        let registry = ProcessRegistry::create(&specs()).unwrap();
        assert_eq!(registry.len(), 3);
        for process in registry.processes() {
            assert_eq!(process.remaining, process.burst);
            assert_eq!(process.state, ProcessState::Pending);
            assert!(process.first_start.is_none());
            assert!(process.finish.is_none());
        }
        assert_eq!(registry.lookup("C"), Some(2));
    }

    #[test]
    fn create_rejects_bad_input() {
        let cases = [
            (ProcessSpec::new("X", 0, 0), InvalidProcessReason::NonPositiveBurst),
            (ProcessSpec::new("X", 0, -2), InvalidProcessReason::NonPositiveBurst),
            (ProcessSpec::new("X", -1, 2), InvalidProcessReason::NegativeArrival),
        ];
        for (spec, reason) in cases {
            assert_eq!(
                ProcessRegistry::create(&[spec]).unwrap_err(),
                SimError::InvalidProcess {
                    id: "X".to_string(),
                    reason
                }
            );
        }

        let dup = [
            ProcessSpec::new("A", 0, 1),
            ProcessSpec::new("A", 3, 1),
        ];
        assert_eq!(
            ProcessRegistry::create(&dup).unwrap_err(),
            SimError::InvalidProcess {
                id: "A".to_string(),
                reason: InvalidProcessReason::DuplicateId
            }
        );
    }

    #[test]
    fn arrivals_are_input_ordered_and_consumed_once() {
        let mut registry = ProcessRegistry::create(&specs()).unwrap();

        assert_eq!(registry.all_arrived_at(0), vec![1]);
        assert!(registry.all_arrived_at(1).is_empty());
        assert_eq!(registry.all_arrived_at(2), vec![0, 2]);
        assert!(registry.all_arrived_at(2).is_empty());
    }

    #[test]
    fn arrivals_survive_out_of_order_calls() {
        let mut registry = ProcessRegistry::create(&specs()).unwrap();

        assert_eq!(registry.all_arrived_at(2), vec![0, 2]);
        assert_eq!(registry.all_arrived_at(0), vec![1]);
        assert!(registry.all_arrived_at(0).is_empty());
        assert!(registry.all_arrived_at(2).is_empty());
        assert!(registry.all_arrived_at(5).is_empty());
    }

    #[test]
    fn completion_is_counted() {
        let mut registry = ProcessRegistry::create(&[ProcessSpec::new("A", 0, 1)]).unwrap();
        assert!(!registry.all_completed());

        let arrived = registry.all_arrived_at(0);
        registry.mark_ready(arrived[0]);
        registry.mark_running(0, 0);
        assert_eq!(registry.consume(0), 0);
        registry.mark_completed(0, 1);

        assert!(registry.all_completed());
        assert_eq!(registry.process(0).finish, Some(1));
        assert_eq!(registry.process(0).first_start, Some(0));
    }

    #[test]
    fn empty_registry_is_complete() {
        let registry = ProcessRegistry::create(&[]).unwrap();
        assert!(registry.is_empty());
        assert!(registry.all_completed());
    }
}
