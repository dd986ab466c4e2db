use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::{EngineState, Process, ProcessRegistry, Ticks};

/// Aggregate performance figures. Only finished processes contribute to the
/// per-process averages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Stats {
    pub completed: usize,
    pub average_waiting_time: f64,
    pub average_turnaround_time: f64,
    pub average_response_time: f64,
    // Processes completed per simulated tick
    pub throughput: f64,
    /// Completed burst over elapsed ticks, as a fraction.
    ///
    /// Work done by processes that have not finished yet is not counted, so this
    /// reads low while a run is in flight and is exact once it completes.
    pub cpu_utilization: f64,
    pub idle_ticks: Ticks,
}

impl Stats {
    pub fn cpu_utilization_percent(&self) -> f64 {
        self.cpu_utilization * 100.0
    }
}

pub fn turnaround_time(process: &Process) -> Option<Ticks> {
    process.finish.map(|finish| finish - process.arrival)
}

pub fn waiting_time(process: &Process) -> Option<Ticks> {
    turnaround_time(process).map(|turnaround| turnaround - process.burst)
}

// Time to first run
pub fn response_time(process: &Process) -> Option<Ticks> {
    process.first_start.map(|start| start - process.arrival)
}

pub fn compute(registry: &ProcessRegistry, state: &EngineState) -> Stats {
    let finished: Vec<&Process> = registry
        .processes()
        .iter()
        .filter(|process| process.is_completed())
        .collect();

    let completed = finished.len();
    let completed_burst: Ticks = finished.iter().map(|process| process.burst).sum();

    let per_tick = |value: f64| {
        if state.clock == 0 {
            0.0
        } else {
            value / state.clock as f64
        }
    };

    Stats {
        completed,
        average_waiting_time: avg(finished.iter().filter_map(|p| waiting_time(p))),
        average_turnaround_time: avg(finished.iter().filter_map(|p| turnaround_time(p))),
        average_response_time: avg(finished.iter().filter_map(|p| response_time(p))),
        throughput: per_tick(completed as f64),
        cpu_utilization: per_tick(completed_burst as f64),
        idle_ticks: state.idle_ticks(),
    }
}

// Zero when nothing has finished yet
fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    let mean: Mean = iter.map(|ticks| ticks as f64).collect();
    if mean.is_empty() {
        0.0
    } else {
        mean.estimate()
    }
}
