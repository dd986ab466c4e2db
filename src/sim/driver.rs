use tracing::debug;

use super::process::ProcessSpec;
use crate::{
    config::SimConfig,
    core::{Engine, Ticks, TraceEvent},
    error::SimResult,
    scheduler::{RoundRobin, Scheduler},
};

/// Drives an [`Engine`] one tick at a time and remembers how to go back.
///
/// Step-back is replay, not inversion: a whole-engine snapshot is pushed before
/// every effective tick and `step_back` restores the latest one.
pub struct Sim<S: Scheduler = RoundRobin> {
    pub engine: Engine<S>,
    history: Vec<Engine<S>>,
    // Engine as built, for reset()
    initial: Engine<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(specs: &[ProcessSpec], quantum: i64) -> SimResult<Self> {
        let engine = Engine::new(specs, quantum)?;
        Ok(Self {
            initial: engine.clone(),
            engine,
            history: Vec::new(),
        })
    }

    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        Self::new(&config.processes, config.quantum)
    }

    /// Apply one tick and return the trace events it produced.
    pub fn step(&mut self) -> &[TraceEvent] {
        if self.engine.is_completed() {
            return &[];
        }

        self.history.push(self.engine.clone());
        let before = self.engine.trace().len();
        self.engine.tick();
        &self.engine.trace()[before..]
    }

    pub fn step_back(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.engine = snapshot;
                debug!(clock = self.engine.clock(), "reverted one step");
                true
            }
            None => false,
        }
    }

    pub fn run_to_completion(&mut self) -> Ticks {
        while !self.engine.is_completed() {
            self.step();
        }
        self.engine.clock()
    }

    pub fn reset(&mut self) {
        self.engine = self.initial.clone();
        self.history.clear();
        debug!("simulation reset");
    }

    pub fn all_processes_completed(&self) -> bool {
        self.engine.is_completed()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
