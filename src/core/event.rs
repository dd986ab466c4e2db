use std::fmt;

use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrived,
    Started,
    Preempted,
    Finished,
    // CPU idle even after dispatch
    Idle,
}

impl EventKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Arrived => "arrived",
            Self::Started => "started",
            Self::Preempted => "preempted",
            Self::Finished => "finished",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observational record of one scheduling transition. Never read back by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    pub tick: Ticks,
    pub kind: EventKind,
    pub pid: Option<ProcessId>,
}
