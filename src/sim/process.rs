use serde::{Deserialize, Serialize};

/// One row of simulation input, exactly as a collaborator hands it over.
///
/// Values are signed so that bad input reaches the registry and gets rejected
/// there instead of wrapping silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: String,
    pub arrival: i64,
    pub burst: i64,
    // Carried for display; round robin ignores it.
    #[serde(default)]
    pub priority: i64,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            id: id.into(),
            arrival,
            burst,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }
}
