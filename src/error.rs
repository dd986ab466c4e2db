use thiserror::Error;

/// Why a process definition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidProcessReason {
    NonPositiveBurst,
    NegativeArrival,
    DuplicateId,
}

impl std::fmt::Display for InvalidProcessReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::NonPositiveBurst => "burst must be positive",
            Self::NegativeArrival => "arrival must not be negative",
            Self::DuplicateId => "id is already in use",
        };
        f.write_str(msg)
    }
}

/// Errors raised while building a simulation. Nothing fails once the engine exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid process {id:?}: {reason}")]
    InvalidProcess {
        id: String,
        reason: InvalidProcessReason,
    },

    #[error("invalid quantum {0}: must be positive")]
    InvalidQuantum(i64),
}

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exported csv is not valid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("malformed simulation config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read simulation config: {0}")]
    Io(#[from] std::io::Error),
}
