use lif_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("scenario `{scenario}`: input supplies {available} ticks, duration needs {duration}")]
    InputTooShort {
        scenario: String,
        available: u64,
        duration: u64,
    },

    #[error("invalid input pattern: {reason}")]
    InvalidInput { reason: String },

    #[error("scenario `{scenario}` tick {tick}: expected {expected}, observed {observed}")]
    Mismatch {
        scenario: String,
        tick: u64,
        expected: String,
        observed: String,
    },

    #[error("scenario `{scenario}`: trace sink full after {capacity} records")]
    SinkFull { scenario: String, capacity: usize },
}

impl HarnessError {
    pub(crate) fn mismatch(
        scenario: &str,
        tick: u64,
        expected: impl Into<String>,
        observed: impl Into<String>,
    ) -> Self {
        Self::Mismatch {
            scenario: scenario.to_string(),
            tick,
            expected: expected.into(),
            observed: observed.into(),
        }
    }
}

pub type HarnessResult<T, E = HarnessError> = core::result::Result<T, E>;
