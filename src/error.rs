use thiserror::Error;

use crate::domain::ItemId;

/// Input-shape errors raised by the engine before any aggregator runs.
///
/// These indicate a caller bug (wrong item set, malformed catalog) and are the
/// only errors the scoring entry points propagate. `InvalidConfig` is raised only
/// while loading options from the environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("invalid Likert scale: min {min} must be below max {max}")]
    InvalidScale { min: i32, max: i32 },

    #[error("Likert scale {min}..={max} spans more than {limit} points")]
    ScaleTooWide { min: i32, max: i32, limit: i64 },

    #[error("expected {expected} responses, got {actual}")]
    ResponseCount { expected: usize, actual: usize },

    #[error("response references unknown item id {0}")]
    UnknownItem(ItemId),

    #[error("catalog declares item id {0} more than once")]
    DuplicateItem(ItemId),

    #[error("item {id} is malformed: {reason}")]
    InvalidItem { id: ItemId, reason: String },

    #[error("catalog contains no items")]
    EmptyCatalog,

    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: String, value: String },
}

/// Front-end error carrying the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::new(2, format!("Invalid input: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_errors_map_to_input_exit_code() {
        let err: AppError = ScoringError::UnknownItem(99).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("unknown item id 99"));
    }
}
