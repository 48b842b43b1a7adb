use thiserror::Error;

/// Errors from parsing a textual grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("missing {0}")]
    MissingHeader(&'static str),

    #[error("row {row} width mismatch: expected {expected}, got {got}")]
    RowWidthMismatch { row: u32, expected: u32, got: u32 },
}

/// Errors raised immediately when a planner is misconfigured, before any
/// search begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown reprioritisation strategy: {0}")]
    UnknownReprioritisation(String),

    #[error("window size must be positive, got {0}")]
    NonPositiveWindowSize(i64),

    #[error("agent list must not be empty")]
    EmptyAgentList,

    #[error("starts/goals length mismatch: {starts} starts, {goals} goals")]
    StartGoalLengthMismatch { starts: usize, goals: usize },
}
