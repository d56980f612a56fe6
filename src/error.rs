//! Errors raised by the mission board and its command line.
//!
//! The tree itself cannot fail; these cover input policy only.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    #[error("level {level} is outside the allowed range {min}-{max}")]
    LevelOutOfRange { level: i32, min: i32, max: i32 },

    #[error("mission description must not be empty")]
    EmptyDescription,

    #[error("invalid level range: minimum {min} exceeds maximum {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("not a level: {0}")]
    InvalidLevel(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, MissionError>;
