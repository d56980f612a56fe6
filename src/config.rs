//! Board settings: the accepted range of difficulty levels.

use crate::error::{MissionError, Result};

pub const DEFAULT_MIN_LEVEL: i32 = 1;
pub const DEFAULT_MAX_LEVEL: i32 = 100;

/// Settings of a mission board: the range of accepted difficulty levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    min_level: i32,
    max_level: i32,
}

impl BoardConfig {
    /// Creates a configuration accepting levels `min_level..=max_level`.
    pub fn new(min_level: i32, max_level: i32) -> Result<Self> {
        if min_level > max_level {
            return Err(MissionError::InvalidRange {
                min: min_level,
                max: max_level,
            });
        }
        Ok(Self {
            min_level,
            max_level,
        })
    }

    pub fn min_level(&self) -> i32 {
        self.min_level
    }

    pub fn max_level(&self) -> i32 {
        self.max_level
    }

    /// Returns true if the level lies within the accepted range.
    pub fn contains(&self, level: i32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }

    /// Checks a level against the accepted range.
    pub fn validate_level(&self, level: i32) -> Result<i32> {
        if self.contains(level) {
            Ok(level)
        } else {
            Err(MissionError::LevelOutOfRange {
                level,
                min: self.min_level,
                max: self.max_level,
            })
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}
