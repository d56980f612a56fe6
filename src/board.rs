//! A mission board: the mission tree behind level and description checks.

use std::fmt;

use tracing::{info, warn};

use crate::config::BoardConfig;
use crate::error::{MissionError, Result};
use crate::mission::SAMPLE_MISSIONS;
use crate::tree::MissionTree;

#[derive(Clone, Debug, Default)]
pub struct MissionBoard {
    config: BoardConfig,
    tree: MissionTree,
}

/// Summary of a board's contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub height: usize,
    pub lowest: Option<i32>,
    pub highest: Option<i32>,
}

impl MissionBoard {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            tree: MissionTree::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn tree(&self) -> &MissionTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Adds a mission, replacing the description of an existing one at the same level.
    /// Returns whether the level was new.
    pub fn add(&mut self, level: i32, description: &str) -> Result<bool> {
        let level = self.check_level(level)?;
        let description = description.trim();
        if description.is_empty() {
            warn!(level, "rejected mission without description");
            return Err(MissionError::EmptyDescription);
        }
        let inserted = self.tree.insert(level, description);
        info!(level, inserted, total = self.tree.len(), "mission added");
        Ok(inserted)
    }

    /// Looks up a mission, rendered as `[Level L] description`.
    pub fn find(&self, level: i32) -> Result<Option<String>> {
        let level = self.check_level(level)?;
        Ok(self.tree.search(level).map(|mission| mission.to_string()))
    }

    /// Removes a mission. Returns whether there was one at that level.
    pub fn remove(&mut self, level: i32) -> Result<bool> {
        let level = self.check_level(level)?;
        let removed = self.tree.remove(level);
        if removed {
            info!(level, total = self.tree.len(), "mission removed");
        }
        Ok(removed)
    }

    /// All missions in ascending level order.
    pub fn list(&self) -> Vec<String> {
        self.tree.list_in_order()
    }

    pub fn structure(&self) -> String {
        self.tree.dump_structure()
    }

    /// Loads the sample missions whose level lies within the configured range.
    /// Returns how many were loaded.
    pub fn load_samples(&mut self) -> usize {
        let mut count = 0;
        for (level, description) in SAMPLE_MISSIONS {
            if !self.config.contains(level) {
                warn!(level, "skipped sample mission outside the level range");
                continue;
            }
            self.tree.insert(level, description);
            count += 1;
        }
        info!(count, total = self.tree.len(), "sample missions loaded");
        count
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        info!("all missions cleared");
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats {
            total: self.tree.len(),
            height: self.tree.height(),
            lowest: self.tree.first().map(|mission| mission.level),
            highest: self.tree.last().map(|mission| mission.level),
        }
    }

    fn check_level(&self, level: i32) -> Result<i32> {
        self.config.validate_level(level).inspect_err(|err| {
            warn!(level, %err, "rejected level");
        })
    }
}

impl fmt::Display for BoardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total missions: {}", self.total)?;
        writeln!(f, "Tree height: {}", self.height)?;
        match (self.lowest, self.highest) {
            (Some(lowest), Some(highest)) => write!(f, "Levels: {lowest} to {highest}"),
            _ => write!(f, "Levels: none"),
        }
    }
}
