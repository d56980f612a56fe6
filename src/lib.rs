//! A mission board for role-playing games.
//!
//! Missions are kept in an AVL tree keyed by difficulty level, see [`MissionTree`].
//! [`MissionBoard`] adds the input checks of an interactive application on top.

pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod mission;
pub mod tree;

pub use board::{BoardStats, MissionBoard};
pub use config::BoardConfig;
pub use error::MissionError;
pub use mission::{Mission, SAMPLE_MISSIONS};
pub use tree::MissionTree;
