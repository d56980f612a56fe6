//! Mission entries and the sample mission set.

use std::fmt;

/// A mission as stored in the tree: a difficulty level and its description.
///
/// Displays as `[Level L] description`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Mission<'a> {
    pub level: i32,
    pub description: &'a str,
}

impl<'a> Mission<'a> {
    pub fn new(level: i32, description: &'a str) -> Self {
        Self { level, description }
    }
}

impl fmt::Display for Mission<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Level {}] {}", self.level, self.description)
    }
}

/// Example missions for trying out a board, in loading order.
pub const SAMPLE_MISSIONS: [(i32, &str); 10] = [
    (15, "Defeat 5 slimes in the village"),
    (25, "Gather 10 medicinal herbs"),
    (35, "Escort the merchant to the city"),
    (50, "Explore the abandoned cave"),
    (60, "Hunt wild wolves in the forest"),
    (45, "Deliver a letter to the mayor"),
    (70, "Defeat the goblin chief"),
    (80, "Rescue the prisoners from the tower"),
    (90, "Investigate the ancient ruins"),
    (100, "Face the mountain dragon"),
];
