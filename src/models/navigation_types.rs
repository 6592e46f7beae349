//! Type-safe wrappers for navigation values

use std::fmt;

use super::constants::{DIRECTION_COUNT, MAX_DIFFICULTY, MIN_DIFFICULTY};

/// One of the six canonical board directions (0 to 5)
///
/// Direction `d` points at `d * 60` degrees in screen space (y grows down):
/// - 0 = East
/// - 3 = West
/// - 1, 2 = the lower diagonals, 4, 5 = the upper diagonals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    pub const ALL: [Direction; DIRECTION_COUNT] = [
        Direction(0),
        Direction(1),
        Direction(2),
        Direction(3),
        Direction(4),
        Direction(5),
    ];

    /// Create a new direction
    ///
    /// # Returns
    /// Ok(Direction) if valid, Err with message if invalid
    pub fn new(value: u8) -> Result<Self, &'static str> {
        if (value as usize) < DIRECTION_COUNT {
            Ok(Direction(value))
        } else {
            Err("Direction must be between 0 and 5")
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        Direction((self.0 + 3) % DIRECTION_COUNT as u8)
    }

    pub fn angle_degrees(&self) -> f64 {
        f64::from(self.0) * 60.0
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board difficulty (1 to 10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Create a new difficulty level
    ///
    /// # Returns
    /// Ok(Difficulty) if valid, Err with message if invalid
    pub fn new(value: u8) -> Result<Self, &'static str> {
        if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&value) {
            Ok(Difficulty(value))
        } else {
            Err("Difficulty must be between 1 and 10")
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Distance from the easiest level, 0 to 9
    pub fn steps_above_easiest(&self) -> f64 {
        f64::from(self.0 - MIN_DIFFICULTY)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(5)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
