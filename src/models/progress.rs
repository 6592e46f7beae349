//! Galaxy progress record
//!
//! A flat, JSON-serializable 3x3 grid of board slots. The record is owned by
//! the front end; the core only needs each slot's size, difficulty and seed
//! to regenerate the same board.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::constants::{BoardSize, GALAXY_GRID, MAX_DIFFICULTY};
use super::errors::{GameError, GameResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Locked,
    Unlocked,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSlot {
    pub status: SlotStatus,
    pub size: BoardSize,
    pub difficulty: u8,
    pub seed: u64,
}

impl BoardSlot {
    pub fn is_playable(&self) -> bool {
        matches!(self.status, SlotStatus::Unlocked | SlotStatus::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalaxyProgress {
    pub galaxy_seed: u64,
    pub slots: [[BoardSlot; GALAXY_GRID]; GALAXY_GRID],
}

impl GalaxyProgress {
    /// Lay out a fresh galaxy. Difficulty rises across the grid, each row uses
    /// a larger board preset, and only the top-left slot starts unlocked.
    pub fn new(galaxy_seed: u64) -> Self {
        let slots = std::array::from_fn(|row| {
            std::array::from_fn(|col| {
                let step = (row * GALAXY_GRID + col) as u8;
                BoardSlot {
                    status: if row == 0 && col == 0 {
                        SlotStatus::Unlocked
                    } else {
                        SlotStatus::Locked
                    },
                    size: BoardSize::ALL[row % BoardSize::ALL.len()],
                    difficulty: (1 + step).min(MAX_DIFFICULTY),
                    seed: galaxy_seed
                        .wrapping_mul(31)
                        .wrapping_add(step as u64 + 1),
                }
            })
        });
        GalaxyProgress { galaxy_seed, slots }
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<&BoardSlot> {
        self.slots.get(row).and_then(|r| r.get(col))
    }

    /// First slot that can be played, scanning row by row
    pub fn next_playable(&self) -> Option<(usize, usize)> {
        (0..GALAXY_GRID)
            .flat_map(|row| (0..GALAXY_GRID).map(move |col| (row, col)))
            .find(|&(row, col)| self.slots[row][col].is_playable())
    }

    /// Record a finished board. A win unlocks the orthogonal neighbours.
    pub fn record_result(&mut self, row: usize, col: usize, won: bool) -> GameResult<()> {
        if row >= GALAXY_GRID || col >= GALAXY_GRID {
            return Err(GameError::InvalidInput(format!(
                "slot ({}, {}) is outside the galaxy",
                row, col
            )));
        }
        if self.slots[row][col].status == SlotStatus::Locked {
            return Err(GameError::InvalidAction(format!(
                "slot ({}, {}) is still locked",
                row, col
            )));
        }

        self.slots[row][col].status = if won { SlotStatus::Won } else { SlotStatus::Lost };

        if won {
            let neighbours = [
                (row.wrapping_sub(1), col),
                (row + 1, col),
                (row, col.wrapping_sub(1)),
                (row, col + 1),
            ];
            for (r, c) in neighbours {
                if let Some(slot) = self.slots.get_mut(r).and_then(|x| x.get_mut(c)) {
                    if slot.status == SlotStatus::Locked {
                        slot.status = SlotStatus::Unlocked;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .all(|s| s.status == SlotStatus::Won)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a saved galaxy, or start a new one from `seed` when the file
    /// does not exist yet. Any other read failure is returned.
    pub fn load_or_new(path: &Path, seed: u64) -> GameResult<Self> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), seed, "starting a new galaxy");
                Ok(Self::new(seed))
            }
            Err(e) => Err(e.into()),
        }
    }
}
