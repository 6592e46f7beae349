use std::ops::RangeInclusive;

use crate::models::constants::{
    ENEMY_MIN_DIFFICULTY, HAZARD_SHARE_DIVISOR, MAX_DIFFICULTY, MIN_DIFFICULTY, OBSTACLE_PCT_EASY,
    OBSTACLE_PCT_SPAN, POWER_UP_PCT_EASY, POWER_UP_PCT_SPAN,
};
use crate::models::navigation_types::Difficulty;

/// How many objects of each kind a board receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementBudget {
    pub obstacles: usize,
    pub black_holes: usize,
    pub enemies: usize,
    pub power_ups: usize,
}

/// Share of eligible vertices given to obstacle-class objects: 5% at
/// difficulty 1 rising to 20% at difficulty 10.
pub fn obstacle_pct(difficulty: Difficulty) -> f64 {
    let span = f64::from(MAX_DIFFICULTY - MIN_DIFFICULTY);
    OBSTACLE_PCT_EASY + difficulty.steps_above_easiest() * (OBSTACLE_PCT_SPAN / span)
}

/// Share of eligible vertices given to power-ups: 15% falling to 3%.
pub fn power_up_pct(difficulty: Difficulty) -> f64 {
    let span = f64::from(MAX_DIFFICULTY - MIN_DIFFICULTY);
    POWER_UP_PCT_EASY - difficulty.steps_above_easiest() * (POWER_UP_PCT_SPAN / span)
}

fn clamp_range(low: i16, high: i16) -> RangeInclusive<u8> {
    let clamp = |v: i16| v.clamp(i16::from(MIN_DIFFICULTY), i16::from(MAX_DIFFICULTY)) as u8;
    clamp(low)..=clamp(high)
}

/// Obstacle-class values track the difficulty within two levels.
pub fn obstacle_value_range(difficulty: Difficulty) -> RangeInclusive<u8> {
    let d = i16::from(difficulty.value());
    clamp_range(d - 2, d + 2)
}

/// Power-up values scale inversely: easy boards get strong pickups.
pub fn power_up_value_range(difficulty: Difficulty) -> RangeInclusive<u8> {
    let d = i16::from(difficulty.value());
    clamp_range(9 - d, 13 - d)
}

impl PlacementBudget {
    /// Counts use exact integer forms of the percentages, (d + 2) / 60 and
    /// (49 - 4d) / 300, so floors never land one short on float error.
    pub fn for_board(eligible: usize, difficulty: Difficulty) -> Self {
        let d = usize::from(difficulty.value());
        let obstacle_class = eligible * (d + 2) / 60;
        let power_ups = eligible * (49 - 4 * d) / 300;

        let black_holes = obstacle_class / HAZARD_SHARE_DIVISOR;
        let enemies = if difficulty.value() >= ENEMY_MIN_DIFFICULTY {
            obstacle_class / HAZARD_SHARE_DIVISOR
        } else {
            0
        };
        // Plain obstacles absorb the rounding remainder and any enemy share.
        let obstacles = obstacle_class - black_holes - enemies;

        PlacementBudget {
            obstacles,
            black_holes,
            enemies,
            power_ups,
        }
    }

    pub fn obstacle_class(&self) -> usize {
        self.obstacles + self.black_holes + self.enemies
    }

    pub fn total(&self) -> usize {
        self.obstacle_class() + self.power_ups
    }
}
