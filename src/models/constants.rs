use serde::{Deserialize, Serialize};

pub const DIRECTION_COUNT: usize = 6;
pub const DEFAULT_HEX_SIZE: f64 = 40.0;

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

// Placement tuning. Percentages are interpolated linearly across difficulty.
pub const OBSTACLE_PCT_EASY: f64 = 0.05;
pub const OBSTACLE_PCT_SPAN: f64 = 0.15;
pub const POWER_UP_PCT_EASY: f64 = 0.15;
pub const POWER_UP_PCT_SPAN: f64 = 0.12;
/// Black holes and enemies each take one fifth of the obstacle-class budget.
pub const HAZARD_SHARE_DIVISOR: usize = 5;
pub const ENEMY_MIN_DIFFICULTY: u8 = 3;
pub const MAX_VISION_RANGE: u8 = 6;
pub const PLACEMENT_ATTEMPTS: u32 = 20;

// Combat defaults
pub const DIE_SIDES: u8 = 6;
pub const FALLBACK_HIT_THRESHOLD: u8 = 4;
pub const DEFAULT_MAX_TURNS: u32 = 5;

pub const PLAYER_POWER_LIMIT: u32 = 10;
pub const ENEMY_POWER_LIMIT: u32 = 10;

/// Storage key of the serialized galaxy progress record.
pub const PROGRESS_STORAGE_KEY: &str = "starlattice.progress";
pub const GALAXY_GRID: usize = 3;

/// Discrete board presets. Each maps to a fixed columns x rows pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSize {
    Small,
    Medium,
    Large,
}

impl BoardSize {
    pub const ALL: [BoardSize; 3] = [BoardSize::Small, BoardSize::Medium, BoardSize::Large];

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            BoardSize::Small => (5, 4),
            BoardSize::Medium => (7, 6),
            BoardSize::Large => (9, 8),
        }
    }

    /// Total steps the player may spend crossing a board of this size.
    pub fn movement_budget(&self) -> u32 {
        match self {
            BoardSize::Small => 30,
            BoardSize::Medium => 45,
            BoardSize::Large => 60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoardSize::Small => "SMALL",
            BoardSize::Medium => "MEDIUM",
            BoardSize::Large => "LARGE",
        }
    }
}

impl std::str::FromStr for BoardSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(BoardSize::Small),
            "medium" | "m" => Ok(BoardSize::Medium),
            "large" | "l" => Ok(BoardSize::Large),
            other => Err(format!("unknown board size '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_grow_with_size() {
        let areas: Vec<u32> = BoardSize::ALL
            .iter()
            .map(|s| {
                let (c, r) = s.dimensions();
                c * r
            })
            .collect();
        assert!(areas.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn board_size_parses_short_and_long_names() {
        assert_eq!("m".parse::<BoardSize>(), Ok(BoardSize::Medium));
        assert_eq!("LARGE".parse::<BoardSize>(), Ok(BoardSize::Large));
        assert!("huge".parse::<BoardSize>().is_err());
    }
}
