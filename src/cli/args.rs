use std::path::PathBuf;

use clap::Parser;

use crate::game_engine::SessionConfig;
use crate::models::constants::{BoardSize, PROGRESS_STORAGE_KEY};
use crate::models::errors::{GameError, GameResult};
use crate::models::navigation_types::Difficulty;

/// Navigate a hex lattice past obstacles, black holes and sentries.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "starlattice")]
pub struct Args {
    /// Seed for the random number generator
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Board preset: small, medium or large
    #[arg(long, default_value = "small")]
    pub size: BoardSize,

    /// Difficulty from 1 (sparse) to 10 (crowded)
    #[arg(
        long,
        short = 'd',
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    pub difficulty: u8,

    /// Play the 3x3 galaxy campaign instead of a single board
    #[arg(long)]
    pub galaxy: bool,

    /// Galaxy progress file
    #[arg(long)]
    pub progress: Option<PathBuf>,
}

impl Args {
    pub fn session_config(&self) -> GameResult<SessionConfig> {
        let difficulty = Difficulty::new(self.difficulty)
            .map_err(|e| GameError::InvalidConfiguration(e.to_string()))?;
        Ok(SessionConfig::new(self.size, difficulty, self.seed))
    }

    pub fn progress_path(&self) -> PathBuf {
        self.progress
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", PROGRESS_STORAGE_KEY)))
    }

    /// Galaxy mode is implied by naming a progress file.
    pub fn galaxy_mode(&self) -> bool {
        self.galaxy || self.progress.is_some()
    }
}

pub fn parse() -> Args {
    Args::parse()
}
