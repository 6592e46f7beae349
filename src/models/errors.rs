use thiserror::Error;

use super::vertex::VertexId;

/// Game-specific error types
///
/// Expected gameplay outcomes (trapped, hazard death, combat loss) are never
/// reported through this type; they are regular result values.
#[derive(Error, Debug)]
pub enum GameError {
    /// Caller supplied an impossible configuration (board size, difficulty, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Installing a component would exceed the ship's power limit
    #[error("Power budget exceeded: required {required}, available {available}")]
    PowerBudgetExceeded { required: u32, available: u32 },

    /// A ship may carry a single bridge
    #[error("A bridge is already installed")]
    DuplicateBridge,

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Vertex {0} is not part of the lattice")]
    UnknownVertex(VertexId),

    /// No start-to-target path could be certified
    #[error("Board placement failed after {attempts} attempts")]
    PlacementFailed { attempts: u32 },

    #[error("No active weapon available")]
    NoActiveWeapon,

    /// Action not allowed in the current phase or turn
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Failed to parse user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

impl From<std::num::ParseIntError> for GameError {
    fn from(err: std::num::ParseIntError) -> Self {
        GameError::InvalidInput(err.to_string())
    }
}
