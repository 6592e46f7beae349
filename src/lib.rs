//! Starlattice Game Engine
//!
//! Core rules for a turn-based exploration game played on the vertices of a
//! hexagonal lattice.
//!
//! # Overview
//!
//! The board is a rectangular patch of flat-top hexes. Every hex corner and
//! every hex center is a vertex the player's token can stand on, and the
//! token only moves in straight lines along six canonical directions. Boards
//! are seeded with obstacles, power-ups, black holes and stationary enemy
//! sentries whose kill zones trigger dice-driven component combat.
//!
//! # Modules
//!
//! - [`models`] - Lattice, vertices, ships, components and placed objects
//! - [`services`] - Placement, path computation, combat and the console loop
//! - [`game_engine`] - Session state machine tying one board together
//! - [`io`] - Input/output abstractions for testing
//! - [`ui`] - Text presentation
//! - [`cli`] - Command-line arguments
//!
//! # Example
//!
//! ```rust
//! use starlattice::{GameSession, SessionConfig};
//! use starlattice::models::constants::BoardSize;
//! use starlattice::models::navigation_types::Difficulty;
//!
//! let config = SessionConfig::new(BoardSize::Small, Difficulty::new(5).unwrap(), Some(42));
//! let mut session = GameSession::new(config).unwrap();
//! let steps = session.roll_movement().unwrap();
//! assert!(steps >= 1);
//! ```

pub mod cli;
pub mod game_engine;
pub mod io;
pub mod models;
pub mod services;
pub mod ui;

pub use game_engine::{DefeatReason, GameSession, GameState, MoveReport, Phase, SessionConfig};
pub use models::errors::{GameError, GameResult};
pub use models::lattice::{generate_lattice, Lattice};
pub use services::combat::{CombatEngine, CombatResult};
pub use services::navigation::compute_path;
pub use services::placement::generate_board_objects;
