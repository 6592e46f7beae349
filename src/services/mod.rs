//! Game services
//!
//! This module contains the game logic: object placement, navigation
//! queries, combat resolution, and the console game loop.

pub mod combat;
pub mod game;
pub mod navigation;
pub mod placement;
