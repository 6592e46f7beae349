//! Domain models
//!
//! This module contains all domain models representing game entities
//! and concepts. Models are pure data structures with minimal logic.

pub mod board_object;
pub mod component;
pub mod constants;
pub mod errors;
pub mod lattice;
pub mod navigation_types;
pub mod progress;
pub mod ship;
pub mod vertex;
