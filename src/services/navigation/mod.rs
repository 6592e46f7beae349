//! Navigation system
//!
//! Pure queries over the precomputed rays: which directions are open, where a
//! move along a ray ends, and whether the token is trapped.

mod directions;
mod path;

pub use directions::{available_directions, is_trapped, AvailableDirection};
pub use path::{compute_path, Engagement, Hazards, PathResult};
