//! Combat system
//!
//! Turn-based, dice-driven duels between the player ship and an enemy
//! sentry: approach advantage, attack resolution and termination.

mod approach;
mod dice;
mod engine;

pub use approach::{approach_advantage, ApproachAdvantage, Combatant};
pub use dice::{Dice, FixedDice};
pub use engine::{AttackOutcome, CombatConfig, CombatEngine, CombatResult, CombatStatus};
