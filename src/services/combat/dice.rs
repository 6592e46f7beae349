use rand::{Rng, RngCore};

/// Source of combat randomness.
pub trait Dice {
    /// Roll a die with `sides` faces, returning 1..=sides
    fn roll(&mut self, sides: u8) -> u8;

    /// Pick an index in 0..len. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: RngCore> Dice for R {
    fn roll(&mut self, sides: u8) -> u8 {
        self.gen_range(1..=sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed sequence of rolls, cycling when exhausted.
///
/// Picks replay their own sequence and default to the first candidate.
#[derive(Debug, Clone, Default)]
pub struct FixedDice {
    rolls: Vec<u8>,
    picks: Vec<usize>,
    next_roll: usize,
    next_pick: usize,
}

impl FixedDice {
    pub fn new(rolls: Vec<u8>) -> Self {
        FixedDice {
            rolls,
            ..Default::default()
        }
    }

    pub fn with_picks(mut self, picks: Vec<usize>) -> Self {
        self.picks = picks;
        self
    }
}

impl Dice for FixedDice {
    fn roll(&mut self, sides: u8) -> u8 {
        if self.rolls.is_empty() {
            return sides;
        }
        let value = self.rolls[self.next_roll % self.rolls.len()];
        self.next_roll += 1;
        value.clamp(1, sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.next_pick % self.picks.len()];
        self.next_pick += 1;
        value % len
    }
}
