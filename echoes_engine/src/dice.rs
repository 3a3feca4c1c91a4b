//! Dice module
//!
//! Every chance-based event in the game (random encounters, fleeing, choosing which
//! creature shows up) rolls through the [`Dice`] trait, so the source of randomness can
//! be swapped out: a seeded or OS-seeded RNG for play, a scripted sequence for tests.
use std::collections::VecDeque;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed integers.
pub trait Dice {
    /// Roll a value in `low..=high`. Returns `low` if the range is empty.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// Roll 1..=100 and report whether the result is at or under `chance`.
    fn percent(&mut self, chance: u32) -> bool {
        self.roll(1, 100) <= chance
    }
}

/// Production dice backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct GameDice {
    rng: StdRng,
    seed: Option<u64>,
}
impl GameDice {
    /// Dice seeded from operating system entropy.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Dice with a fixed seed, for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        info!("dice seeded with {seed}");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seeded dice if `seed` is provided, otherwise OS-seeded.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::seeded)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
impl Dice for GameDice {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Dice that return a predetermined sequence of rolls.
///
/// Each scripted value is clamped into the requested range. Once the script runs out,
/// every roll returns `high`: encounters and escapes then fail under any chance below 100.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
}
impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}
impl Dice for ScriptedDice {
    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        if let Some(value) = self.rolls.pop_front() {
            value.clamp(low, high)
        } else {
            warn!("scripted dice exhausted, rolling {high}");
            high
        }
    }
}
