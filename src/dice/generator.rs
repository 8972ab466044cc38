//! Face generation.
//!
//! Weighted faces use integer weights: draw `r` uniformly from
//! `[0, sum(weights))`, subtract the weights in order, and the first face
//! at which `r` drops below zero is the result. Every face with a
//! positive weight stays reachable, so a biased stream still looks like
//! ordinary luck.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// Number of faces on the die.
pub const FACES: usize = 6;

/// Per-face weights for faces 1..=6.
pub type Weights = [u32; FACES];

/// Favoured seat: skewed high (6 comes up 28% of the time).
pub const FAVORED_WEIGHTS: Weights = [8, 10, 14, 18, 22, 28];

/// Disfavoured seat: skewed low (1 comes up 32% of the time).
pub const DISFAVORED_WEIGHTS: Weights = [32, 26, 17, 12, 8, 5];

/// How a seat's dice are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceMode {
    /// Every face 1/6.
    #[default]
    Uniform,
    /// [`FAVORED_WEIGHTS`].
    Favored,
    /// [`DISFAVORED_WEIGHTS`].
    Disfavored,
}

impl DiceMode {
    /// The weight table for this mode, `None` for uniform.
    #[must_use]
    pub fn weights(self) -> Option<&'static Weights> {
        match self {
            DiceMode::Uniform => None,
            DiceMode::Favored => Some(&FAVORED_WEIGHTS),
            DiceMode::Disfavored => Some(&DISFAVORED_WEIGHTS),
        }
    }
}

/// Roll one die in the given mode.
///
/// ```
/// use ludo_engine::core::GameRng;
/// use ludo_engine::dice::{roll, DiceMode};
///
/// let mut rng = GameRng::new(1);
/// let face = roll(DiceMode::Favored, &mut rng);
/// assert!((1..=6).contains(&face));
/// ```
pub fn roll<R: RandomSource + ?Sized>(mode: DiceMode, rng: &mut R) -> u8 {
    match mode.weights() {
        None => rng.below(FACES as u32) as u8 + 1,
        Some(weights) => weighted_face(weights, rng),
    }
}

/// Pick a 1-indexed face from a weight table.
///
/// Panics if the weights sum to zero; weight tables are static
/// configuration, so that is a programming error.
pub fn weighted_face<R: RandomSource + ?Sized>(weights: &Weights, rng: &mut R) -> u8 {
    let total: u32 = weights.iter().sum();
    assert!(total > 0, "dice weights must sum to a positive value");

    let mut remaining = rng.below(total) as i64;
    for (i, &weight) in weights.iter().enumerate() {
        remaining -= i64::from(weight);
        if remaining < 0 {
            return i as u8 + 1;
        }
    }
    // `below` returned a value outside [0, total)
    unreachable!("random source drew beyond the weight total")
}
