//! Dice generation: uniform and weighted (favoured / disfavoured) modes.

pub mod generator;

pub use generator::{
    roll, weighted_face, DiceMode, Weights, DISFAVORED_WEIGHTS, FACES, FAVORED_WEIGHTS,
};
