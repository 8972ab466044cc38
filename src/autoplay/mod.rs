//! Automated play for simulation and benchmarking.

pub mod runner;

pub use runner::{FaceCounts, GameRunner, GameSummary, MatchReport, RunError};
