//! Headless game runner.
//!
//! Plays whole games without a host: automated seats move through
//! [`Session::auto_move`], manual seats pick uniformly among their legal
//! moves. Useful for simulation, balancing the cheat weights and benches.

use thiserror::Error;
use tracing::debug;

use crate::core::{ConfigError, GameRng, PlayerId, PlayerMap, Rejected, SessionConfig};
use crate::dice::FACES;
use crate::session::{Session, TurnState};

/// Errors from running a game.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("engine rejected a runner request: {0}")]
    Rejected(#[from] Rejected),
}

/// Faces rolled per seat; index 0 counts ones.
pub type FaceCounts = PlayerMap<[u64; FACES]>;

/// Summary of one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSummary {
    /// `None` when the turn limit was hit first.
    pub winner: Option<PlayerId>,
    pub turns: u32,
    pub rolls: PlayerMap<u32>,
    pub captures: PlayerMap<u32>,
    pub faces: FaceCounts,
}

/// Totals over many games.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchReport {
    pub games: u32,
    pub wins: PlayerMap<u32>,
    pub unfinished: u32,
    pub captures: PlayerMap<u64>,
    pub faces: FaceCounts,
}

impl MatchReport {
    fn new() -> Self {
        Self {
            games: 0,
            wins: PlayerMap::with_default(),
            unfinished: 0,
            captures: PlayerMap::with_default(),
            faces: PlayerMap::with_value([0; FACES]),
        }
    }

    fn absorb(&mut self, summary: &GameSummary) {
        self.games += 1;
        match summary.winner {
            Some(winner) => self.wins[winner] += 1,
            None => self.unfinished += 1,
        }
        for player in PlayerId::seats() {
            self.captures[player] += u64::from(summary.captures[player]);
            for (total, count) in self.faces[player].iter_mut().zip(summary.faces[player]) {
                *total += count;
            }
        }
    }

    /// Fraction of games won by `player`.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.wins[player]) / f64::from(self.games)
    }

    /// Share of each face among `player`'s rolls.
    #[must_use]
    pub fn face_frequencies(&self, player: PlayerId) -> [f64; FACES] {
        let counts = &self.faces[player];
        let total: u64 = counts.iter().sum();
        std::array::from_fn(|i| {
            if total == 0 {
                0.0
            } else {
                counts[i] as f64 / total as f64
            }
        })
    }
}

/// Runs games to completion.
#[derive(Clone, Debug)]
pub struct GameRunner {
    config: SessionConfig,
    max_turns: u32,
}

impl GameRunner {
    /// Default turn limit. Real games finish far sooner.
    pub const DEFAULT_MAX_TURNS: u32 = 5_000;

    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Play one game.
    pub fn run(&self) -> Result<GameSummary, RunError> {
        let mut session = Session::start(self.config.clone())?;
        let mut picker = session.rng().for_context("manual-picks");
        self.play(&mut session, &mut picker)
    }

    /// Play `games` games, seeding game `i` with `base_seed + i`.
    pub fn run_many(&self, games: u32, base_seed: u64) -> Result<MatchReport, RunError> {
        let mut report = MatchReport::new();
        for i in 0..games {
            let runner = Self {
                config: self.config.clone().with_seed(base_seed.wrapping_add(u64::from(i))),
                max_turns: self.max_turns,
            };
            let summary = runner.run()?;
            debug!(game = i, winner = ?summary.winner, turns = summary.turns, "game finished");
            report.absorb(&summary);
        }
        Ok(report)
    }

    /// Drive an existing session until it ends or the turn limit is hit.
    pub fn play(&self, session: &mut Session, picker: &mut GameRng) -> Result<GameSummary, RunError> {
        let mut rolls: PlayerMap<u32> = PlayerMap::with_default();
        let mut captures: PlayerMap<u32> = PlayerMap::with_default();
        let mut faces: FaceCounts = PlayerMap::with_value([0; FACES]);

        while session.winner().is_none() && session.turn_number() <= self.max_turns {
            let player = session.active_player();
            match session.turn_state().clone() {
                TurnState::AwaitingRoll { .. } => {
                    let roll = session.roll_dice(player)?;
                    rolls[player] += 1;
                    faces[player][usize::from(roll.face) - 1] += 1;
                }
                TurnState::AwaitingMove { .. } => {
                    let outcome = if session.seat_role(player).is_automated() {
                        session.auto_move(player)?.outcome
                    } else {
                        let legal = session.legal_moves();
                        let piece = *picker
                            .choose(&legal)
                            .ok_or(Rejected::NoLegalMove { dice: session.dice_value() })?;
                        session.request_move(player, piece)?
                    };
                    if outcome.captured.is_some() {
                        captures[player] += 1;
                    }
                }
                TurnState::RollLocked { .. } => {
                    session.commit_roll()?;
                }
                TurnState::MoveLocked { .. } => {
                    session.finish_move()?;
                }
                TurnState::Finished { .. } => break,
            }
        }

        Ok(GameSummary {
            winner: session.winner(),
            turns: session.turn_number(),
            rolls,
            captures,
            faces,
        })
    }
}
