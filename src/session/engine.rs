//! The game session.
//!
//! A `Session` owns one game: the piece store, the turn state, the RNG and
//! the action history. Hosts drive it with rolls and piece selections; the
//! session validates every request up front and either applies it fully or
//! rejects it with the state untouched.
//!
//! Animated hosts use the two-phase calls (`begin_roll`/`commit_roll`,
//! `begin_move`/`step_move`/`finish_move`) and pace playback between them.
//! Headless callers use `roll_dice` and `request_move`.

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::board::{Cell, Occupancy, Topology};
use crate::core::{
    Action, ActionRecord, CheatConfig, ConfigError, GameRng, Pacing, Piece, PieceId, PieceStore,
    PlayerId, Rejected, SessionConfig, PIECES_PER_PLAYER,
};
use crate::dice;
use crate::policy::SeatRole;
use crate::rules::{self, MoveKind, Path};

use super::turn::{Motion, TurnState};

/// Result of a completed roll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player: PlayerId,
    pub face: u8,
    /// Pieces that may move with this face.
    pub legal: SmallVec<[PieceId; 4]>,
    /// Nothing could move; the turn went to `next_player`.
    pub passed: bool,
    /// Who acts next: the roller when a move is pending, otherwise the
    /// next seat.
    pub next_player: PlayerId,
}

/// Result of a completed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: PlayerId,
    pub piece: PieceId,
    pub kind: MoveKind,
    pub from: Cell,
    pub resting_cell: Cell,
    pub travel_count: u8,
    pub reached_terminal: bool,
    pub captured: Option<PieceId>,
    /// Cells visited, in order, for playback.
    pub path: Path,
    /// Landed on a safe or star cell.
    pub immune_landing: bool,
    /// The mover rolls again.
    pub extra_turn: bool,
    /// Set when this move won the game.
    pub winner: Option<PlayerId>,
    /// Who acts next; `None` once the game is over.
    pub next_player: Option<PlayerId>,
}

/// A piece chosen by an automated seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoChoice {
    pub piece: PieceId,
    /// Pause the host may take before playing the move back.
    pub think_time: Option<Duration>,
}

/// Result of [`Session::auto_move`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoMove {
    pub choice: AutoChoice,
    pub outcome: MoveOutcome,
}

/// Serializable read model of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub player_count: usize,
    pub names: [String; 4],
    pub turn: TurnState,
    pub active_player: PlayerId,
    /// Face rolled this turn, 0 when not rolled yet.
    pub dice_value: u8,
    pub last_roll: Option<u8>,
    pub winner: Option<PlayerId>,
    pub input_locked: bool,
    pub cheat: CheatConfig,
    pub pieces: PieceStore,
    pub turn_number: u32,
    pub history_len: usize,
}

/// One game of Ludo.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    names: [String; 4],
    topology: Topology,
    store: PieceStore,
    turn: TurnState,
    last_roll: Option<u8>,
    rng: GameRng,
    history: Vector<ActionRecord>,
    turn_number: u32,
    sequence: u32,
}

impl Session {
    /// Start a new game: all pieces pocketed, seat 1 to roll.
    pub fn start(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let session = Self::fresh(config, rng);
        info!(
            players = session.config.player_count,
            favored = ?session.config.cheat.favored(),
            seed = session.rng.seed(),
            "session started"
        );
        Ok(session)
    }

    /// Start from an arbitrary position with `active` to roll. Used for
    /// analysis, puzzles and tests.
    pub fn from_position(
        config: SessionConfig,
        store: PieceStore,
        active: PlayerId,
    ) -> Result<Self, ConfigError> {
        let mut session = Self::start(config)?;
        if !active.is_active(session.config.player_count) {
            return Err(ConfigError::Validation(format!(
                "{active} is not seated in a {}-player game",
                session.config.player_count
            )));
        }
        store
            .check_invariants(&session.topology)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if let Some(winner) = rules::find_winner(&store, session.config.player_count) {
            return Err(ConfigError::Validation(format!("{winner} has already won")));
        }
        session.store = store;
        session.turn = TurnState::AwaitingRoll { player: active };
        Ok(session)
    }

    fn fresh(config: SessionConfig, rng: GameRng) -> Self {
        Self {
            names: config.resolved_names(),
            config,
            topology: Topology::standard(),
            store: PieceStore::new(),
            turn: TurnState::AwaitingRoll {
                player: PlayerId::new(1),
            },
            last_roll: None,
            rng,
            history: Vector::new(),
            turn_number: 1,
            sequence: 0,
        }
    }

    /// Throw the game away and start over with the same players, names and
    /// cheat settings. The RNG stream continues, so the new game does not
    /// replay the old one.
    pub fn reset(&mut self) -> SessionState {
        let rng = self.rng.fork();
        *self = Self::fresh(self.config.clone(), rng);
        info!(players = self.config.player_count, "session reset");
        self.snapshot()
    }

    /// Change demo mode. Takes effect from the next roll.
    pub fn set_cheat_config(&mut self, cheat: CheatConfig) -> Result<(), ConfigError> {
        cheat.validate()?;
        self.config.cheat = cheat;
        debug!(enabled = cheat.enabled, favored = ?cheat.favored(), "cheat config changed");
        Ok(())
    }

    // =========================================================================
    // Rolling
    // =========================================================================

    /// Roll and commit in one call.
    pub fn roll_dice(&mut self, player: PlayerId) -> Result<RollOutcome, Rejected> {
        self.begin_roll(player)?;
        self.commit_roll()
    }

    /// Roll with the seat's dice mode and lock input until
    /// [`commit_roll`](Self::commit_roll). Returns the face.
    pub fn begin_roll(&mut self, player: PlayerId) -> Result<u8, Rejected> {
        self.check_roll_request(player)?;
        let mode = self.seat_role(player).policy().dice_mode();
        let face = dice::roll(mode, &mut self.rng);
        self.lock_roll(player, face);
        Ok(face)
    }

    /// Apply a face rolled outside the engine, such as physical dice or a
    /// recorded game being replayed. Commits immediately.
    pub fn roll_with(&mut self, player: PlayerId, face: u8) -> Result<RollOutcome, Rejected> {
        if !(1..=dice::FACES as u8).contains(&face) {
            return Err(Rejected::InvalidFace(face));
        }
        self.check_roll_request(player)?;
        self.lock_roll(player, face);
        self.commit_roll()
    }

    fn check_roll_request(&self, player: PlayerId) -> Result<(), Rejected> {
        self.check_seat(player)?;
        match self.turn {
            TurnState::Finished { .. } => Err(Rejected::GameFinished),
            TurnState::RollLocked { .. } | TurnState::MoveLocked { .. } => Err(Rejected::InputLocked),
            TurnState::AwaitingRoll { player: active } | TurnState::AwaitingMove { player: active, .. }
                if active != player =>
            {
                Err(Rejected::NotYourTurn {
                    requested: player,
                    active,
                })
            }
            TurnState::AwaitingMove { .. } => Err(Rejected::AlreadyRolled),
            TurnState::AwaitingRoll { .. } => Ok(()),
        }
    }

    fn lock_roll(&mut self, player: PlayerId, face: u8) {
        debug!(player = %player, face, "rolled");
        self.last_roll = Some(face);
        self.turn = TurnState::RollLocked { player, face };
        self.record(player, Action::Roll { face });
    }

    /// Release the roll lock. Hands the turn on when no piece can move,
    /// even on a 6.
    pub fn commit_roll(&mut self) -> Result<RollOutcome, Rejected> {
        let TurnState::RollLocked { player, face } = self.turn else {
            return Err(Rejected::NoRollInFlight);
        };

        let legal = rules::legal_moves(&self.store, player, face);
        if legal.is_empty() {
            let next = player.next(self.config.player_count);
            debug!(player = %player, face, next = %next, "no legal move, passing");
            self.record(player, Action::Pass { face });
            self.start_turn(next);
            return Ok(RollOutcome {
                player,
                face,
                legal,
                passed: true,
                next_player: next,
            });
        }

        self.turn = TurnState::AwaitingMove { player, dice: face };
        Ok(RollOutcome {
            player,
            face,
            legal,
            passed: false,
            next_player: player,
        })
    }

    // =========================================================================
    // Moving
    // =========================================================================

    /// Validate and apply a host-selected move in one call.
    pub fn request_move(&mut self, player: PlayerId, piece: PieceId) -> Result<MoveOutcome, Rejected> {
        self.begin_move(player, piece)?;
        self.finish_move()
    }

    /// Validate a host-selected move and lock input. Nothing changes on
    /// rejection; on success the piece has not moved yet.
    pub fn begin_move(&mut self, player: PlayerId, piece: PieceId) -> Result<(), Rejected> {
        let dice = self.check_move_request(player)?;
        if self.seat_role(player).is_automated() {
            return Err(Rejected::AutomatedSeat(player));
        }
        self.lock_move(player, piece, dice)
    }

    /// Let the seat's policy pick a piece and lock input for that move.
    pub fn begin_auto_move(&mut self, player: PlayerId) -> Result<AutoChoice, Rejected> {
        let dice = self.check_move_request(player)?;
        let policy = self.seat_role(player).policy();
        if !policy.is_automated() {
            return Err(Rejected::ManualSeat(player));
        }

        let piece = policy
            .select_piece(dice, self.store.pieces(player))
            .ok_or(Rejected::NoLegalMove { dice })?;
        self.lock_move(player, piece, dice)?;
        let think_time = policy.think_time(&mut self.rng);
        debug!(player = %player, piece = %piece, dice, "auto-selected");
        Ok(AutoChoice { piece, think_time })
    }

    /// Pick and apply a move for an automated seat.
    pub fn auto_move(&mut self, player: PlayerId) -> Result<AutoMove, Rejected> {
        let choice = self.begin_auto_move(player)?;
        let outcome = self.finish_move()?;
        Ok(AutoMove { choice, outcome })
    }

    fn check_move_request(&self, player: PlayerId) -> Result<u8, Rejected> {
        self.check_seat(player)?;
        match self.turn {
            TurnState::Finished { .. } => Err(Rejected::GameFinished),
            TurnState::RollLocked { .. } | TurnState::MoveLocked { .. } => Err(Rejected::InputLocked),
            TurnState::AwaitingRoll { player: active } | TurnState::AwaitingMove { player: active, .. }
                if active != player =>
            {
                Err(Rejected::NotYourTurn {
                    requested: player,
                    active,
                })
            }
            TurnState::AwaitingRoll { .. } => Err(Rejected::NotRolled),
            TurnState::AwaitingMove { dice, .. } => Ok(dice),
        }
    }

    fn lock_move(&mut self, player: PlayerId, piece: PieceId, dice: u8) -> Result<(), Rejected> {
        let kind = rules::validate_move(&self.store, player, piece, dice)?;
        let steps_left = match kind {
            MoveKind::Enter => 1,
            MoveKind::Advance => dice,
        };
        self.turn = TurnState::MoveLocked {
            player,
            dice,
            motion: Motion {
                piece,
                kind,
                from: self.store.get(piece).position,
                steps_left,
                path: Path::new(),
            },
        };
        Ok(())
    }

    /// Apply one step of the move in flight. Returns the new cell, or
    /// `None` when every step has been applied.
    pub fn step_move(&mut self) -> Result<Option<Cell>, Rejected> {
        let TurnState::MoveLocked { motion, .. } = &mut self.turn else {
            return Err(Rejected::NoMoveInFlight);
        };
        if motion.steps_left == 0 {
            return Ok(None);
        }

        let cell = match motion.kind {
            MoveKind::Enter => rules::place_on_entry(&mut self.store, &self.topology, motion.piece),
            MoveKind::Advance => rules::step(&mut self.store, &self.topology, motion.piece),
        };
        motion.steps_left -= 1;
        motion.path.push(cell);
        trace!(piece = %motion.piece, %cell, left = motion.steps_left, "step");

        self.check_store();
        Ok(Some(cell))
    }

    /// Apply any remaining steps, then resolve capture, win and the next
    /// actor. Moves cannot be cancelled once begun.
    pub fn finish_move(&mut self) -> Result<MoveOutcome, Rejected> {
        while self.step_move()?.is_some() {}

        let TurnState::MoveLocked { player, dice, motion } = self.turn.clone() else {
            return Err(Rejected::NoMoveInFlight);
        };
        let Motion { piece, kind, from, path, .. } = motion;

        let landing = rules::apply_landing(&mut self.store, &self.topology, piece);
        let landed = *self.store.get(piece);
        if let Some(victim) = landing.captured {
            debug!(piece = %piece, victim = %victim, cell = %landed.position, "captured");
        }
        debug!(
            player = %player,
            piece = %piece,
            from = %from,
            to = %landed.position,
            travel = landed.travel_count,
            "moved"
        );
        self.record(
            player,
            Action::Move {
                piece,
                from,
                to: landed.position,
                captured: landing.captured,
            },
        );

        let reached_terminal = landed.is_finished();
        let winner = (reached_terminal && rules::check_win(self.store.pieces(player))).then_some(player);
        let extra_turn = winner.is_none() && (dice == 6 || landing.captured.is_some() || reached_terminal);

        let next_player = if let Some(winner) = winner {
            info!(winner = %winner, name = %self.names[winner.index()], "game won");
            self.turn = TurnState::Finished { winner };
            None
        } else {
            let next = if extra_turn {
                player
            } else {
                player.next(self.config.player_count)
            };
            self.start_turn(next);
            Some(next)
        };
        self.check_store();

        Ok(MoveOutcome {
            player,
            piece,
            kind,
            from,
            resting_cell: landed.position,
            travel_count: landed.travel_count,
            reached_terminal,
            captured: landing.captured,
            path,
            immune_landing: landing.immune,
            extra_turn,
            winner,
            next_player,
        })
    }

    // =========================================================================
    // Bookkeeping
    // =========================================================================

    fn check_seat(&self, player: PlayerId) -> Result<(), Rejected> {
        if player.is_active(self.config.player_count) {
            Ok(())
        } else {
            Err(Rejected::InactiveSeat(player))
        }
    }

    fn start_turn(&mut self, player: PlayerId) {
        self.turn_number += 1;
        self.sequence = 0;
        self.turn = TurnState::AwaitingRoll { player };
        debug!(player = %player, turn = self.turn_number, "turn begins");
    }

    fn record(&mut self, player: PlayerId, action: Action) {
        self.history
            .push_back(ActionRecord::new(player, action, self.turn_number, self.sequence));
        self.sequence += 1;
    }

    fn check_store(&self) {
        let result = self.store.check_invariants(&self.topology);
        debug_assert!(result.is_ok(), "piece store invariant broken: {result:?}");
    }

    // =========================================================================
    // Observers
    // =========================================================================

    #[must_use]
    pub fn pieces(&self, player: PlayerId) -> &[Piece; PIECES_PER_PLAYER] {
        self.store.pieces(player)
    }

    #[must_use]
    pub fn store(&self) -> &PieceStore {
        &self.store
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Whose turn it is. After the game ends this is the winner.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turn.player()
    }

    /// Face rolled this turn, 0 before the roll.
    #[must_use]
    pub fn dice_value(&self) -> u8 {
        self.turn.dice().unwrap_or(0)
    }

    /// The most recent face rolled by anyone.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.turn {
            TurnState::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.turn.is_locked()
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Who stands where, derived from the piece store.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_store(&self.store)
    }

    /// Pieces the active player may move. Empty unless a move is awaited.
    #[must_use]
    pub fn legal_moves(&self) -> SmallVec<[PieceId; 4]> {
        match self.turn {
            TurnState::AwaitingMove { player, dice } => rules::legal_moves(&self.store, player, dice),
            _ => SmallVec::new(),
        }
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn names(&self) -> &[String; 4] {
        &self.names
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn cheat_config(&self) -> &CheatConfig {
        &self.config.cheat
    }

    #[must_use]
    pub fn pacing(&self) -> &Pacing {
        &self.config.pacing
    }

    #[must_use]
    pub fn seat_role(&self, player: PlayerId) -> SeatRole {
        SeatRole::for_seat(&self.config.cheat, player)
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        SessionState {
            player_count: self.config.player_count,
            names: self.names.clone(),
            turn: self.turn.clone(),
            active_player: self.active_player(),
            dice_value: self.dice_value(),
            last_roll: self.last_roll,
            winner: self.winner(),
            input_locked: self.is_input_locked(),
            cheat: self.config.cheat,
            pieces: self.store.clone(),
            turn_number: self.turn_number,
            history_len: self.history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PieceId {
        s.parse().unwrap()
    }

    fn p(seat: u8) -> PlayerId {
        PlayerId::new(seat)
    }

    fn session(players: usize) -> Session {
        Session::start(SessionConfig::new(players).with_seed(42)).unwrap()
    }

    fn session_at(store: PieceStore, active: u8) -> Session {
        Session::from_position(SessionConfig::new(4).with_seed(42), store, p(active)).unwrap()
    }

    #[test]
    fn test_start_state() {
        let s = session(4);
        assert_eq!(s.active_player(), p(1));
        assert_eq!(s.dice_value(), 0);
        assert_eq!(s.last_roll(), None);
        assert_eq!(s.winner(), None);
        assert!(!s.is_input_locked());
        assert!(s.history().is_empty());
        assert!(s.store().iter().all(Piece::is_pocketed));
    }

    #[test]
    fn test_start_rejects_bad_config() {
        assert!(Session::start(SessionConfig::new(1)).is_err());
        assert!(Session::start(SessionConfig::new(5)).is_err());
    }

    #[test]
    fn test_roll_out_of_turn_is_rejected() {
        let mut s = session(4);
        assert_eq!(
            s.roll_dice(p(2)),
            Err(Rejected::NotYourTurn { requested: p(2), active: p(1) })
        );
        assert!(s.history().is_empty());
    }

    #[test]
    fn test_inactive_seat_is_rejected() {
        let mut s = session(2);
        assert_eq!(s.roll_dice(p(3)), Err(Rejected::InactiveSeat(p(3))));
    }

    #[test]
    fn test_non_six_from_pockets_passes() {
        let mut s = session(4);
        let outcome = s.roll_with(p(1), 3).unwrap();
        assert!(outcome.passed);
        assert_eq!(outcome.next_player, p(2));
        assert_eq!(s.active_player(), p(2));
        assert_eq!(s.dice_value(), 0);
        assert_eq!(s.last_roll(), Some(3));
        assert!(matches!(s.history().back().unwrap().action, Action::Pass { face: 3 }));
    }

    #[test]
    fn test_six_enters_and_grants_extra_turn() {
        let mut s = session(4);
        let roll = s.roll_with(p(1), 6).unwrap();
        assert!(!roll.passed);
        assert_eq!(roll.legal.len(), 4);
        assert_eq!(s.dice_value(), 6);

        let moved = s.request_move(p(1), id("A1")).unwrap();
        assert_eq!(moved.kind, MoveKind::Enter);
        assert_eq!(moved.resting_cell, Cell::new(1));
        assert_eq!(moved.travel_count, 1);
        assert!(moved.immune_landing);
        assert!(moved.extra_turn);
        assert_eq!(moved.next_player, Some(p(1)));
        assert_eq!(s.active_player(), p(1));
        assert_eq!(s.dice_value(), 0);
    }

    #[test]
    fn test_roll_twice_is_rejected() {
        let mut s = session(4);
        s.roll_with(p(1), 6).unwrap();
        assert_eq!(s.roll_dice(p(1)), Err(Rejected::AlreadyRolled));
    }

    #[test]
    fn test_move_before_roll_is_rejected() {
        let mut s = session(4);
        assert_eq!(s.request_move(p(1), id("A1")), Err(Rejected::NotRolled));
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(115), 55);
        store.place(id("A2"), Cell::new(10), 10);
        let mut s = session_at(store, 1);
        s.roll_with(p(1), 4).unwrap();
        let before = s.snapshot();

        assert_eq!(
            s.request_move(p(1), id("A1")),
            Err(Rejected::Overshoot { piece: id("A1"), travel: 55, dice: 4 })
        );
        assert_eq!(
            s.request_move(p(1), id("B1")),
            Err(Rejected::NotOwned { piece: id("B1"), player: p(1) })
        );
        assert_eq!(
            s.request_move(p(1), id("A3")),
            Err(Rejected::WrongDiceForEntry { piece: id("A3"), dice: 4 })
        );
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_ordinary_move_hands_turn_on() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(10), 10);
        let mut s = session_at(store, 1);

        s.roll_with(p(1), 4).unwrap();
        let moved = s.request_move(p(1), id("A1")).unwrap();
        assert_eq!(moved.resting_cell, Cell::new(14));
        assert!(!moved.extra_turn);
        assert_eq!(s.active_player(), p(2));
    }

    #[test]
    fn test_capture_grants_extra_turn() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(28), 28);
        store.place(id("C1"), Cell::new(30), 4);
        let mut s = session_at(store, 1);

        s.roll_with(p(1), 2).unwrap();
        let moved = s.request_move(p(1), id("A1")).unwrap();
        assert_eq!(moved.captured, Some(id("C1")));
        assert!(moved.extra_turn);
        assert!(s.pieces(p(3))[0].is_pocketed());
        assert_eq!(s.active_player(), p(1));
    }

    #[test]
    fn test_reaching_home_grants_extra_turn() {
        let mut store = PieceStore::new();
        store.place(id("B1"), Cell::new(224), 54);
        store.place(id("B2"), Cell::new(20), 7);
        let mut s = session_at(store, 2);

        s.roll_with(p(2), 3).unwrap();
        let moved = s.request_move(p(2), id("B1")).unwrap();
        assert!(moved.reached_terminal);
        assert_eq!(moved.resting_cell, Cell::new(227));
        assert!(moved.extra_turn);
        assert_eq!(moved.winner, None);
        assert_eq!(s.active_player(), p(2));
    }

    #[test]
    fn test_last_piece_home_wins() {
        let mut store = PieceStore::new();
        for piece in ["D1", "D2", "D3"] {
            store.place(id(piece), Cell::new(447), 57);
        }
        store.place(id("D4"), Cell::new(441), 51);
        let mut s = session_at(store, 4);

        s.roll_with(p(4), 6).unwrap();
        let moved = s.request_move(p(4), id("D4")).unwrap();
        assert_eq!(moved.winner, Some(p(4)));
        assert_eq!(moved.next_player, None);
        assert!(!moved.extra_turn);
        assert_eq!(s.winner(), Some(p(4)));
        assert_eq!(s.roll_dice(p(4)), Err(Rejected::GameFinished));
        assert_eq!(s.roll_dice(p(1)), Err(Rejected::GameFinished));
    }

    #[test]
    fn test_stepwise_move_is_observable_and_locked() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(10), 10);
        let mut s = session_at(store, 1);
        s.roll_with(p(1), 3).unwrap();

        s.begin_move(p(1), id("A1")).unwrap();
        assert!(s.is_input_locked());
        assert_eq!(s.pieces(p(1))[0].position, Cell::new(10));
        assert_eq!(s.roll_dice(p(1)), Err(Rejected::InputLocked));
        assert_eq!(s.request_move(p(1), id("A1")), Err(Rejected::InputLocked));

        assert_eq!(s.step_move(), Ok(Some(Cell::new(11))));
        assert_eq!(s.pieces(p(1))[0].position, Cell::new(11));
        assert_eq!(s.pieces(p(1))[0].travel_count, 11);

        let outcome = s.finish_move().unwrap();
        assert_eq!(outcome.path.as_slice(), &[Cell::new(11), Cell::new(12), Cell::new(13)]);
        assert!(!s.is_input_locked());
        assert_eq!(s.step_move(), Err(Rejected::NoMoveInFlight));
    }

    #[test]
    fn test_two_phase_roll_locks_input() {
        let mut s = session(4);
        let face = s.begin_roll(p(1)).unwrap();
        assert!(s.is_input_locked());
        assert_eq!(s.dice_value(), face);
        assert_eq!(s.roll_dice(p(1)), Err(Rejected::InputLocked));

        s.commit_roll().unwrap();
        assert!(!s.is_input_locked());
        assert_eq!(s.commit_roll(), Err(Rejected::NoRollInFlight));
    }

    #[test]
    fn test_invalid_face() {
        let mut s = session(4);
        assert_eq!(s.roll_with(p(1), 0), Err(Rejected::InvalidFace(0)));
        assert_eq!(s.roll_with(p(1), 7), Err(Rejected::InvalidFace(7)));
    }

    #[test]
    fn test_rotation_skips_unseated_players() {
        let mut s = session(2);
        s.roll_with(p(1), 2).unwrap();
        assert_eq!(s.active_player(), p(2));
        s.roll_with(p(2), 2).unwrap();
        assert_eq!(s.active_player(), p(1));
    }

    #[test]
    fn test_automated_and_manual_seats_are_exclusive() {
        let config = SessionConfig::new(2)
            .with_seed(5)
            .with_cheat(CheatConfig::favoring(p(1)));
        let mut s = Session::start(config).unwrap();
        s.roll_with(p(1), 6).unwrap();
        assert_eq!(s.request_move(p(1), id("A1")), Err(Rejected::AutomatedSeat(p(1))));

        let auto = s.auto_move(p(1)).unwrap();
        assert_eq!(auto.choice.piece, id("A1"));
        let think = auto.choice.think_time.unwrap();
        assert!(think >= Duration::from_millis(700) && think <= Duration::from_millis(1500));

        let mut manual = session(4);
        manual.roll_with(p(1), 6).unwrap();
        assert_eq!(manual.auto_move(p(1)).map(|m| m.outcome), Err(Rejected::ManualSeat(p(1))));
    }

    #[test]
    fn test_rejected_auto_move_draws_no_randomness() {
        use crate::core::RandomSource;

        let config = SessionConfig::new(2)
            .with_seed(5)
            .with_cheat(CheatConfig::favoring(p(1)));
        let mut s = Session::start(config).unwrap();
        let before = s.rng().clone();

        assert_eq!(s.begin_auto_move(p(1)), Err(Rejected::NotRolled));
        s.roll_with(p(1), 6).unwrap();
        assert!(matches!(s.begin_auto_move(p(2)), Err(Rejected::NotYourTurn { .. })));
        assert_eq!(s.turn_state(), &TurnState::AwaitingMove { player: p(1), dice: 6 });

        let mut expected = before;
        let mut actual = s.rng().clone();
        let draws = |rng: &mut GameRng| (0..8).map(|_| rng.below(1000)).collect::<Vec<_>>();
        assert_eq!(draws(&mut actual), draws(&mut expected));
    }

    #[test]
    fn test_history_records_turns_and_sequences() {
        let mut s = session(4);
        s.roll_with(p(1), 6).unwrap();
        s.request_move(p(1), id("A1")).unwrap();
        s.roll_with(p(1), 2).unwrap();
        s.request_move(p(1), id("A1")).unwrap();
        s.roll_with(p(2), 5).unwrap();

        let history: Vec<_> = s.history().iter().copied().collect();
        assert_eq!(history.len(), 6);
        assert_eq!((history[0].turn, history[0].sequence), (1, 0));
        assert_eq!((history[1].turn, history[1].sequence), (1, 1));
        assert!(history[1].action.is_move());
        assert_eq!((history[2].turn, history[2].sequence), (2, 0));
        assert_eq!(
            history[3].action,
            Action::Move {
                piece: id("A1"),
                from: Cell::new(1),
                to: Cell::new(3),
                captured: None,
            }
        );
        assert_eq!(history[4].player, p(2));
        assert_eq!((history[4].turn, history[4].sequence), (3, 0));
        assert_eq!(history[5].action, Action::Pass { face: 5 });
        assert_eq!((history[5].turn, history[5].sequence), (3, 1));
    }

    #[test]
    fn test_reset_preserves_settings() {
        let config = SessionConfig::new(3)
            .with_seed(9)
            .with_names(["Ana", "", "Cy"])
            .with_cheat(CheatConfig::favoring(p(2)));
        let mut s = Session::start(config).unwrap();
        s.roll_with(p(1), 6).unwrap();

        let state = s.reset();
        assert_eq!(state.player_count, 3);
        assert_eq!(state.names[0], "Ana");
        assert_eq!(state.names[1], "Player 2");
        assert_eq!(state.cheat, CheatConfig::favoring(p(2)));
        assert_eq!(state.active_player, p(1));
        assert_eq!(state.dice_value, 0);
        assert_eq!(state.history_len, 0);
        assert_eq!(state.pieces, PieceStore::new());
    }

    #[test]
    fn test_set_cheat_config_validates() {
        let mut s = session(4);
        let bad = CheatConfig {
            enabled: true,
            favored_player: 9,
        };
        assert!(s.set_cheat_config(bad).is_err());
        assert_eq!(s.cheat_config(), &CheatConfig::disabled());

        s.set_cheat_config(CheatConfig::favoring(p(3))).unwrap();
        assert_eq!(s.seat_role(p(3)), SeatRole::Favored);
        assert_eq!(s.seat_role(p(1)), SeatRole::Disfavored);
    }

    #[test]
    fn test_from_position_validates_store() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(116), 57);
        assert!(Session::from_position(SessionConfig::new(4), store, p(1)).is_err());

        assert!(Session::from_position(SessionConfig::new(2), PieceStore::new(), p(3)).is_err());
    }

    #[test]
    fn test_from_position_rejects_pieces_off_their_route() {
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(116), 40);
        let err = Session::from_position(SessionConfig::new(4), store, p(1)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err}");

        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(221), 51);
        assert!(Session::from_position(SessionConfig::new(4), store, p(1)).is_err());

        // The same piece on its own route plays on to the terminal.
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(116), 56);
        let mut s = Session::from_position(SessionConfig::new(4).with_seed(1), store, p(1)).unwrap();
        s.roll_with(p(1), 1).unwrap();
        let outcome = s.request_move(p(1), id("A1")).unwrap();
        assert_eq!(outcome.resting_cell, Cell::new(117));
        assert!(outcome.reached_terminal);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut s = session(4);
        s.roll_with(p(1), 6).unwrap();
        let state = s.snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
