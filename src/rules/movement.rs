//! Movement engine.
//!
//! Two layers:
//! - [`walk`] is the pure step function: where does a piece end up after
//!   `n` steps, and which cells does it pass? Instant and side-effect free.
//! - [`enter`], [`advance`] and [`step`] apply movement to the piece store.
//!   `advance` is exactly `dice` calls to `step`, so a host that plays the
//!   steps back one by one sees the same cells `walk` predicts.
//!
//! All validation happens before the first mutation; a rejected move
//! leaves the store untouched.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Cell, Topology, ENTRY_FACE, TERMINAL_TRAVEL};
use crate::core::{PieceId, PieceStore, PlayerId, Rejected};

/// Cells visited by one move, in order. Six covers the longest move.
pub type Path = SmallVec<[Cell; 6]>;

/// How a piece leaves its current cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// From the pocket onto the entry cell.
    Enter,
    /// Along the track / home lane by the dice value.
    Advance,
}

/// Result of the pure step function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    pub path: Path,
    pub resting_cell: Cell,
    pub travel_count: u8,
}

/// Result of an applied movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Moved {
    pub piece: PieceId,
    pub kind: MoveKind,
    pub from: Cell,
    pub resting_cell: Cell,
    pub travel_count: u8,
    pub reached_terminal: bool,
    pub path: Path,
}

/// Where a piece at `from` with `travel` ends up after `steps` steps.
///
/// ```
/// use ludo_engine::board::{Cell, Topology};
/// use ludo_engine::core::PlayerId;
/// use ludo_engine::rules::walk;
///
/// let board = Topology::standard();
/// let w = walk(&board, PlayerId::new(1), Cell::new(49), 49, 4);
/// assert_eq!(w.path.as_slice(), &[Cell::new(50), Cell::new(111), Cell::new(112), Cell::new(113)]);
/// assert_eq!(w.travel_count, 53);
/// ```
#[must_use]
pub fn walk(topology: &Topology, player: PlayerId, from: Cell, travel: u8, steps: u8) -> Walk {
    let mut path = Path::new();
    let mut cell = from;
    for _ in 0..steps {
        cell = topology.next_cell(player, cell);
        path.push(cell);
    }
    Walk {
        path,
        resting_cell: cell,
        travel_count: travel + steps,
    }
}

fn check_owner(player: PlayerId, piece: PieceId) -> Result<(), Rejected> {
    if piece.owner() != player {
        return Err(Rejected::NotOwned { piece, player });
    }
    Ok(())
}

/// Check that `piece` may leave its pocket with `dice`.
pub fn validate_enter(
    store: &PieceStore,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<(), Rejected> {
    check_owner(player, piece)?;
    let current = store.get(piece);
    if current.is_finished() {
        return Err(Rejected::AlreadyFinished(piece));
    }
    if !current.is_pocketed() {
        return Err(Rejected::NotInPocket(piece));
    }
    if dice != ENTRY_FACE {
        return Err(Rejected::WrongDiceForEntry { piece, dice });
    }
    Ok(())
}

/// Check that `piece` may advance by `dice` without overshooting.
pub fn validate_advance(
    store: &PieceStore,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<(), Rejected> {
    check_owner(player, piece)?;
    let current = store.get(piece);
    if current.is_finished() {
        return Err(Rejected::AlreadyFinished(piece));
    }
    if current.is_pocketed() {
        return Err(Rejected::InPocket(piece));
    }
    if current.travel_count.saturating_add(dice) > TERMINAL_TRAVEL {
        return Err(Rejected::Overshoot {
            piece,
            travel: current.travel_count,
            dice,
        });
    }
    Ok(())
}

/// Validate whichever move `piece` would make with `dice`: entering when
/// pocketed, advancing otherwise.
pub fn validate_move(
    store: &PieceStore,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<MoveKind, Rejected> {
    check_owner(player, piece)?;
    if store.get(piece).is_pocketed() {
        validate_enter(store, player, piece, dice).map(|()| MoveKind::Enter)
    } else {
        validate_advance(store, player, piece, dice).map(|()| MoveKind::Advance)
    }
}

/// Put a pocketed piece on its entry cell with travel count 1.
///
/// No validation; call [`validate_enter`] first.
pub fn place_on_entry(store: &mut PieceStore, topology: &Topology, piece: PieceId) -> Cell {
    let cell = topology.entry_cell(piece.owner());
    store.place(piece, cell, 1);
    cell
}

/// Move `piece` one cell forward and bump its travel count.
///
/// No validation; the caller guarantees the piece is in play and that the
/// step does not pass the terminal.
pub fn step(store: &mut PieceStore, topology: &Topology, piece: PieceId) -> Cell {
    let current = *store.get(piece);
    debug_assert!(current.is_in_play(), "{piece} cannot step from {}", current.position);

    let next = topology.next_cell(piece.owner(), current.position);
    store.place(piece, next, current.travel_count + 1);
    next
}

/// Leave the pocket. Legal only with a 6 on a pocketed piece.
pub fn enter(
    store: &mut PieceStore,
    topology: &Topology,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<Moved, Rejected> {
    validate_enter(store, player, piece, dice)?;

    let cell = place_on_entry(store, topology, piece);
    let mut path = Path::new();
    path.push(cell);
    Ok(Moved {
        piece,
        kind: MoveKind::Enter,
        from: Cell::POCKET,
        resting_cell: cell,
        travel_count: 1,
        reached_terminal: false,
        path,
    })
}

/// Advance an on-board piece by `dice` steps, one step at a time.
pub fn advance(
    store: &mut PieceStore,
    topology: &Topology,
    player: PlayerId,
    piece: PieceId,
    dice: u8,
) -> Result<Moved, Rejected> {
    validate_advance(store, player, piece, dice)?;

    let from = store.get(piece).position;
    let mut path = Path::new();
    for _ in 0..dice {
        path.push(step(store, topology, piece));
    }

    let landed = store.get(piece);
    Ok(Moved {
        piece,
        kind: MoveKind::Advance,
        from,
        resting_cell: landed.position,
        travel_count: landed.travel_count,
        reached_terminal: landed.is_finished(),
        path,
    })
}

/// Pieces of `player` that have a legal move with `dice`.
#[must_use]
pub fn legal_moves(store: &PieceStore, player: PlayerId, dice: u8) -> SmallVec<[PieceId; 4]> {
    store
        .pieces(player)
        .iter()
        .filter(|p| p.can_advance(dice) || p.can_enter(dice))
        .map(|p| p.id)
        .collect()
}

/// Whether `player` can do anything with `dice`.
#[must_use]
pub fn has_legal_move(store: &PieceStore, player: PlayerId, dice: u8) -> bool {
    store
        .pieces(player)
        .iter()
        .any(|p| p.can_advance(dice) || p.can_enter(dice))
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

    #[test]
    fn test_enter_requires_six() {
        let board = Topology::standard();
        let mut store = PieceStore::new();

        let err = enter(&mut store, &board, p(2), id("B1"), 5).unwrap_err();
        assert_eq!(err, Rejected::WrongDiceForEntry { piece: id("B1"), dice: 5 });
        assert!(store.get(id("B1")).is_pocketed());

        let moved = enter(&mut store, &board, p(2), id("B1"), 6).unwrap();
        assert_eq!(moved.resting_cell, Cell::new(14));
        assert_eq!(moved.travel_count, 1);
        assert_eq!(moved.from, Cell::POCKET);
        assert_eq!(store.get(id("B1")).position, Cell::new(14));
    }

    #[test]
    fn test_enter_rejects_piece_on_board() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(5), 5);

        assert_eq!(
            enter(&mut store, &board, p(1), id("A1"), 6),
            Err(Rejected::NotInPocket(id("A1")))
        );
    }

    #[test]
    fn test_not_owned() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("C1"), Cell::new(30), 4);

        assert_eq!(
            advance(&mut store, &board, p(1), id("C1"), 2),
            Err(Rejected::NotOwned { piece: id("C1"), player: p(1) })
        );
        assert_eq!(store.get(id("C1")).position, Cell::new(30));
    }

    #[test]
    fn test_advance_reaches_terminal_exactly() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(114), 54);

        let moved = advance(&mut store, &board, p(1), id("A1"), 3).unwrap();
        assert_eq!(moved.travel_count, 57);
        assert_eq!(moved.resting_cell, board.terminal(p(1)));
        assert!(moved.reached_terminal);
        assert_eq!(moved.path.as_slice(), &[Cell::new(115), Cell::new(116), Cell::new(117)]);
    }

    #[test]
    fn test_advance_overshoot_is_rejected_without_side_effects() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("A1"), Cell::new(115), 55);
        let before = store.clone();

        let err = advance(&mut store, &board, p(1), id("A1"), 4).unwrap_err();
        assert_eq!(err, Rejected::Overshoot { piece: id("A1"), travel: 55, dice: 4 });
        assert_eq!(store, before);
    }

    #[test]
    fn test_advance_rejects_pocket_and_finished() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("D4"), Cell::new(447), 57);

        assert_eq!(
            advance(&mut store, &board, p(4), id("D1"), 3),
            Err(Rejected::InPocket(id("D1")))
        );
        assert_eq!(
            advance(&mut store, &board, p(4), id("D4"), 1),
            Err(Rejected::AlreadyFinished(id("D4")))
        );
    }

    #[test]
    fn test_advance_wraps_and_turns() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        // Seat 3 enters at 27, so cell 50 is travel 24.
        store.place(id("C1"), Cell::new(50), 24);

        let moved = advance(&mut store, &board, p(3), id("C1"), 5).unwrap();
        assert_eq!(
            moved.path.as_slice(),
            &[Cell::new(51), Cell::new(52), Cell::new(1), Cell::new(2), Cell::new(3)]
        );
        assert_eq!(moved.travel_count, 29);
    }

    #[test]
    fn test_stepwise_matches_walk() {
        let board = Topology::standard();
        let mut store = PieceStore::new();
        store.place(id("B2"), Cell::new(9), 48);

        let predicted = walk(&board, p(2), Cell::new(9), 48, 6);
        let moved = advance(&mut store, &board, p(2), id("B2"), 6).unwrap();

        assert_eq!(moved.path, predicted.path);
        assert_eq!(moved.resting_cell, predicted.resting_cell);
        assert_eq!(moved.travel_count, predicted.travel_count);
        assert_eq!(moved.resting_cell, Cell::new(224));
    }

    #[test]
    fn test_validate_move_dispatch() {
        let mut store = PieceStore::new();
        store.place(id("A2"), Cell::new(10), 10);

        assert_eq!(validate_move(&store, p(1), id("A1"), 6), Ok(MoveKind::Enter));
        assert_eq!(validate_move(&store, p(1), id("A2"), 6), Ok(MoveKind::Advance));
        assert!(validate_move(&store, p(1), id("A1"), 3).is_err());
    }

    #[test]
    fn test_legal_moves() {
        let mut store = PieceStore::new();
        assert!(!has_legal_move(&store, p(1), 5));
        assert_eq!(legal_moves(&store, p(1), 6).len(), 4);

        store.place(id("A1"), Cell::new(20), 20);
        store.place(id("A2"), Cell::new(115), 55);
        store.place(id("A3"), Cell::new(117), 57);

        let moves = legal_moves(&store, p(1), 3);
        assert_eq!(moves.as_slice(), &[id("A1")]);

        let moves = legal_moves(&store, p(1), 2);
        assert_eq!(moves.as_slice(), &[id("A1"), id("A2")]);

        let moves = legal_moves(&store, p(1), 6);
        assert_eq!(moves.as_slice(), &[id("A1"), id("A4")]);
    }
}
