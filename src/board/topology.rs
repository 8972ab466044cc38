//! Static board geometry.
//!
//! ## Cell numbering
//!
//! - `0`: the pocket (piece not yet entered)
//! - `1..=52`: the shared circular track; stepping past 52 wraps to 1
//! - `s * 110 + 1 ..= s * 110 + 6`: the private home lane of seat `s`
//! - `s * 110 + 7`: the terminal cell of seat `s`
//!
//! Every seat walks 50 shared cells, turns into its home lane at its
//! turning point, and reaches its terminal after exactly 57 steps, so
//! `position == terminal` holds iff `travel_count == 57`.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Number of cells on the shared track.
pub const TRACK_LEN: u16 = 52;

/// Cell one past the last shared cell; stepping onto it wraps to cell 1.
pub const WRAP_CELL: u16 = TRACK_LEN + 1;

/// Cells in each private home lane, not counting the terminal.
pub const HOME_LANE_LEN: u16 = 6;

/// Travel count of a piece resting on its terminal cell.
pub const TERMINAL_TRAVEL: u8 = 57;

/// The only face that lets a piece leave its pocket.
pub const ENTRY_FACE: u8 = 6;

/// A board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u16);

impl Cell {
    /// The pocket, where pieces wait before entering.
    pub const POCKET: Cell = Cell(0);

    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_pocket(self) -> bool {
        self.0 == 0
    }

    /// Whether this cell is on the shared track.
    #[must_use]
    pub const fn is_track(self) -> bool {
        self.0 >= 1 && self.0 <= TRACK_LEN
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_pocket() {
            write!(f, "pocket")
        } else {
            write!(f, "cell {}", self.0)
        }
    }
}

/// Board layout: entry cells, turning points, home lanes and immune cells.
///
/// The safe and star sets have identical rules effect (capture immunity);
/// they are kept apart so a renderer can treat them differently.
///
/// ```
/// use ludo_engine::board::{Cell, Topology};
/// use ludo_engine::core::PlayerId;
///
/// let board = Topology::standard();
/// let seat = PlayerId::new(1);
///
/// assert_eq!(board.entry_cell(seat), Cell::new(1));
/// // Seat 1 turns into its home lane instead of stepping onto cell 51.
/// assert_eq!(board.next_cell(seat, Cell::new(50)), Cell::new(111));
/// // Everyone else wraps around the end of the track.
/// assert_eq!(board.next_cell(PlayerId::new(2), Cell::new(52)), Cell::new(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    entry_cells: [Cell; 4],
    turning_points: [Cell; 4],
    home_entries: [Cell; 4],
    safe_cells: Vec<Cell>,
    star_cells: Vec<Cell>,
}

impl Default for Topology {
    fn default() -> Self {
        Self::standard()
    }
}

impl Topology {
    /// The four-seat layout.
    #[must_use]
    pub fn standard() -> Self {
        let entry_cells = [Cell(1), Cell(14), Cell(27), Cell(40)];
        Self {
            entry_cells,
            turning_points: [Cell(51), Cell(12), Cell(25), Cell(38)],
            home_entries: [Cell(111), Cell(221), Cell(331), Cell(441)],
            safe_cells: entry_cells.to_vec(),
            star_cells: vec![Cell(9), Cell(22), Cell(35), Cell(48)],
        }
    }

    /// Cell a piece occupies right after leaving the pocket.
    #[must_use]
    pub fn entry_cell(&self, player: PlayerId) -> Cell {
        self.entry_cells[player.index()]
    }

    /// Track cell at which `player` diverges into its home lane.
    #[must_use]
    pub fn turning_point(&self, player: PlayerId) -> Cell {
        self.turning_points[player.index()]
    }

    /// First cell of the home lane of `player`.
    #[must_use]
    pub fn home_entry(&self, player: PlayerId) -> Cell {
        self.home_entries[player.index()]
    }

    /// Finishing cell of `player`.
    #[must_use]
    pub fn terminal(&self, player: PlayerId) -> Cell {
        Cell(self.home_entry(player).0 + HOME_LANE_LEN)
    }

    /// Whether `cell` belongs to the home lane (or terminal) of `player`.
    #[must_use]
    pub fn is_home_lane(&self, player: PlayerId, cell: Cell) -> bool {
        let start = self.home_entry(player).0;
        (start..=start + HOME_LANE_LEN).contains(&cell.0)
    }

    #[must_use]
    pub fn safe_cells(&self) -> &[Cell] {
        &self.safe_cells
    }

    #[must_use]
    pub fn star_cells(&self) -> &[Cell] {
        &self.star_cells
    }

    #[must_use]
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe_cells.contains(&cell)
    }

    #[must_use]
    pub fn is_star(&self, cell: Cell) -> bool {
        self.star_cells.contains(&cell)
    }

    /// Capture immunity: safe or star.
    #[must_use]
    pub fn is_immune(&self, cell: Cell) -> bool {
        self.is_safe(cell) || self.is_star(cell)
    }

    /// The cell one step ahead of `from` for a piece of `player`.
    ///
    /// Turning points divert into the player's home lane; the wrap cell
    /// folds back to cell 1. Callers must not step a pocketed or finished
    /// piece.
    #[must_use]
    pub fn next_cell(&self, player: PlayerId, from: Cell) -> Cell {
        debug_assert!(!from.is_pocket(), "pocketed pieces do not step");
        debug_assert!(from != self.terminal(player), "finished pieces do not step");

        let mut next = Cell(from.0 + 1);
        if next == self.turning_point(player) {
            next = self.home_entry(player);
        }
        if next.0 == WRAP_CELL {
            next = Cell(1);
        }
        next
    }

    /// The only cell a piece of `player` can occupy with `travel` steps
    /// behind it: the pocket at 0, the entry cell at 1, the terminal at 57.
    /// `None` beyond the terminal.
    #[must_use]
    pub fn cell_at_travel(&self, player: PlayerId, travel: u8) -> Option<Cell> {
        if travel == 0 {
            return Some(Cell::POCKET);
        }
        if travel > TERMINAL_TRAVEL {
            return None;
        }
        let mut cell = self.entry_cell(player);
        for _ in 1..travel {
            cell = self.next_cell(player, cell);
        }
        Some(cell)
    }
}
