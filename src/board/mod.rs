//! Board geometry and the derived occupancy index.

pub mod occupancy;
pub mod topology;

pub use occupancy::{Occupancy, Occupants};
pub use topology::{
    Cell, Topology, ENTRY_FACE, HOME_LANE_LEN, TERMINAL_TRAVEL, TRACK_LEN, WRAP_CELL,
};
