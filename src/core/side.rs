//! Seat identification and per-seat data storage.
//!
//! ## Side
//!
//! The game always has exactly two seats: the human `Player` and the `Ai`.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for scores and any other
//! value the session tracks once per seat.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human seat (or the mirrored seat in AI-vs-AI play).
    #[default]
    Player,
    /// The computer seat.
    Ai,
}

impl Side {
    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Slot index (Player = 0, Ai = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Ai => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use trunfo::core::{Side, SideMap};
///
/// let mut score: SideMap<u32> = SideMap::default();
/// score[Side::Ai] += 1;
///
/// assert_eq!(score[Side::Player], 0);
/// assert_eq!(score[Side::Ai], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from explicit values.
    pub fn new(player: T, ai: T) -> Self {
        Self { data: [player, ai] }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
