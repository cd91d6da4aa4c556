//! Hex grid module - coordinate space and adjacency
//!
//! Coordinates use the "even-q" offset scheme: `q` is the column, `r` the row,
//! and even columns are shifted half a hex down relative to odd columns.
//! Because of that shift the bottom row only exists in odd columns.
//!
//! Neighbor lookups never bounds-check; callers validate with [`HexCoord::is_valid`].

use arrayvec::ArrayVec;

use crate::types::{HexDirection, NUM_COLUMNS, NUM_ROWS};

/// Up to six neighbor coordinates, clockwise from the top
pub type HexNeighbors = ArrayVec<HexCoord, 6>;

/// Column/row position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Whether the coordinate addresses a real tile slot.
    ///
    /// ```
    /// use hexic_core::HexCoord;
    ///
    /// assert!(HexCoord::new(1, 8).is_valid());
    /// assert!(!HexCoord::new(2, 8).is_valid());
    /// assert!(!HexCoord::new(-1, 0).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        if self.q < 0 || self.r < 0 {
            return false;
        }
        if self.q >= NUM_COLUMNS as i32 || self.r >= NUM_ROWS as i32 {
            return false;
        }
        !(self.r == NUM_ROWS as i32 - 1 && self.q_is_even())
    }

    #[inline(always)]
    pub fn q_is_even(&self) -> bool {
        self.q & 1 == 0
    }

    /// Coordinate of one neighbor. May be off the board.
    pub fn neighbor(&self, direction: HexDirection) -> HexCoord {
        let (q, r) = (self.q, self.r);
        let q_odd = !self.q_is_even();
        match direction {
            HexDirection::Top => HexCoord::new(q, r - 1),
            HexDirection::TopRight => HexCoord::new(q + 1, if q_odd { r - 1 } else { r }),
            HexDirection::BottomRight => HexCoord::new(q + 1, if q_odd { r } else { r + 1 }),
            HexDirection::Bottom => HexCoord::new(q, r + 1),
            HexDirection::BottomLeft => HexCoord::new(q - 1, if q_odd { r } else { r + 1 }),
            HexDirection::TopLeft => HexCoord::new(q - 1, if q_odd { r - 1 } else { r }),
        }
    }

    /// Neighbors selected by `mask`, clockwise starting at the top.
    ///
    /// Bit `i` of the mask selects `HexDirection::from_index(i)`. The result may
    /// contain off-board coordinates.
    pub fn neighbors(&self, mask: u8) -> HexNeighbors {
        let mut out = HexNeighbors::new();
        for direction in HexDirection::ALL {
            if mask & direction.bit() != 0 {
                out.push(self.neighbor(direction));
            }
        }
        out
    }

    /// All six neighbors in clockwise order.
    pub fn ring(&self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|d| self.neighbor(d))
    }

    /// Position of this slot inside its column stack (0 = bottom).
    #[inline(always)]
    pub fn stack_index(&self) -> usize {
        NUM_ROWS - self.r as usize - 1
    }

    /// Inverse of [`HexCoord::stack_index`].
    #[inline(always)]
    pub fn from_stack(q: usize, stack_index: usize) -> Self {
        HexCoord::new(q as i32, (NUM_ROWS - stack_index - 1) as i32)
    }

    /// Every valid coordinate, column by column, top to bottom.
    pub fn all_valid() -> impl Iterator<Item = HexCoord> {
        (0..NUM_COLUMNS as i32)
            .flat_map(|q| (0..NUM_ROWS as i32).map(move |r| HexCoord::new(q, r)))
            .filter(HexCoord::is_valid)
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}
