//! Per-tick scratch storage
//!
//! Match searches need a visited grid, an explicit DFS stack, and somewhere to
//! collect coordinates. All of it lives here and is cleared (not freed) at the
//! end of every tick, so steady-state ticks never touch the allocator.

use crate::hex::HexCoord;
use crate::types::{BOARD_SIZE, NUM_COLUMNS, NUM_ROWS};

#[derive(Debug, Clone)]
pub struct ScratchArena {
    in_cluster: [[bool; NUM_ROWS]; NUM_COLUMNS],
    pub(crate) dfs_stack: Vec<HexCoord>,
    /// Coordinates of the match currently being handled.
    pub(crate) matched: Vec<HexCoord>,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self {
            in_cluster: [[false; NUM_ROWS]; NUM_COLUMNS],
            dfs_stack: Vec::with_capacity(BOARD_SIZE),
            matched: Vec::with_capacity(BOARD_SIZE),
        }
    }

    #[inline]
    pub(crate) fn in_cluster(&self, coord: HexCoord) -> bool {
        self.in_cluster[coord.q as usize][coord.r as usize]
    }

    #[inline]
    pub(crate) fn mark_in_cluster(&mut self, coord: HexCoord) {
        self.in_cluster[coord.q as usize][coord.r as usize] = true;
    }

    pub(crate) fn clear_in_cluster(&mut self) {
        self.in_cluster = [[false; NUM_ROWS]; NUM_COLUMNS];
    }

    /// Drop everything collected this tick, keeping capacity.
    pub fn reset(&mut self) {
        self.clear_in_cluster();
        self.dfs_stack.clear();
        self.matched.clear();
    }

    /// Whether nothing is held over from a previous tick
    pub fn is_clear(&self) -> bool {
        self.dfs_stack.is_empty()
            && self.matched.is_empty()
            && self.in_cluster.iter().flatten().all(|v| !v)
    }
}

impl Default for ScratchArena {
    fn default() -> Self {
        Self::new()
    }
}
