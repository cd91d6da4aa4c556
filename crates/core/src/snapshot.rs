//! Snapshot module - read-only view of a game for observers
//!
//! Snapshots are plain data and serialize with serde, so a driver can dump
//! them as JSON. `GameState::snapshot_into` refills an existing snapshot
//! without reallocating once its tile list has grown to board size.

use serde::Serialize;

use crate::board::Tile;
use crate::hex::HexCoord;
use crate::types::{CursorPos, BOARD_SIZE, NUM_COLUMNS, NUM_ROWS};

/// Type codes row by row; 0 marks an invalid slot (see `HexType::as_u8`).
pub type CodeGrid = [[u8; NUM_COLUMNS]; NUM_ROWS];

/// FNV-1a 64-bit hash of a code grid, row-major.
pub fn board_hash(grid: &CodeGrid) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in grid.iter().flatten() {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CursorSnapshot {
    pub q: i32,
    pub r: i32,
    pub position: &'static str,
}

impl Default for CursorSnapshot {
    fn default() -> Self {
        Self {
            q: 0,
            r: 0,
            position: CursorPos::Left.as_str(),
        }
    }
}

/// What the presentation layer needs to draw one tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileView {
    pub q: i32,
    pub r: i32,
    pub kind: &'static str,
    pub multiplier: bool,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub alpha: f64,
    pub rotation_angle: f64,
}

impl TileView {
    pub fn new(coord: HexCoord, x: f64, tile: &Tile) -> Self {
        Self {
            q: coord.q,
            r: coord.r,
            kind: tile.kind.code(),
            multiplier: tile.multiplier,
            x,
            y: tile.y,
            scale: tile.scale,
            alpha: tile.alpha,
            rotation_angle: tile.rotation_angle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board: CodeGrid,
    pub board_hash: u64,
    pub cursor: CursorSnapshot,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub combos_remaining: u32,
    pub now_ms: u64,
    pub rotating: bool,
    pub quiescent: bool,
    pub tiles: Vec<TileView>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; NUM_COLUMNS]; NUM_ROWS];
        self.board_hash = board_hash(&self.board);
        self.cursor = CursorSnapshot::default();
        self.seed = 0;
        self.score = 0;
        self.level = 0;
        self.combos_remaining = 0;
        self.now_ms = 0;
        self.rotating = false;
        self.quiescent = false;
        self.tiles.clear();
    }

    /// Type code at `coord`, or 0 for invalid slots
    pub fn code_at(&self, coord: HexCoord) -> u8 {
        if !coord.is_valid() {
            return 0;
        }
        self.board[coord.r as usize][coord.q as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; NUM_COLUMNS]; NUM_ROWS],
            board_hash: 0,
            cursor: CursorSnapshot::default(),
            seed: 0,
            score: 0,
            level: 0,
            combos_remaining: 0,
            now_ms: 0,
            rotating: false,
            quiescent: false,
            tiles: Vec::with_capacity(BOARD_SIZE),
        };
        s.clear();
        s
    }
}
