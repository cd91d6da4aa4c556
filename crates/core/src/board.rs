//! Board module - per-column tile stacks
//!
//! Each column is a stack of tiles, index 0 at the bottom of the board.
//! A slot's row is `NUM_ROWS - stack_index - 1`, so lookups stay O(1) while
//! clearing a match is just removing tiles from their stacks and pushing new
//! ones on top.
//!
//! Even columns have no bottom-row slot. Their stack keeps an invalid
//! placeholder tile at index 0 so every full column holds `NUM_ROWS` entries.

use std::fmt;

use crate::hex::HexCoord;
use crate::layout::Layout;
use crate::rng::SimpleRng;
use crate::types::{
    HexType, INITIAL_FALL_STAGGER_MS, LEVEL_HEX_TYPE_MASK, MAX_NUM_LEVELS,
    MULTIPLIER_CHANCE_PERCENT, MULTIPLIER_MIN_LEVEL, NUM_COLUMNS, NUM_ROWS,
    RESPAWN_FALL_STAGGER_MS,
};

/// Which match animation a tile is fading out with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeKind {
    Flower,
    Cluster,
}

/// In-flight fade of a matched tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub kind: FadeKind,
    pub start_ms: u64,
    /// Set once the fade has run its full duration.
    pub done: bool,
}

/// A single hex tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: HexType,
    /// Basic tiles may carry a score multiplier.
    pub multiplier: bool,
    pub is_valid: bool,

    // Per-resolution-pass markers.
    pub is_matched: bool,
    pub is_flower_matched: bool,
    /// Scheduled for removal once its fade completes.
    pub respawn: bool,

    // Animation state.
    pub is_rotating: bool,
    pub fade: Option<Fade>,
    pub scale: f64,
    pub alpha: f64,
    pub rotation_angle: f64,

    // Physics.
    pub y: f64,
    pub velocity: f64,
    pub is_stationary: bool,
    pub fall_start_ms: u64,
}

impl Tile {
    /// A stationary tile resting at `y`.
    pub fn at_rest(kind: HexType, y: f64) -> Self {
        Self {
            kind,
            multiplier: false,
            is_valid: true,
            is_matched: false,
            is_flower_matched: false,
            respawn: false,
            is_rotating: false,
            fade: None,
            scale: 1.0,
            alpha: 1.0,
            rotation_angle: 0.0,
            y,
            velocity: 0.0,
            is_stationary: true,
            fall_start_ms: 0,
        }
    }

    /// A tile waiting to fall from `y` once `fall_start_ms` is reached.
    pub fn falling(kind: HexType, multiplier: bool, y: f64, fall_start_ms: u64) -> Self {
        Self {
            multiplier,
            is_stationary: false,
            fall_start_ms,
            ..Self::at_rest(kind, y)
        }
    }

    /// Placeholder for the missing bottom slot of an even column.
    pub fn invalid(y: f64) -> Self {
        Self {
            is_valid: false,
            ..Self::at_rest(HexType::Green, y)
        }
    }

    /// Whether the tile may take part in a new match.
    ///
    /// Falling tiles only count when `require_stationary` is false (opening board rerolls).
    pub fn is_matchable(&self, require_stationary: bool) -> bool {
        self.is_valid
            && !self.is_matched
            && !self.respawn
            && !self.is_rotating
            && self.fade.is_none()
            && (!require_stationary || self.is_stationary)
    }

    /// Whether the tile has no pending motion or animation.
    pub fn is_settled(&self) -> bool {
        !self.is_valid
            || (self.is_stationary && !self.is_rotating && self.fade.is_none() && !self.respawn)
    }

    /// Clear the per-pass match markers.
    pub fn clear_is_matched(&mut self) {
        self.is_matched = false;
        self.is_flower_matched = false;
    }

    /// Put a new face on the tile.
    pub fn set_face(&mut self, kind: HexType, multiplier: bool) {
        self.kind = kind;
        self.multiplier = multiplier && kind.is_basic();
    }
}

/// The game board - one tile stack per column
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: [Vec<Tile>; NUM_COLUMNS],
    layout: Layout,
}

impl Board {
    /// Create a board with empty columns
    pub fn new(layout: Layout) -> Self {
        Self {
            columns: std::array::from_fn(|_| Vec::with_capacity(NUM_ROWS)),
            layout,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Tiles of column `q`, bottom first
    pub fn column(&self, q: usize) -> &[Tile] {
        &self.columns[q]
    }

    pub fn column_mut(&mut self, q: usize) -> &mut Vec<Tile> {
        &mut self.columns[q]
    }

    /// Whether every column holds all of its slots
    pub fn is_full(&self) -> bool {
        self.columns.iter().all(|c| c.len() == NUM_ROWS)
    }

    /// Tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is off the board. Callers validate coordinates first.
    #[inline]
    pub fn tile_at(&self, coord: HexCoord) -> &Tile {
        &self.columns[coord.q as usize][coord.stack_index()]
    }

    #[inline]
    pub fn tile_at_mut(&mut self, coord: HexCoord) -> &mut Tile {
        &mut self.columns[coord.q as usize][coord.stack_index()]
    }

    /// Tile at `coord` if the coordinate is valid and the slot is filled
    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        if !coord.is_valid() {
            return None;
        }
        self.columns[coord.q as usize]
            .get(coord.stack_index())
            .filter(|t| t.is_valid)
    }

    /// Type at `coord` if the slot holds a valid tile
    pub fn kind_at(&self, coord: HexCoord) -> Option<HexType> {
        self.get(coord).map(|t| t.kind)
    }

    /// Every valid tile with its coordinate, column by column
    pub fn tiles(&self) -> impl Iterator<Item = (HexCoord, &Tile)> {
        self.columns.iter().enumerate().flat_map(|(q, column)| {
            column
                .iter()
                .enumerate()
                .filter(|(_, t)| t.is_valid)
                .map(move |(i, t)| (HexCoord::from_stack(q, i), t))
        })
    }

    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.iter_mut())
            .filter(|t| t.is_valid)
    }

    /// Pick a type allowed at `level` (levels past the table use the last entry)
    pub fn random_type(rng: &mut SimpleRng, level: u32) -> HexType {
        let level = (level as usize).clamp(1, MAX_NUM_LEVELS);
        Self::random_type_with_mask(rng, LEVEL_HEX_TYPE_MASK[level])
    }

    /// Pick a type uniformly among the set bits of `mask`.
    ///
    /// # Panics
    ///
    /// Panics if `mask` selects no type.
    pub fn random_type_with_mask(rng: &mut SimpleRng, mask: u32) -> HexType {
        rng.pick_bit(mask)
            .and_then(HexType::from_index)
            .unwrap_or_else(|| panic!("type mask {mask:#x} selects no hex type"))
    }

    /// Roll a new face (type and multiplier flag) for `level`.
    pub fn random_face(rng: &mut SimpleRng, level: u32) -> (HexType, bool) {
        let kind = Self::random_type(rng, level);
        let multiplier = level >= MULTIPLIER_MIN_LEVEL
            && kind.is_basic()
            && rng.chance_percent(MULTIPLIER_CHANCE_PERCENT);
        (kind, multiplier)
    }

    /// Push a new tile on top of column `q`, falling in from above the board.
    ///
    /// An empty even column gets its invalid bottom placeholder instead.
    /// Returns whether a real tile was spawned.
    pub fn spawn(&mut self, q: usize, rng: &mut SimpleRng, level: u32, fall_start_ms: u64) -> bool {
        assert!(q < NUM_COLUMNS, "spawn column {q} out of range");
        let column = &mut self.columns[q];
        assert!(column.len() < NUM_ROWS, "spawn into full column {q}");

        let slot = HexCoord::from_stack(q, column.len());
        if !slot.is_valid() {
            column.push(Tile::invalid(self.layout.rest_y(slot)));
            return false;
        }

        let mut y = self.layout.spawn_y();
        if let Some(top) = column.last().filter(|t| t.is_valid) {
            y = y.min(top.y - self.layout.hex_h);
        }

        let (kind, multiplier) = Self::random_face(rng, level);
        column.push(Tile::falling(kind, multiplier, y, fall_start_ms));
        true
    }

    /// Fill every column from above, dropping in left to right, bottom to top.
    pub fn fill(&mut self, rng: &mut SimpleRng, level: u32, now_ms: u64) {
        let mut order = 0u64;
        for q in 0..NUM_COLUMNS {
            while self.columns[q].len() < NUM_ROWS {
                let start = now_ms + order * INITIAL_FALL_STAGGER_MS as u64;
                if self.spawn(q, rng, level, start) {
                    order += 1;
                }
            }
        }
    }

    /// Push a stationary tile onto column `q` at its resting slot.
    pub fn push_at_rest(&mut self, q: usize, kind: Option<HexType>) {
        let slot = HexCoord::from_stack(q, self.columns[q].len());
        let tile = match kind {
            Some(kind) if slot.is_valid() => Tile::at_rest(kind, self.layout.rest_y(slot)),
            _ => Tile::invalid(self.layout.rest_y(slot)),
        };
        self.columns[q].push(tile);
    }

    /// Remove the faded-out tiles of column `q` and refill it from the top.
    ///
    /// Tiles above a removed tile start falling immediately; the new tiles
    /// fall in one after another. Returns how many tiles were replaced.
    pub fn collapse_column(&mut self, q: usize, rng: &mut SimpleRng, level: u32, now_ms: u64) -> usize {
        let column = &mut self.columns[q];
        let before = column.len();

        let mut write = 0;
        for read in 0..before {
            let tile = column[read];
            let gone = tile.respawn && tile.fade.is_some_and(|f| f.done);
            if gone {
                continue;
            }
            if write != read {
                let moved = &mut column[write];
                *moved = tile;
                if moved.is_stationary {
                    moved.is_stationary = false;
                    moved.velocity = 0.0;
                    moved.fall_start_ms = now_ms;
                }
            }
            write += 1;
        }
        column.truncate(write);

        let removed = before - write;
        for i in 0..removed {
            let start = now_ms + (i as u64) * RESPAWN_FALL_STAGGER_MS as u64;
            self.spawn(q, rng, level, start);
        }
        removed
    }

    /// Clear the per-pass match markers on every tile
    pub fn clear_match_flags(&mut self) {
        for tile in self.tiles_mut() {
            tile.clear_is_matched();
        }
    }

    /// Whether every tile is at rest with no animation pending
    pub fn is_settled(&self) -> bool {
        self.is_full() && self.columns.iter().flatten().all(Tile::is_settled)
    }

    /// Whether any valid tile is still moving
    pub fn any_falling(&self) -> bool {
        self.columns
            .iter()
            .flatten()
            .any(|t| t.is_valid && !t.is_stationary)
    }
}

/// Board dump in fixture format (one row per line)
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..NUM_ROWS as i32 {
            for q in 0..NUM_COLUMNS as i32 {
                let code = self
                    .kind_at(HexCoord::new(q, r))
                    .map(|k| k.code())
                    .unwrap_or("XX");
                if q + 1 == NUM_COLUMNS as i32 {
                    writeln!(f, "{code},")?;
                } else {
                    write!(f, "{code}, ")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_board(seed: u32) -> Board {
        let mut board = Board::new(Layout::standard());
        let mut rng = SimpleRng::new(seed);
        board.fill(&mut rng, 1, 0);
        board
    }

    #[test]
    fn test_fill_places_placeholders() {
        let board = filled_board(3);
        assert!(board.is_full());
        for q in 0..NUM_COLUMNS {
            let bottom = board.column(q)[0];
            assert_eq!(bottom.is_valid, q % 2 == 1, "column {}", q);
            let valid = board.column(q).iter().filter(|t| t.is_valid).count();
            assert_eq!(valid, if q % 2 == 0 { NUM_ROWS - 1 } else { NUM_ROWS });
        }
    }

    #[test]
    fn test_fill_spawns_above_board_and_staggers() {
        let board = filled_board(3);
        let top_of_board = board.layout().board.y;
        let mut starts: Vec<u64> = Vec::new();
        for (_, tile) in board.tiles() {
            assert!(tile.y < top_of_board);
            assert!(!tile.is_stationary);
            starts.push(tile.fall_start_ms);
        }
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), starts.len());
    }

    #[test]
    fn test_level_one_never_spawns_magenta_or_multipliers() {
        let mut rng = SimpleRng::new(11);
        for _ in 0..1000 {
            let (kind, multiplier) = Board::random_face(&mut rng, 1);
            assert!(kind.is_basic());
            assert_ne!(kind, HexType::Magenta);
            assert!(!multiplier);
        }
    }

    #[test]
    fn test_random_type_with_mask() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..100 {
            let kind = Board::random_type_with_mask(&mut rng, crate::types::BLACK_PEARL_TYPE_MASK);
            assert!(kind.is_black_pearl());
        }
    }

    #[test]
    fn test_tile_at_translates_rows() {
        let mut board = Board::new(Layout::standard());
        for r in (0..NUM_ROWS).rev() {
            let kind = if r == 0 { HexType::Red } else { HexType::Blue };
            board.push_at_rest(1, Some(kind));
        }
        assert_eq!(board.tile_at(HexCoord::new(1, 0)).kind, HexType::Red);
        assert_eq!(board.tile_at(HexCoord::new(1, 8)).kind, HexType::Blue);
    }

    #[test]
    fn test_collapse_shifts_and_respawns() {
        let mut board = Board::new(Layout::standard());
        for _ in 0..NUM_ROWS {
            board.push_at_rest(1, Some(HexType::Blue));
        }
        let top = HexCoord::new(1, 0);
        board.tile_at_mut(top).kind = HexType::Red;

        let hit = HexCoord::new(1, 5);
        {
            let tile = board.tile_at_mut(hit);
            tile.respawn = true;
            tile.fade = Some(Fade {
                kind: FadeKind::Cluster,
                start_ms: 0,
                done: true,
            });
        }

        let mut rng = SimpleRng::new(1);
        let removed = board.collapse_column(1, &mut rng, 1, 500);
        assert_eq!(removed, 1);
        assert_eq!(board.column(1).len(), NUM_ROWS);

        // The old top tile moved down one slot and is now falling.
        let shifted = board.tile_at(HexCoord::new(1, 1));
        assert_eq!(shifted.kind, HexType::Red);
        assert!(!shifted.is_stationary);

        // Tiles below the hole did not move.
        assert!(board.tile_at(HexCoord::new(1, 8)).is_stationary);

        let fresh = board.tile_at(top);
        assert!(!fresh.is_stationary);
        assert_eq!(fresh.fall_start_ms, 500);
        assert!(fresh.y < board.layout().board.y);
    }

    #[test]
    fn test_collapse_keeps_fading_tiles() {
        let mut board = Board::new(Layout::standard());
        for _ in 0..NUM_ROWS {
            board.push_at_rest(3, Some(HexType::Green));
        }
        let tile = board.tile_at_mut(HexCoord::new(3, 4));
        tile.respawn = true;
        tile.fade = Some(Fade {
            kind: FadeKind::Flower,
            start_ms: 0,
            done: false,
        });
        let mut rng = SimpleRng::new(1);
        assert_eq!(board.collapse_column(3, &mut rng, 1, 0), 0);
    }

    #[test]
    fn test_display_marks_invalid_slots() {
        let board = filled_board(8);
        let dump = board.to_string();
        let last = dump.lines().last().unwrap();
        assert!(last.starts_with("XX, "));
        assert_eq!(dump.lines().count(), NUM_ROWS);
    }
}
