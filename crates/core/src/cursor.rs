//! Cursor module - the player's selection
//!
//! The cursor is anchored to a hex and sits either on the vertex left of it,
//! the vertex right of it, or (for starflowers and black pearls) on the hex
//! itself. Left/right positions select a trio; `On` selects the ring or
//! triangle around the special tile.
//!
//! Moves that would leave the selection partly off the board are rejected.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::hex::{HexCoord, HexNeighbors};
use crate::layout::{Layout, Point};
use crate::types::{
    CursorPos, HexDirection, HexType, ALL_NEIGHBORS, BLACK_PEARL_DOWN_NEIGHBORS,
    BLACK_PEARL_UP_NEIGHBORS, FLOWER_ROTATION_DEGREES, NUM_COLUMNS, NUM_ROWS,
    TRIO_LEFT_NEIGHBORS, TRIO_RIGHT_NEIGHBORS, TRIO_ROTATION_DEGREES,
};

/// Tiles turned together by one rotation, in clockwise order
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub tiles: ArrayVec<HexCoord, 6>,
    /// Trio selections auto-chain their rotation.
    pub is_trio: bool,
    /// Unsigned degrees per rotation step.
    pub step_degrees: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub hex_anchor: HexCoord,
    pub position: CursorPos,
}

impl Cursor {
    /// Cursor at the middle of the board, left of its anchor
    pub fn new() -> Self {
        Self {
            hex_anchor: HexCoord::new(NUM_COLUMNS as i32 / 2, NUM_ROWS as i32 / 2),
            position: CursorPos::Left,
        }
    }

    fn anchor_kind(&self, board: &Board) -> Option<HexType> {
        board.kind_at(self.hex_anchor)
    }

    /// Neighbors of the anchor that join it in the selection.
    ///
    /// Empty when the cursor is `On` a tile that is no longer special.
    pub fn neighbors(&self, board: &Board) -> HexNeighbors {
        let anchor = self.hex_anchor;
        match self.position {
            CursorPos::Left => anchor.neighbors(TRIO_LEFT_NEIGHBORS),
            CursorPos::Right => anchor.neighbors(TRIO_RIGHT_NEIGHBORS),
            CursorPos::On => match self.anchor_kind(board) {
                Some(HexType::Starflower) => anchor.neighbors(ALL_NEIGHBORS),
                Some(HexType::BlackPearlUp) => anchor.neighbors(BLACK_PEARL_UP_NEIGHBORS),
                Some(HexType::BlackPearlDown) => anchor.neighbors(BLACK_PEARL_DOWN_NEIGHBORS),
                _ => HexNeighbors::new(),
            },
        }
    }

    /// Tiles a rotation would turn, or `None` if the selection is not usable.
    pub fn selection(&self, board: &Board) -> Option<Selection> {
        if board.get(self.hex_anchor).is_none() {
            return None;
        }
        let neighbors = self.neighbors(board);
        if neighbors.is_empty() || neighbors.iter().any(|&c| board.get(c).is_none()) {
            return None;
        }

        match self.position {
            CursorPos::Left | CursorPos::Right => {
                let mut tiles = ArrayVec::new();
                tiles.push(self.hex_anchor);
                tiles.extend(neighbors);
                Some(Selection {
                    tiles,
                    is_trio: true,
                    step_degrees: TRIO_ROTATION_DEGREES,
                })
            }
            CursorPos::On => {
                let step_degrees = if neighbors.len() == 6 {
                    FLOWER_ROTATION_DEGREES
                } else {
                    TRIO_ROTATION_DEGREES
                };
                Some(Selection {
                    tiles: neighbors,
                    is_trio: false,
                    step_degrees,
                })
            }
        }
    }

    /// Whether `coord` is part of the current selection
    pub fn contains(&self, board: &Board, coord: HexCoord) -> bool {
        coord == self.hex_anchor || self.neighbors(board).contains(&coord)
    }

    /// Screen point of the cursor (also the pivot of a rotation)
    pub fn screen_point(&self, layout: &Layout) -> Point {
        let p = layout.hex_to_screen(self.hex_anchor);
        let y = p.y + layout.hex_h / 2.0;
        match self.position {
            CursorPos::Right => Point::new(p.x + layout.hex_w, y),
            CursorPos::Left => Point::new(p.x, y),
            CursorPos::On => Point::new(p.x + layout.hex_w / 2.0, y),
        }
    }

    pub fn move_up(&mut self, board: &Board) -> bool {
        let r = self.hex_anchor.r;
        let next = match self.position {
            CursorPos::Right if r == 0 => return false,
            CursorPos::Right => (HexDirection::TopRight, CursorPos::Left),
            CursorPos::Left if r == 0 => return false,
            CursorPos::Left | CursorPos::On => (HexDirection::TopLeft, CursorPos::Right),
        };
        self.try_move_to(board, self.hex_anchor.neighbor(next.0), next.1)
    }

    pub fn move_down(&mut self, board: &Board) -> bool {
        let r = self.hex_anchor.r;
        let next = match self.position {
            CursorPos::Right if r == NUM_ROWS as i32 - 2 => return false,
            CursorPos::Right => (HexDirection::BottomRight, CursorPos::Left),
            CursorPos::Left if r == NUM_ROWS as i32 - 1 => return false,
            CursorPos::Left | CursorPos::On => (HexDirection::BottomLeft, CursorPos::Right),
        };
        self.try_move_to(board, self.hex_anchor.neighbor(next.0), next.1)
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        let q = self.hex_anchor.q;
        match self.position {
            CursorPos::Right if q == 0 => false,
            CursorPos::Right => {
                let special = self.anchor_kind(board).is_some_and(|k| k.is_special());
                if special && self.try_move_to(board, self.hex_anchor, CursorPos::On) {
                    return true;
                }
                self.try_move_to(board, self.hex_anchor, CursorPos::Left)
            }
            CursorPos::Left if q <= 1 => false,
            CursorPos::Left => {
                let anchor = HexCoord::new(q - 2, self.hex_anchor.r);
                self.try_move_to(board, anchor, CursorPos::Right)
            }
            CursorPos::On => self.try_move_to(board, self.hex_anchor, CursorPos::Left),
        }
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        let q = self.hex_anchor.q;
        match self.position {
            CursorPos::Right if q >= NUM_COLUMNS as i32 - 2 => false,
            CursorPos::Right => {
                let anchor = HexCoord::new(q + 2, self.hex_anchor.r);
                self.try_move_to(board, anchor, CursorPos::Left)
            }
            CursorPos::Left if q >= NUM_COLUMNS as i32 - 1 => false,
            CursorPos::Left => {
                let special = self.anchor_kind(board).is_some_and(|k| k.is_special());
                if special && self.try_move_to(board, self.hex_anchor, CursorPos::On) {
                    return true;
                }
                self.try_move_to(board, self.hex_anchor, CursorPos::Right)
            }
            CursorPos::On => self.try_move_to(board, self.hex_anchor, CursorPos::Right),
        }
    }

    fn try_move_to(&mut self, board: &Board, anchor: HexCoord, position: CursorPos) -> bool {
        let candidate = Cursor {
            hex_anchor: anchor,
            position,
        };
        if candidate.selection(board).is_none() {
            return false;
        }
        *self = candidate;
        true
    }

    /// One-line description for debug dumps
    pub fn describe(&self) -> String {
        let pos = match self.position {
            CursorPos::Left => "Left of",
            CursorPos::Right => "Right of",
            CursorPos::On => "On",
        };
        format!("Cursor {} {}", pos, self.hex_anchor)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{board_from_grid, FixtureGrid};
    use crate::layout::Layout;

    fn uniform_board(kind: HexType) -> Board {
        let mut grid: FixtureGrid = [[Some(kind); NUM_COLUMNS]; NUM_ROWS];
        for q in (0..NUM_COLUMNS).step_by(2) {
            grid[NUM_ROWS - 1][q] = None;
        }
        board_from_grid(&grid, Layout::standard())
    }

    #[test]
    fn test_initial_cursor_selects_trio() {
        let board = uniform_board(HexType::Blue);
        let cursor = Cursor::new();
        assert_eq!(cursor.hex_anchor, HexCoord::new(5, 4));
        assert_eq!(cursor.position, CursorPos::Left);

        let sel = cursor.selection(&board).unwrap();
        assert!(sel.is_trio);
        assert_eq!(sel.step_degrees, TRIO_ROTATION_DEGREES);
        assert_eq!(
            sel.tiles.as_slice(),
            &[HexCoord::new(5, 4), HexCoord::new(4, 4), HexCoord::new(4, 3)]
        );
    }

    #[test]
    fn test_left_right_walk() {
        let board = uniform_board(HexType::Blue);
        let mut cursor = Cursor::new();

        assert!(cursor.move_right(&board));
        assert_eq!(cursor.position, CursorPos::Right);
        assert_eq!(cursor.hex_anchor, HexCoord::new(5, 4));

        assert!(cursor.move_right(&board));
        assert_eq!(cursor.position, CursorPos::Left);
        assert_eq!(cursor.hex_anchor, HexCoord::new(7, 4));

        assert!(cursor.move_left(&board));
        assert!(cursor.move_left(&board));
        assert_eq!(cursor, Cursor::new());
    }

    #[test]
    fn test_moves_stop_at_edges() {
        let board = uniform_board(HexType::Blue);
        let mut cursor = Cursor::new();
        let mut guard = 0;
        while cursor.move_left(&board) {
            guard += 1;
            assert!(guard < 20);
        }
        let stuck = cursor;
        assert!(!cursor.move_left(&board));
        assert_eq!(cursor, stuck);
        assert!(cursor.selection(&board).is_some());

        while cursor.move_up(&board) {
            guard += 1;
            assert!(guard < 40);
        }
        assert!(cursor.selection(&board).is_some());
        assert!(cursor.hex_anchor.r <= 1);
    }

    #[test]
    fn test_every_reachable_cursor_has_valid_selection() {
        let board = uniform_board(HexType::Green);
        let mut cursor = Cursor::new();
        // Sweep down and right repeatedly; every accepted move must stay usable.
        for _ in 0..12 {
            cursor.move_down(&board);
            assert!(cursor.selection(&board).is_some());
            cursor.move_right(&board);
            assert!(cursor.selection(&board).is_some());
        }
        for _ in 0..12 {
            cursor.move_up(&board);
            assert!(cursor.selection(&board).is_some());
            cursor.move_left(&board);
            assert!(cursor.selection(&board).is_some());
        }
    }

    #[test]
    fn test_on_starflower_selects_ring() {
        let mut board = uniform_board(HexType::Blue);
        board.tile_at_mut(HexCoord::new(5, 4)).kind = HexType::Starflower;
        let mut cursor = Cursor::new();

        assert!(cursor.move_right(&board));
        assert_eq!(cursor.position, CursorPos::On);
        let sel = cursor.selection(&board).unwrap();
        assert!(!sel.is_trio);
        assert_eq!(sel.step_degrees, FLOWER_ROTATION_DEGREES);
        assert_eq!(sel.tiles.as_slice(), &HexCoord::new(5, 4).ring());

        assert!(cursor.move_right(&board));
        assert_eq!(cursor.position, CursorPos::Right);
    }

    #[test]
    fn test_on_black_pearl_selects_triangle() {
        let mut board = uniform_board(HexType::Blue);
        board.tile_at_mut(HexCoord::new(5, 4)).kind = HexType::BlackPearlDown;
        let cursor = Cursor {
            hex_anchor: HexCoord::new(5, 4),
            position: CursorPos::On,
        };
        let sel = cursor.selection(&board).unwrap();
        assert_eq!(sel.tiles.len(), 3);
        assert_eq!(sel.step_degrees, TRIO_ROTATION_DEGREES);
        assert!(!sel.is_trio);
    }

    #[test]
    fn test_on_plain_tile_has_no_selection() {
        let board = uniform_board(HexType::Blue);
        let cursor = Cursor {
            hex_anchor: HexCoord::new(5, 4),
            position: CursorPos::On,
        };
        assert!(cursor.selection(&board).is_none());
    }

    #[test]
    fn test_contains() {
        let board = uniform_board(HexType::Blue);
        let cursor = Cursor::new();
        assert!(cursor.contains(&board, HexCoord::new(4, 3)));
        assert!(!cursor.contains(&board, HexCoord::new(6, 4)));
    }
}
