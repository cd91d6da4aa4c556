//! Rotation module - turning a selection of tiles
//!
//! A rotation animates the selected tiles around the cursor point, then
//! shifts their faces one step along the selection. Tiles never move between
//! stacks; only type and multiplier travel.
//!
//! Trio rotations chain: after each step with no match the next step starts
//! `ROTATION_CHAIN_DELAY_MS` later, up to `MAX_TRIO_ROTATIONS` steps (one full
//! turn, which brings the trio back to where it started).

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::cursor::Selection;
use crate::hex::HexCoord;
use crate::layout::Point;
use crate::types::{
    Spin, MAX_TRIO_ROTATIONS, ROTATION_CHAIN_DELAY_MS, ROTATION_DURATION_MS, ROTATION_PEAK_SCALE,
};

/// Rotate the faces of `tiles` one step.
///
/// `tiles` must be in clockwise order. Clockwise moves each face to the next
/// slot; counterclockwise to the previous one.
pub fn shift_faces(board: &mut Board, tiles: &[HexCoord], spin: Spin) {
    let n = tiles.len();
    if n < 2 {
        return;
    }
    let faces: ArrayVec<_, 6> = tiles
        .iter()
        .map(|&c| {
            let t = board.tile_at(c);
            (t.kind, t.multiplier)
        })
        .collect();

    for (i, &c) in tiles.iter().enumerate() {
        let (kind, multiplier) = match spin {
            Spin::Clockwise => faces[(i + n - 1) % n],
            Spin::CounterClockwise => faces[(i + 1) % n],
        };
        board.tile_at_mut(c).set_face(kind, multiplier);
    }
}

/// Scale at `progress` in [0, 1]: 1.0 up to the peak halfway, back to 1.0.
pub fn rotation_scale(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 + (ROTATION_PEAK_SCALE - 1.0) * (1.0 - (2.0 * p - 1.0).abs())
}

/// State of the one rotation that may be running
#[derive(Debug, Clone, PartialEq)]
pub struct RotationAnimation {
    pub in_progress: bool,
    pub start_ms: u64,
    /// Screen point the tiles turn around.
    pub center: Point,
    pub is_trio: bool,
    /// Signed degrees per step, positive is clockwise.
    pub degrees: f64,
    pub spin: Spin,
    /// Completed steps in the current chain.
    pub count: u32,
    pub tiles: ArrayVec<HexCoord, 6>,
}

impl RotationAnimation {
    pub fn new() -> Self {
        Self {
            in_progress: false,
            start_ms: 0,
            center: Point::default(),
            is_trio: false,
            degrees: 0.0,
            spin: Spin::Clockwise,
            count: 0,
            tiles: ArrayVec::new(),
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Begin rotating `selection` now.
    pub fn start(&mut self, selection: &Selection, spin: Spin, center: Point, now_ms: u64) {
        *self = Self {
            in_progress: true,
            start_ms: now_ms,
            center,
            is_trio: selection.is_trio,
            degrees: spin.sign() * selection.step_degrees,
            spin,
            count: 0,
            tiles: selection.tiles.clone(),
        };
    }

    /// Fraction of the current step elapsed at `now_ms` (negative before it starts).
    pub fn progress(&self, now_ms: u64) -> f64 {
        (now_ms as f64 - self.start_ms as f64) / ROTATION_DURATION_MS as f64
    }

    /// Advance the animation. Returns true when a step just finished and the
    /// faces were shifted.
    pub fn update(&mut self, board: &mut Board, now_ms: u64) -> bool {
        if !self.in_progress {
            return false;
        }
        let progress = self.progress(now_ms);
        if progress < 0.0 {
            return false;
        }

        if progress > 1.0 {
            for &c in &self.tiles {
                let tile = board.tile_at_mut(c);
                tile.is_rotating = false;
                tile.scale = 1.0;
                tile.rotation_angle = 0.0;
            }
            shift_faces(board, &self.tiles, self.spin);
            return true;
        }

        let scale = rotation_scale(progress);
        let angle = self.degrees * progress;
        for &c in &self.tiles {
            let tile = board.tile_at_mut(c);
            tile.is_rotating = true;
            tile.scale = scale;
            tile.rotation_angle = angle;
        }
        false
    }

    /// Decide what follows a finished step.
    ///
    /// Returns true if another step was scheduled.
    pub fn finish_step(&mut self, matched: bool, now_ms: u64) -> bool {
        if !self.is_trio {
            self.in_progress = false;
            return false;
        }
        self.count += 1;
        if !matched && self.count < MAX_TRIO_ROTATIONS {
            self.start_ms = now_ms + ROTATION_CHAIN_DELAY_MS as u64;
            return true;
        }
        self.in_progress = false;
        false
    }
}

impl Default for RotationAnimation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use crate::fixture::{board_from_grid, grid_of, tricolor};
    use crate::layout::Layout;
    use crate::types::{HexType, TRIO_ROTATION_DEGREES};

    fn quiet_board() -> Board {
        board_from_grid(&tricolor(), Layout::standard())
    }

    #[test]
    fn test_shift_clockwise_moves_to_next_slot() {
        let mut board = quiet_board();
        let tiles = [HexCoord::new(5, 4), HexCoord::new(4, 4), HexCoord::new(4, 3)];
        board.tile_at_mut(tiles[0]).kind = HexType::Green;

        shift_faces(&mut board, &tiles, Spin::Clockwise);
        assert_eq!(board.tile_at(tiles[1]).kind, HexType::Green);

        shift_faces(&mut board, &tiles, Spin::CounterClockwise);
        assert_eq!(board.tile_at(tiles[0]).kind, HexType::Green);
    }

    #[test]
    fn test_shift_carries_multiplier() {
        let mut board = quiet_board();
        let tiles = [HexCoord::new(5, 4), HexCoord::new(4, 4), HexCoord::new(4, 3)];
        board.tile_at_mut(tiles[2]).multiplier = true;
        shift_faces(&mut board, &tiles, Spin::Clockwise);
        assert!(board.tile_at(tiles[0]).multiplier);
        assert!(!board.tile_at(tiles[2]).multiplier);
    }

    #[test]
    fn test_three_trio_steps_are_identity() {
        let mut board = quiet_board();
        let before = grid_of(&board);
        let sel = Cursor::new().selection(&board).unwrap();
        for _ in 0..3 {
            shift_faces(&mut board, &sel.tiles, Spin::Clockwise);
        }
        assert_eq!(grid_of(&board), before);
    }

    #[test]
    fn test_scale_peaks_halfway() {
        assert_eq!(rotation_scale(0.0), 1.0);
        assert_eq!(rotation_scale(0.5), ROTATION_PEAK_SCALE);
        assert_eq!(rotation_scale(1.0), 1.0);
        assert!(rotation_scale(0.25) > 1.0);
    }

    #[test]
    fn test_update_animates_then_shifts() {
        let mut board = quiet_board();
        let sel = Cursor::new().selection(&board).unwrap();
        let first = board.tile_at(sel.tiles[0]).kind;

        let mut rot = RotationAnimation::new();
        rot.start(&sel, Spin::Clockwise, Point::default(), 1000);
        assert!(rot.is_in_progress());

        assert!(!rot.update(&mut board, 1090));
        let tile = board.tile_at(sel.tiles[0]);
        assert!(tile.is_rotating);
        assert!((tile.rotation_angle - TRIO_ROTATION_DEGREES / 2.0).abs() < 1e-9);

        assert!(rot.update(&mut board, 1000 + ROTATION_DURATION_MS as u64 + 1));
        let tile = board.tile_at(sel.tiles[1]);
        assert_eq!(tile.kind, first);
        assert!(!tile.is_rotating);
        assert_eq!(tile.scale, 1.0);
    }

    #[test]
    fn test_future_start_is_noop() {
        let mut board = quiet_board();
        let sel = Cursor::new().selection(&board).unwrap();
        let mut rot = RotationAnimation::new();
        rot.start(&sel, Spin::CounterClockwise, Point::default(), 500);
        let before = board.clone();
        assert!(!rot.update(&mut board, 100));
        assert_eq!(board, before);
    }

    #[test]
    fn test_trio_chains_until_full_turn() {
        let board = quiet_board();
        let sel = Cursor::new().selection(&board).unwrap();
        let mut rot = RotationAnimation::new();
        rot.start(&sel, Spin::Clockwise, Point::default(), 0);

        assert!(rot.finish_step(false, 200));
        assert_eq!(rot.start_ms, 200 + ROTATION_CHAIN_DELAY_MS as u64);
        assert!(rot.finish_step(false, 500));
        assert!(!rot.finish_step(false, 800));
        assert!(!rot.is_in_progress());
        assert_eq!(rot.count, MAX_TRIO_ROTATIONS);
    }

    #[test]
    fn test_flower_step_is_not_counted() {
        let mut board = quiet_board();
        let center = HexCoord::new(5, 4);
        board.tile_at_mut(center).kind = HexType::Starflower;
        let cursor = Cursor {
            hex_anchor: center,
            position: crate::types::CursorPos::On,
        };
        let sel = cursor.selection(&board).unwrap();
        assert!(!sel.is_trio);

        let mut rot = RotationAnimation::new();
        rot.start(&sel, Spin::Clockwise, Point::default(), 0);
        assert!(!rot.finish_step(false, 200));
        assert!(!rot.is_in_progress());
        assert_eq!(rot.count, 0);
    }

    #[test]
    fn test_match_stops_chain() {
        let board = quiet_board();
        let sel = Cursor::new().selection(&board).unwrap();
        let mut rot = RotationAnimation::new();
        rot.start(&sel, Spin::Clockwise, Point::default(), 0);
        assert!(!rot.finish_step(true, 200));
        assert!(!rot.is_in_progress());
    }
}
