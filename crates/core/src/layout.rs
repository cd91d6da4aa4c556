//! Layout module - logical screen geometry for the presentation layer
//!
//! The simulation itself is resolution independent, but gravity works in
//! logical pixels so falling tiles can collide. All positions are the upper-left
//! corner of a hex's bounding box unless noted otherwise.

use crate::hex::HexCoord;
use crate::types::{HEX_WIDTH, LOGICAL_WINDOW_HEIGHT, LOGICAL_WINDOW_WIDTH, NUM_ROWS};

/// Point in logical screen space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Board geometry derived from the hex width and the logical window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Hex radius (center to corner)
    pub hex_s: f64,
    /// Hex height (flat side to flat side)
    pub hex_h: f64,
    /// Hex width (corner to corner)
    pub hex_w: f64,
    /// Upper-left corner of the board
    pub board: Point,
    pub board_width: f64,
    pub board_height: f64,
}

impl Layout {
    /// Layout for the default hex size, centered in the logical window.
    pub fn standard() -> Self {
        Self::new(HEX_WIDTH, LOGICAL_WINDOW_WIDTH, LOGICAL_WINDOW_HEIGHT)
    }

    pub fn new(hex_width: f64, window_width: f64, window_height: f64) -> Self {
        let s = hex_width / 2.0;
        let h = 3f64.sqrt() * s;
        let w = 2.0 * s;
        let board_width = 5.0 * w + 4.0 * (w / 2.0) + 0.75 * w;
        let board_height = h * NUM_ROWS as f64;
        Self {
            hex_s: s,
            hex_h: h,
            hex_w: w,
            board: Point::new(
                window_width / 2.0 - board_width / 2.0,
                window_height / 2.0 - board_height / 2.0,
            ),
            board_width,
            board_height,
        }
    }

    /// Resting position of the slot at `coord`.
    pub fn hex_to_screen(&self, coord: HexCoord) -> Point {
        let x = self.board.x + coord.q as f64 * 0.75 * self.hex_w;
        let y = if coord.q_is_even() {
            self.board.y + self.hex_h * (coord.r as f64 + 0.5)
        } else {
            self.board.y + self.hex_h * coord.r as f64
        };
        Point::new(x, y)
    }

    /// Resting y of the slot at `coord`.
    #[inline]
    pub fn rest_y(&self, coord: HexCoord) -> f64 {
        self.hex_to_screen(coord).y
    }

    /// Where a freshly spawned tile appears: one hex above the board top.
    pub fn spawn_y(&self) -> f64 {
        self.board.y - self.hex_h
    }

    /// Center of the hex at `coord`.
    pub fn hex_center(&self, coord: HexCoord) -> Point {
        let p = self.hex_to_screen(coord);
        Point::new(p.x + self.hex_w / 2.0, p.y + self.hex_h / 2.0)
    }

    /// Center of the box bounding every hex in `coords`.
    pub fn bounding_box_center(&self, coords: &[HexCoord]) -> Point {
        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(f64::MIN, f64::MIN);
        for &c in coords {
            let p = self.hex_to_screen(c);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x + self.hex_w);
            max.y = max.y.max(p.y + self.hex_h);
        }
        if coords.is_empty() {
            return self.board;
        }
        Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
