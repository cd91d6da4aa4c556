//! Gravity module - falling tiles
//!
//! Tiles fall in screen space (logical pixels, milliseconds). Each column is
//! processed bottom to top so a tile always sees where the tile below it
//! ended up this tick.

use crate::board::Board;
use crate::hex::HexCoord;
use crate::types::{MAX_VELOCITY, NUM_COLUMNS};

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GravityStep {
    /// Tiles that came to rest this step.
    pub landed: u32,
    /// Tiles still moving or waiting to drop.
    pub falling: u32,
}

/// Advance every falling tile by `dt_ms`.
///
/// Tiles wait until `fall_start_ms`. A tile landing on the floor or on a
/// stationary tile snaps exactly to its resting slot. A tile catching up with
/// a falling tile below rides on top of it instead.
pub fn update_gravity(board: &mut Board, gravity: f64, now_ms: u64, dt_ms: f64) -> GravityStep {
    let layout = *board.layout();
    let mut step = GravityStep::default();

    for q in 0..NUM_COLUMNS {
        let column = board.column_mut(q);
        for i in 0..column.len() {
            let tile = column[i];
            if !tile.is_valid || tile.is_stationary {
                continue;
            }
            step.falling += 1;
            if now_ms < tile.fall_start_ms {
                continue;
            }

            let rest = layout.rest_y(HexCoord::from_stack(q, i));
            let below = i.checked_sub(1).map(|b| column[b]);
            let riding = below.filter(|b| b.is_valid && !b.is_stationary);
            let contact = match riding {
                Some(b) => rest.min(b.y - layout.hex_h),
                None => rest,
            };

            let tile = &mut column[i];
            tile.velocity = (tile.velocity + gravity * dt_ms).min(MAX_VELOCITY);
            tile.y += tile.velocity * dt_ms;

            if tile.y < contact {
                continue;
            }
            match riding {
                Some(b) if contact < rest => {
                    tile.y = contact;
                    tile.velocity = tile.velocity.min(b.velocity);
                }
                _ => {
                    tile.y = rest;
                    tile.velocity = 0.0;
                    tile.is_stationary = true;
                    step.landed += 1;
                    step.falling -= 1;
                }
            }
        }
    }
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::rng::SimpleRng;
    use crate::types::{GRAVITY_DROP_IN, TICK_MS};

    fn settle(board: &mut Board, mut now: u64) -> u64 {
        for _ in 0..10_000 {
            let step = update_gravity(board, GRAVITY_DROP_IN, now, TICK_MS as f64);
            if step.falling == 0 {
                return now;
            }
            now += TICK_MS as u64;
        }
        panic!("board never settled");
    }

    #[test]
    fn test_filled_board_settles_exactly() {
        let mut board = Board::new(Layout::standard());
        let mut rng = SimpleRng::new(42);
        board.fill(&mut rng, 1, 0);
        settle(&mut board, 0);

        let layout = *board.layout();
        for (coord, tile) in board.tiles() {
            assert!(tile.is_stationary);
            assert_eq!(tile.velocity, 0.0);
            assert_eq!(tile.y, layout.rest_y(coord), "tile at {}", coord);
        }
    }

    #[test]
    fn test_tiles_wait_for_start_time() {
        let mut board = Board::new(Layout::standard());
        let mut rng = SimpleRng::new(1);
        board.fill(&mut rng, 1, 1_000);
        let before = board.clone();
        let step = update_gravity(&mut board, GRAVITY_DROP_IN, 500, TICK_MS as f64);
        assert_eq!(step.landed, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_tiles_never_overlap_while_falling() {
        let mut board = Board::new(Layout::standard());
        let mut rng = SimpleRng::new(9);
        board.fill(&mut rng, 1, 0);
        let hex_h = board.layout().hex_h;

        let mut now = 0;
        for _ in 0..400 {
            update_gravity(&mut board, GRAVITY_DROP_IN, now, TICK_MS as f64);
            for q in 0..NUM_COLUMNS {
                let col = board.column(q);
                for pair in col.windows(2) {
                    if pair[0].is_valid && pair[1].is_valid {
                        assert!(pair[1].y <= pair[0].y - hex_h + 1e-9);
                    }
                }
            }
            now += TICK_MS as u64;
        }
    }

    #[test]
    fn test_velocity_capped() {
        let mut board = Board::new(Layout::standard());
        let mut rng = SimpleRng::new(5);
        board.fill(&mut rng, 1, 0);
        let mut now = 0;
        for _ in 0..50 {
            update_gravity(&mut board, 1.0, now, TICK_MS as f64);
            now += TICK_MS as u64;
            for (_, tile) in board.tiles() {
                assert!(tile.velocity <= MAX_VELOCITY);
            }
        }
    }
}
