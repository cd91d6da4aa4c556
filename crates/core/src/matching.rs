//! Match detection - clusters and flowers
//!
//! A cluster grows from a trio (a tile plus two adjacent neighbors of the same
//! type) by adding any same-typed tile that touches two cluster members which
//! are themselves adjacent. A flower is a ring of six same-typed tiles around
//! any center.
//!
//! Searches scan columns left to right, rows top to bottom, and report the
//! first match found. `require_stationary` is false only while the opening
//! board is rerolled, when every tile is still in the air.

use crate::board::{Board, Tile};
use crate::hex::HexCoord;
use crate::scratch::ScratchArena;
use crate::types::{HexType, ALL_NEIGHBORS, NUM_COLUMNS, NUM_ROWS};

fn matchable(board: &Board, coord: HexCoord, require_stationary: bool) -> Option<&Tile> {
    board
        .get(coord)
        .filter(|t| t.is_matchable(require_stationary))
}

/// Whether a ring tile may join a flower.
///
/// Tiles already claimed this pass are allowed only if a flower claimed them.
fn flower_petal(tile: &Tile, require_stationary: bool) -> bool {
    if tile.is_matched {
        return tile.is_flower_matched;
    }
    tile.is_matchable(require_stationary)
}

/// Two adjacent neighbors of `coord` that form a trio with it.
///
/// Neighbors are tried clockwise from the top; the first pair wins.
pub fn has_cluster_match(
    board: &Board,
    coord: HexCoord,
    require_stationary: bool,
) -> Option<(HexCoord, HexCoord)> {
    let kind = matchable(board, coord, require_stationary)?.kind;
    let ring = coord.ring();
    for i in 0..ring.len() {
        let (c1, c2) = (ring[i], ring[(i + 1) % ring.len()]);
        let same = |c: HexCoord| {
            matchable(board, c, require_stationary).is_some_and(|t| t.kind.matches(kind))
        };
        if same(c1) && same(c2) {
            return Some((c1, c2));
        }
    }
    None
}

/// Find the first cluster on the board.
///
/// Clears `out`, fills it with the cluster's coordinates (seed trio first
/// popped last) and returns its size. Returns 0 and leaves `out` empty when
/// there is no cluster of at least three tiles.
pub fn find_one_simple_cluster(
    board: &Board,
    scratch: &mut ScratchArena,
    out: &mut Vec<HexCoord>,
    require_stationary: bool,
) -> usize {
    out.clear();
    scratch.clear_in_cluster();

    for start in HexCoord::all_valid() {
        let Some((n1, n2)) = has_cluster_match(board, start, require_stationary) else {
            continue;
        };
        let target = board.tile_at(start).kind;

        scratch.dfs_stack.clear();
        out.clear();
        for c in [start, n1, n2] {
            scratch.mark_in_cluster(c);
            scratch.dfs_stack.push(c);
        }

        while let Some(c) = scratch.dfs_stack.pop() {
            out.push(c);
            let ring = c.ring();
            for i in 0..ring.len() {
                let prev = ring[(i + ring.len() - 1) % ring.len()];
                let cand = ring[i];
                let next = ring[(i + 1) % ring.len()];

                let joins = matchable(board, cand, require_stationary)
                    .is_some_and(|t| t.kind.matches(target))
                    && !scratch.in_cluster(cand);
                if !joins {
                    continue;
                }
                let anchored = |n: HexCoord| {
                    n.is_valid()
                        && scratch.in_cluster(n)
                        && board.kind_at(n).is_some_and(|k| k.matches(target))
                };
                if anchored(prev) || anchored(next) {
                    scratch.mark_in_cluster(cand);
                    scratch.dfs_stack.push(cand);
                }
            }
        }

        if out.len() >= 3 {
            break;
        }
    }

    scratch.dfs_stack.clear();
    if out.len() < 3 {
        out.clear();
    }
    out.len()
}

/// Whether the six tiles around `coord` form a flower.
pub fn has_flower_match(board: &Board, coord: HexCoord, require_stationary: bool) -> bool {
    if matchable(board, coord, require_stationary).is_none() {
        return false;
    }

    let mut kind: Option<HexType> = None;
    for n in coord.ring() {
        let Some(tile) = board.get(n) else {
            return false;
        };
        if !flower_petal(tile, require_stationary) {
            return false;
        }
        match kind {
            None => kind = Some(tile.kind),
            Some(k) if !k.matches(tile.kind) => return false,
            Some(_) => {}
        }
    }
    true
}

/// Find the first flower on the board.
///
/// Clears `out` and fills it with the center followed by the ring clockwise
/// from the top. Returns 7, or 0 when there is no flower.
pub fn find_one_flower(board: &Board, out: &mut Vec<HexCoord>, require_stationary: bool) -> usize {
    out.clear();
    for q in 0..NUM_COLUMNS as i32 {
        for r in 0..NUM_ROWS as i32 {
            let center = HexCoord::new(q, r);
            if has_flower_match(board, center, require_stationary) {
                out.push(center);
                out.extend(center.neighbors(ALL_NEIGHBORS));
                return out.len();
            }
        }
    }
    0
}

/// Whether any cluster or flower exists
pub fn board_has_match(board: &Board, require_stationary: bool) -> bool {
    HexCoord::all_valid().any(|c| {
        has_cluster_match(board, c, require_stationary).is_some()
            || has_flower_match(board, c, require_stationary)
    })
}
