//! Fixture module - deterministic board layouts
//!
//! A fixture is `NUM_ROWS * NUM_COLUMNS` two-letter type codes in row-major
//! order, separated by commas and/or whitespace. `XX` marks the slots that do
//! not exist (bottom row, even columns). The same format is produced by the
//! board's `Display` impl, so a printed board can be pasted back as a fixture.

use crate::board::Board;
use crate::error::FixtureError;
use crate::hex::HexCoord;
use crate::layout::Layout;
use crate::types::{HexType, BOARD_SIZE, NUM_COLUMNS, NUM_ROWS};

/// Code used for slots that hold no tile
pub const INVALID_CODE: &str = "XX";

/// Board with a yellow flower ready to be turned into a starflower
pub const YELLOW_STARFLOWER: &str = "
    RD, YL, PL, GR, RD, RD, YL, BL, PL, BL,
    RD, PL, BL, YL, BL, BL, PL, BL, PL, GR,
    BL, GR, PL, GR, GR, RD, YL, YL, PL, GR,
    BL, RD, GR, RD, RD, BL, GR, RD, YL, GR,
    RD, GR, YL, YL, YL, BL, YL, GR, RD, RD,
    BL, PL, RD, BL, YL, BL, RD, BL, YL, PL,
    BL, YL, BL, YL, GR, PL, YL, YL, GR, RD,
    PL, RD, BL, PL, BL, BL, PL, BL, BL, PL,
    XX, PL, XX, YL, XX, RD, XX, GR, XX, BL,
";

/// Board seeded with starflower rings that produce black pearls
pub const SIX_BLACK_PEARLS: &str = "
    PL, YL, YL, RD, BL, RD, PL, YL, PL, GR,
    PL, GR, SF, SF, SF, SF, SF, BL, RD, GR,
    GR, BL, SF, BL, SF, PL, SF, YL, GR, PL,
    PL, YL, RD, RD, RD, RD, RD, SF, SF, YL,
    PL, BL, RD, BL, YL, PL, RD, PL, SF, RD,
    RD, SF, YL, RD, RD, RD, YL, SF, RD, GR,
    YL, SF, SF, SF, SF, SF, SF, SF, GR, GR,
    BL, RD, BL, RD, GR, GR, GR, GR, RD, BL,
    XX, YL, XX, RD, XX, RD, XX, PL, XX, PL,
";

/// Fixture text for a built-in board name
pub fn builtin(name: &str) -> Result<&'static str, FixtureError> {
    match name {
        "yellow-starflower" => Ok(YELLOW_STARFLOWER),
        "six-black-pearls" => Ok(SIX_BLACK_PEARLS),
        other => Err(FixtureError::UnknownBuiltin(other.to_string())),
    }
}

/// Row-major grid of slots, `None` for invalid slots
pub type FixtureGrid = [[Option<HexType>; NUM_COLUMNS]; NUM_ROWS];

/// Parse fixture text into a grid, checking it against the board shape.
pub fn parse(text: &str) -> Result<FixtureGrid, FixtureError> {
    let codes: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if codes.len() != BOARD_SIZE {
        return Err(FixtureError::WrongLength {
            expected: BOARD_SIZE,
            found: codes.len(),
        });
    }

    let mut grid: FixtureGrid = [[None; NUM_COLUMNS]; NUM_ROWS];
    for (index, code) in codes.iter().enumerate() {
        let coord = HexCoord::new((index % NUM_COLUMNS) as i32, (index / NUM_COLUMNS) as i32);
        let kind = if code.eq_ignore_ascii_case(INVALID_CODE) {
            None
        } else {
            Some(HexType::from_code(code).ok_or_else(|| FixtureError::UnknownCode {
                index,
                code: code.to_string(),
            })?)
        };

        match (coord.is_valid(), kind) {
            (true, None) => return Err(FixtureError::MissingTile { coord }),
            (false, Some(_)) => return Err(FixtureError::TileInInvalidSlot { coord }),
            _ => {}
        }
        grid[coord.r as usize][coord.q as usize] = kind;
    }
    Ok(grid)
}

/// Build a settled board (every tile at rest) from a grid.
pub fn board_from_grid(grid: &FixtureGrid, layout: Layout) -> Board {
    let mut board = Board::new(layout);
    for q in 0..NUM_COLUMNS {
        for r in (0..NUM_ROWS).rev() {
            board.push_at_rest(q, grid[r][q]);
        }
    }
    board
}

/// Parse fixture text straight into a settled board.
pub fn load(text: &str, layout: Layout) -> Result<Board, FixtureError> {
    Ok(board_from_grid(&parse(text)?, layout))
}

/// Row-major grid of the board's current types
pub fn grid_of(board: &Board) -> FixtureGrid {
    let mut grid: FixtureGrid = [[None; NUM_COLUMNS]; NUM_ROWS];
    for (coord, tile) in board.tiles() {
        grid[coord.r as usize][coord.q as usize] = Some(tile.kind);
    }
    grid
}

/// A grid where no two neighbors share a type, so nothing can match.
///
/// Uses the three-coloring of the hex lattice: in cube coordinates every
/// neighbor step changes `x - y` by 1 or 2 (mod 3).
pub fn tricolor() -> FixtureGrid {
    const COLORS: [HexType; 3] = [HexType::Red, HexType::Blue, HexType::Purple];
    let mut grid: FixtureGrid = [[None; NUM_COLUMNS]; NUM_ROWS];
    for coord in HexCoord::all_valid() {
        let x = coord.q;
        let z = coord.r - (coord.q + (coord.q & 1)) / 2;
        let y = -x - z;
        grid[coord.r as usize][coord.q as usize] = Some(COLORS[(x - y).rem_euclid(3) as usize]);
    }
    grid
}
