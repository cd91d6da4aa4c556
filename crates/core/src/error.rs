//! Error types for the recoverable edges of the core.
//!
//! Simulation logic has no recoverable errors: invariant violations panic after
//! dumping the board. Only external data (board fixtures) can be rejected.

use thiserror::Error;

use crate::hex::HexCoord;

/// Why a board fixture could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("fixture has {found} tile codes, expected {expected}")]
    WrongLength { expected: usize, found: usize },

    #[error("unknown tile code '{code}' at position {index}")]
    UnknownCode { index: usize, code: String },

    #[error("slot {coord} does not exist but the fixture gives it a tile")]
    TileInInvalidSlot { coord: HexCoord },

    #[error("slot {coord} needs a tile but the fixture marks it invalid")]
    MissingTile { coord: HexCoord },

    #[error("unknown built-in fixture '{0}'")]
    UnknownBuiltin(String),
}
