//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of a hexagonal match-3 board: tiles on an
//! even-q hex grid, rotations of trios and flowers, matches, gravity, and the
//! turn resolver that sequences them. It has no dependencies on rendering,
//! audio, or input devices, making it:
//!
//! - **Deterministic**: same seed and inputs give the same game
//! - **Testable**: boards can be loaded from fixtures and stepped by hand
//! - **Headless**: a driver only needs to call [`GameState::update`]
//! - **Fast**: steady-state ticks do not allocate
//!
//! # Module Structure
//!
//! - [`hex`]: coordinates and adjacency
//! - [`layout`]: logical screen geometry
//! - [`board`]: per-column tile stacks, spawning and collapsing
//! - [`fixture`]: text board layouts
//! - [`cursor`]: the player's selection
//! - [`matching`]: cluster and flower detection
//! - [`rotation`]: rotation animation and face shifting
//! - [`gravity`]: falling tiles
//! - [`animation`]: match fades and score popups
//! - [`scoring`]: cluster and flower points
//! - [`game_state`]: the turn resolver
//! - [`snapshot`]: serializable view for observers
//!
//! # Example
//!
//! ```
//! use hexic_core::GameState;
//! use hexic_core::types::{GameAction, TICK_MS};
//!
//! let mut game = GameState::new(12345, 1);
//!
//! // Tiles drop in from above; let them land.
//! while !game.is_quiescent() {
//!     game.tick(TICK_MS);
//! }
//!
//! assert!(game.apply_action(GameAction::RotateCw));
//! assert!(game.rotation().is_in_progress());
//! ```
//!
//! # Timing
//!
//! Time is driven by the caller. [`GameState::tick`] advances the simulation
//! clock by the elapsed milliseconds; a fixed 16ms step is typical.

pub mod animation;
pub mod board;
pub mod cursor;
pub mod error;
pub mod fixture;
pub mod game_state;
pub mod gravity;
pub mod hex;
pub mod layout;
pub mod matching;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod scratch;
pub mod snapshot;

pub use hexic_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use cursor::{Cursor, Selection};
pub use error::FixtureError;
pub use game_state::{GameEvent, GameState};
pub use hex::HexCoord;
pub use layout::{Layout, Point};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, TileView};
