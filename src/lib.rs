//! Hexic (workspace facade crate).
//!
//! Re-exports the workspace crates as `hexic::{core, engine, types}` and holds
//! the configuration of the headless runner.

pub mod config;

pub use hexic_core as core;
pub use hexic_engine as engine;
pub use hexic_types as types;
