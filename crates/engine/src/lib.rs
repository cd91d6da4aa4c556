//! Scripted driving helpers on top of [`GameState`](hexic_core::GameState).
//!
//! A script is a list of [`GameAction`](hexic_types::GameAction)s. Each action
//! is applied to a quiescent board and the game is then stepped at the fixed
//! tick rate until it comes to rest again.

pub mod script;

pub use script::{
    apply_script, parse_script, run_until_quiescent, ScriptError, ScriptReport,
};
