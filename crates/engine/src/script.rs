use hexic_core::{GameEvent, GameState};
use hexic_types::{GameAction, TICK_MS};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown action '{token}' at position {index}")]
    UnknownAction { index: usize, token: String },

    #[error("step {step}: {} was rejected", .action.as_str())]
    Rejected { step: usize, action: GameAction },

    #[error("board still busy after {ticks} ticks")]
    NotQuiescent { ticks: u32 },
}

impl ScriptError {
    pub fn code(&self) -> &'static str {
        match self {
            ScriptError::UnknownAction { .. } => "invalid_script",
            ScriptError::Rejected { .. } => "action_rejected",
            ScriptError::NotQuiescent { .. } => "not_quiescent",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScriptError::UnknownAction { .. } => "script names an action that does not exist",
            ScriptError::Rejected { .. } => "game refused the action in its current state",
            ScriptError::NotQuiescent { .. } => "board did not come to rest in time",
        }
    }
}

/// What a script run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    pub steps: usize,
    pub ticks: u64,
    pub events: Vec<GameEvent>,
}

/// Parse a script: action names separated by commas or whitespace.
///
/// Everything after a `#` on a line is ignored.
///
/// ```
/// use hexic_engine::parse_script;
/// use hexic_types::GameAction;
///
/// let actions = parse_script("moveDown, moveDown # into place\nrotateCcw").unwrap();
/// assert_eq!(
///     actions,
///     vec![GameAction::MoveDown, GameAction::MoveDown, GameAction::RotateCcw]
/// );
/// ```
pub fn parse_script(text: &str) -> Result<Vec<GameAction>, ScriptError> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            GameAction::from_str(token).ok_or_else(|| ScriptError::UnknownAction {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Step the game at `TICK_MS` until nothing moves.
///
/// Returns the number of ticks taken.
pub fn run_until_quiescent(state: &mut GameState, max_ticks: u32) -> Result<u32, ScriptError> {
    let mut ticks = 0;
    while !state.is_quiescent() {
        if ticks >= max_ticks {
            return Err(ScriptError::NotQuiescent { ticks });
        }
        state.tick(TICK_MS);
        ticks += 1;
    }
    Ok(ticks)
}

/// Apply `actions` one at a time, letting the board settle around each.
///
/// Stops at the first action the game rejects (a blocked cursor move, or a
/// rotation with nothing selected).
pub fn apply_script(
    state: &mut GameState,
    actions: &[GameAction],
    max_ticks_per_step: u32,
) -> Result<ScriptReport, ScriptError> {
    let mut report = ScriptReport::default();
    report.ticks += run_until_quiescent(state, max_ticks_per_step)? as u64;
    report.events.extend(state.take_events());

    for (step, &action) in actions.iter().enumerate() {
        if !state.apply_action(action) {
            return Err(ScriptError::Rejected { step, action });
        }
        let ticks = run_until_quiescent(state, max_ticks_per_step)?;
        debug!(step, action = action.as_str(), ticks, score = state.score(), "script step");

        report.steps += 1;
        report.ticks += ticks as u64;
        report.events.extend(state.take_events());
    }
    Ok(report)
}
