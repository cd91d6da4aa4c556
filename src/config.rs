//! Runner configuration: environment first, then command-line flags.

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::core::fixture;

/// Default tick budget for the board to settle after each scripted action
pub const DEFAULT_MAX_TICKS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub level: u32,
    /// Built-in fixture name or path to a fixture file.
    pub board: Option<String>,
    /// Inline script or path to a script file.
    pub script: Option<String>,
    pub max_ticks: u32,
    /// Print the final snapshot as JSON instead of a board dump.
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            level: crate::types::INITIAL_LEVEL,
            board: None,
            script: None,
            max_ticks: DEFAULT_MAX_TICKS,
            json: false,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl RunConfig {
    /// Read `HEXIC_SEED`, `HEXIC_LEVEL`, `HEXIC_BOARD`, `HEXIC_SCRIPT` and
    /// `HEXIC_MAX_TICKS`. Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let seed = env::var("HEXIC_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);
        let level = env::var("HEXIC_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.level);
        let max_ticks = env::var("HEXIC_MAX_TICKS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_ticks);

        Self {
            seed,
            level,
            board: env::var("HEXIC_BOARD").ok().and_then(non_empty),
            script: env::var("HEXIC_SCRIPT").ok().and_then(non_empty),
            max_ticks,
            json: false,
        }
    }

    /// Fixture text for `board`, if one was configured.
    pub fn board_text(&self) -> Result<Option<String>> {
        let Some(board) = &self.board else {
            return Ok(None);
        };
        if let Ok(text) = fixture::builtin(board) {
            return Ok(Some(text.to_string()));
        }
        let text = std::fs::read_to_string(board)
            .with_context(|| format!("board '{}' is neither a built-in nor a readable file", board))?;
        Ok(Some(text))
    }

    /// Script text: the contents of `script` if it names a file, else `script` itself.
    pub fn script_text(&self) -> Result<Option<String>> {
        let Some(script) = &self.script else {
            return Ok(None);
        };
        if Path::new(script).is_file() {
            let text = std::fs::read_to_string(script)
                .with_context(|| format!("failed to read script file '{}'", script))?;
            return Ok(Some(text));
        }
        Ok(Some(script.clone()))
    }
}

/// Apply command-line flags on top of `base`.
pub fn parse_run_args(args: &[String], base: RunConfig) -> Result<RunConfig> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| anyhow!("missing value for {}", flag))
        };
        match flag {
            "--seed" => {
                let v = value()?;
                config.seed = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
            }
            "--level" => {
                let v = value()?;
                config.level = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --level value: {}", v))?;
                if config.level == 0 {
                    return Err(anyhow!("--level starts at 1"));
                }
            }
            "--max-ticks" => {
                let v = value()?;
                config.max_ticks = v
                    .parse()
                    .map_err(|_| anyhow!("invalid --max-ticks value: {}", v))?;
            }
            "--board" => config.board = Some(value()?),
            "--script" => config.script = Some(value()?),
            "--json" => config.json = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}
