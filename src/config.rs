//! Startup configuration.
//!
//! Values come from built-in defaults, then `BUDGET_RUN_*` environment variables, then
//! command-line flags, each layer overriding the previous one.

use std::ffi::OsString;
use std::iter;
use std::time::Duration;

use clap::Parser;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::excuse::DEFAULT_TIMEOUT;
use crate::systems::components::Difficulty;

pub const ENV_PREFIX: &str = "BUDGET_RUN_";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ghost speed preset for new sessions
    #[serde(default)]
    pub difficulty: Difficulty,
    /// How long to wait for a post-game excuse before falling back
    #[serde(default = "default_excuse_timeout_ms")]
    pub excuse_timeout_ms: u64,
    /// Window scale; 1.0 gives 32 pixel tiles
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_excuse_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_scale() -> f32 {
    1.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            excuse_timeout_ms: default_excuse_timeout_ms(),
            scale: default_scale(),
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Parser, Debug, Default, Clone, PartialEq, Serialize)]
#[command(name = "budget-run", version, about = "Collect the budget, dodge the finance department")]
pub struct CliOverrides {
    /// Ghost speed preset: intern, manager or cmo
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,

    /// Shorthand for `--difficulty intern`
    #[arg(long, conflicts_with_all = ["difficulty", "hard"])]
    #[serde(skip)]
    pub easy: bool,

    /// Shorthand for `--difficulty cmo`
    #[arg(long, conflicts_with = "difficulty")]
    #[serde(skip)]
    pub hard: bool,

    /// Window scale; 1.0 gives 32 pixel tiles
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl CliOverrides {
    /// Parses arguments with the program name already stripped.
    ///
    /// Help and version requests come back as errors; use [`Parser::parse`] to print them.
    pub fn from_args<I, S>(args: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        let argv = iter::once(OsString::from("budget-run")).chain(args.into_iter().map(Into::into));
        Self::try_parse_from(argv)
            .map(Self::resolved)
            .map_err(|e| config_error(e.to_string()))
    }

    /// Folds the shorthand flags into `difficulty`.
    pub fn resolved(mut self) -> Self {
        if self.easy {
            self.difficulty = Some(Difficulty::Easy);
        } else if self.hard {
            self.difficulty = Some(Difficulty::Hard);
        }
        self.easy = false;
        self.hard = false;
        self
    }
}

fn config_error(message: impl Into<String>) -> GameError {
    figment::Error::from(message.into()).into()
}

impl GameConfig {
    /// Defaults merged with the environment.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(GameConfig::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Extracts and validates a configuration.
    pub fn extract_from(figment: Figment) -> GameResult<Self> {
        let config: GameConfig = figment.extract()?;
        config.validate()
    }

    /// Loads the full configuration for the given command-line arguments.
    pub fn load<I, S>(args: I) -> GameResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        Self::with_overrides(CliOverrides::from_args(args)?)
    }

    /// Loads defaults and the environment, then applies already parsed arguments.
    pub fn with_overrides(overrides: CliOverrides) -> GameResult<Self> {
        Self::extract_from(Self::figment().merge(Serialized::defaults(overrides.resolved())))
    }

    fn validate(self) -> GameResult<Self> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(config_error(format!("Scale must be positive, got {}", self.scale)));
        }
        Ok(self)
    }

    pub fn excuse_timeout(&self) -> Duration {
        Duration::from_millis(self.excuse_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.difficulty, Difficulty::Normal);
        assert_eq!(config.excuse_timeout(), Duration::from_millis(2000));
        assert_eq!(config.scale, 1.0);
    }

    #[test]
    fn test_shorthand_flags() {
        let overrides = CliOverrides::from_args(["--hard"]).unwrap();
        assert_eq!(overrides.difficulty, Some(Difficulty::Hard));
        assert!(!overrides.hard);

        let overrides = CliOverrides::from_args(["--easy"]).unwrap();
        assert_eq!(overrides.difficulty, Some(Difficulty::Easy));
    }

    #[test]
    fn test_conflicting_difficulty_flags() {
        assert!(CliOverrides::from_args(["--hard", "--easy"]).is_err());
        assert!(CliOverrides::from_args(["--easy", "--difficulty", "cmo"]).is_err());
    }

    #[test]
    fn test_rejects_unknown() {
        assert!(CliOverrides::from_args(["--turbo"]).is_err());
        assert!(CliOverrides::from_args(["--scale"]).is_err());
        assert!(CliOverrides::from_args(["--difficulty", "ceo"]).is_err());
    }

    #[test]
    fn test_command_definition() {
        CliOverrides::command().debug_assert();
    }
}
