use crate::consts;
use crate::game::board;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Name of the environment variable that can point at a configuration file
/// to use instead of the default one
pub(crate) const CONFIG_ENV_VAR: &str = "TERMSNAKE_CONFIG";

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Pacing of the game
    #[serde(default)]
    pub(crate) game: GameSettings,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("termsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read the configuration file named by the `TERMSNAKE_CONFIG`
    /// environment variable, or else the file at the default path.  A
    /// missing default file yields the default configuration; a missing file
    /// named by the environment variable is an error.
    pub(crate) fn locate_and_load() -> Result<Config, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Config::load(Path::new(&path), false),
            _ => Config::load(&Config::default_path()?, true),
        }
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// Speed & length of a game
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameSettings")]
pub(crate) struct GameSettings {
    /// Tick period before the first level's speed-up
    pub(crate) initial_speed: Duration,

    /// Amount by which the tick period shrinks at each level start
    pub(crate) speed_step: Duration,

    /// Number of food items placed at each level start
    pub(crate) food_per_level: usize,

    /// Number of levels that must be cleared to win
    pub(crate) max_level: u32,
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            initial_speed: consts::INITIAL_TICK_PERIOD,
            speed_step: consts::TICK_PERIOD_STEP,
            food_per_level: consts::FOOD_PER_LEVEL,
            max_level: consts::MAX_LEVEL,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
struct RawGameSettings {
    initial_speed_ms: u64,
    speed_step_ms: u64,
    food_per_level: usize,
    max_level: u32,
}

impl Default for RawGameSettings {
    fn default() -> RawGameSettings {
        let settings = GameSettings::default();
        RawGameSettings {
            initial_speed_ms: u64::try_from(settings.initial_speed.as_millis()).unwrap_or(u64::MAX),
            speed_step_ms: u64::try_from(settings.speed_step.as_millis()).unwrap_or(u64::MAX),
            food_per_level: settings.food_per_level,
            max_level: settings.max_level,
        }
    }
}

impl TryFrom<RawGameSettings> for GameSettings {
    type Error = SettingsError;

    fn try_from(value: RawGameSettings) -> Result<GameSettings, SettingsError> {
        if value.initial_speed_ms == 0 {
            return Err(SettingsError::ZeroSpeed);
        }
        let max_food = board::food_capacity().saturating_sub(consts::INITIAL_SNAKE_LENGTH);
        if !(1..=max_food).contains(&value.food_per_level) {
            return Err(SettingsError::FoodPerLevel {
                got: value.food_per_level,
                max: max_food,
            });
        }
        if value.max_level == 0 {
            return Err(SettingsError::ZeroLevels);
        }
        Ok(GameSettings {
            initial_speed: Duration::from_millis(value.initial_speed_ms),
            speed_step: Duration::from_millis(value.speed_step_ms),
            food_per_level: value.food_per_level,
            max_level: value.max_level,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LogConfig {
    /// File to write log messages to.  Nothing is logged if this is unset.
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level of message to log
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SettingsError {
    #[error("initial-speed-ms must be positive")]
    ZeroSpeed,
    #[error("food-per-level must be between 1 and {max}; got {got}")]
    FoodPerLevel { got: usize, max: usize },
    #[error("max-level must be positive")]
    ZeroLevels,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
