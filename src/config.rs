use std::path::Path;

use crate::error::ConfigError;
use crate::game::MIN_DIM;

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub evaluator: EvaluatorConfig,
}

/// Board dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

/// Evaluator settings. A fixed seed makes tie-breaks reproducible; when
/// absent the evaluator seeds itself from the OS.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig { rows: 6, cols: 7 }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: BoardConfig::default(),
            evaluator: EvaluatorConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows < MIN_DIM {
            return Err(ConfigError::Validation(format!(
                "board.rows must be at least {MIN_DIM}"
            )));
        }
        if self.board.cols < MIN_DIM {
            return Err(ConfigError::Validation(format!(
                "board.cols must be at least {MIN_DIM}"
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&GameConfig::default()).expect("default config serializes")
    }
}
