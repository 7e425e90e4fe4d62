//! Configuration types for the CUE4Parse toolkit
//!
//! The CLI reads these from a TOML file; the provider serializes
//! [`ProviderConfig`] to JSON for diagnostics.

use crate::error::{Error, Result};
use crate::types::{AesKey, GameVersion};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the CUE4Parse CLI relative to the working directory
pub const DEFAULT_EXECUTABLE: &str = "../CUE4Parse.CLI/bin/Release/net8.0/CUE4Parse.CLI.exe";

/// Root configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Game archive configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// CUE4Parse CLI tool configuration
    #[serde(default)]
    pub tool: ToolConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration if the file exists, otherwise use defaults
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Settings describing which game archives to open and how
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Directory containing the game's archive files
    #[serde(default)]
    pub directory_path: String,
    /// Unreal Engine version used by the game
    #[serde(default)]
    pub game_version: GameVersion,
    /// AES keys for encrypted archives
    #[serde(default)]
    pub aes_keys: Vec<AesKey>,
    /// Optional type mappings file (.usmap)
    #[serde(default)]
    pub mappings_path: Option<String>,
}

impl ProviderConfig {
    pub fn new(directory_path: impl Into<String>, game_version: GameVersion) -> Self {
        Self {
            directory_path: directory_path.into(),
            game_version,
            aes_keys: Vec::new(),
            mappings_path: None,
        }
    }

    /// Check every configured AES key
    pub fn validate_keys(&self) -> Result<()> {
        self.aes_keys.iter().try_for_each(AesKey::validate)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(String::new(), GameVersion::default())
    }
}

/// Location of the external CUE4Parse CLI tool
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Path to the CUE4Parse CLI executable
    #[serde(default = "default_executable")]
    pub executable: PathBuf,
    /// Arguments placed before the command flags, e.g. the assembly path
    /// when the tool runs through `dotnet`
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            executable: default_executable(),
            args: Vec::new(),
        }
    }
}

fn default_executable() -> PathBuf {
    PathBuf::from(DEFAULT_EXECUTABLE)
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
