//! Core value types shared across the toolkit

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unreal Engine version the game assets were cooked with
///
/// Serialized as the identifier the CUE4Parse CLI expects (`GAME_UE5_3`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameVersion {
    /// Unreal Engine 4.0
    #[serde(rename = "GAME_UE4_0")]
    UE4_0,
    /// Unreal Engine 4.27 (final UE4 release)
    #[serde(rename = "GAME_UE4_27")]
    UE4_27,
    /// Unreal Engine 5.0
    #[serde(rename = "GAME_UE5_0")]
    UE5_0,
    /// Unreal Engine 5.1
    #[serde(rename = "GAME_UE5_1")]
    UE5_1,
    /// Unreal Engine 5.2
    #[serde(rename = "GAME_UE5_2")]
    UE5_2,
    /// Unreal Engine 5.3
    #[default]
    #[serde(rename = "GAME_UE5_3")]
    UE5_3,
    /// Unreal Engine 5.4
    #[serde(rename = "GAME_UE5_4")]
    UE5_4,
    /// Unreal Engine 5.5
    #[serde(rename = "GAME_UE5_5")]
    UE5_5,
}

impl GameVersion {
    /// Every supported version, oldest first
    pub const ALL: [Self; 8] = [
        Self::UE4_0,
        Self::UE4_27,
        Self::UE5_0,
        Self::UE5_1,
        Self::UE5_2,
        Self::UE5_3,
        Self::UE5_4,
        Self::UE5_5,
    ];

    /// Identifier passed to the CUE4Parse CLI via `--version`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UE4_0 => "GAME_UE4_0",
            Self::UE4_27 => "GAME_UE4_27",
            Self::UE5_0 => "GAME_UE5_0",
            Self::UE5_1 => "GAME_UE5_1",
            Self::UE5_2 => "GAME_UE5_2",
            Self::UE5_3 => "GAME_UE5_3",
            Self::UE5_4 => "GAME_UE5_4",
            Self::UE5_5 => "GAME_UE5_5",
        }
    }

    /// Engine version number without the prefix, e.g. `5_3`
    fn number(&self) -> &'static str {
        &self.as_str()["GAME_UE".len()..]
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameVersion {
    type Err = Error;

    /// Accepts `GAME_UE5_3`, `UE5_3`, `ue5.3` and `5.3`
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix("GAME_").unwrap_or(&upper);
        let rest = rest.strip_prefix("UE").unwrap_or(rest);
        let normalized = rest.replace('.', "_");

        Self::ALL
            .into_iter()
            .find(|v| v.number() == normalized)
            .ok_or_else(|| Error::UnknownGameVersion(s.to_string()))
    }
}

/// AES encryption key for decrypting game archives
///
/// An empty `guid` marks the main key; other keys are bound to the archive
/// with the matching encryption GUID.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AesKey {
    /// GUID identifying this key (empty for the main key)
    #[serde(default)]
    pub guid: String,
    /// 256-bit key in hexadecimal, with or without a `0x` prefix
    pub key: String,
}

impl AesKey {
    /// Length of an AES-256 key in bytes
    pub const KEY_LEN: usize = 32;

    pub fn new(guid: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            key: key.into(),
        }
    }

    /// Whether this is the main (GUID-less) key
    #[must_use]
    pub fn is_main_key(&self) -> bool {
        self.guid.is_empty()
    }

    /// Check the GUID and key material
    pub fn validate(&self) -> Result<()> {
        if !self.guid.is_empty() && Uuid::parse_str(&self.guid).is_err() {
            return Err(Error::invalid_key(format!(
                "malformed GUID '{}'",
                self.guid
            )));
        }

        let hex_key = self
            .key
            .strip_prefix("0x")
            .or_else(|| self.key.strip_prefix("0X"))
            .unwrap_or(&self.key);
        let bytes = hex::decode(hex_key)
            .map_err(|e| Error::invalid_key(format!("key for '{}' is not hex: {e}", self.guid)))?;
        if bytes.len() != Self::KEY_LEN {
            return Err(Error::invalid_key(format!(
                "key for '{}' is {} bytes, expected {}",
                self.guid,
                bytes.len(),
                Self::KEY_LEN
            )));
        }
        Ok(())
    }

    /// Render as the `guid:key` form taken by `--aes-key`
    #[must_use]
    pub fn to_cli_arg(&self) -> String {
        format!("{}:{}", self.guid, self.key)
    }
}

impl FromStr for AesKey {
    type Err = Error;

    /// Parses `guid:key`, or a bare key for the main key
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_key("empty key"));
        }
        Ok(match s.split_once(':') {
            Some((guid, key)) => Self::new(guid.trim(), key.trim()),
            None => Self::new("", s),
        })
    }
}

/// Output format for object export
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Serialized object properties
    #[default]
    Json,
    /// Texture image
    Png,
    /// Mesh or skeleton
    Fbx,
    /// Sound wave
    Wav,
}

impl ExportFormat {
    /// Value passed to the CUE4Parse CLI via `--output-format`
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Png => "png",
            Self::Fbx => "fbx",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "png" => Ok(Self::Png),
            "fbx" => Ok(Self::Fbx),
            "wav" => Ok(Self::Wav),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}
