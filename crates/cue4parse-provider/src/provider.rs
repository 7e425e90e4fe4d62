//! Provider for accessing game archives through the CUE4Parse CLI
//!
//! Each operation runs the CLI once with the provider's directory, engine
//! version, AES keys and mappings, then decodes its stdout.

use crate::command::ToolCommand;
use crate::package::PackageInfo;
use cue4parse_common::{
    AesKey, Config, Error, ExportFormat, GameVersion, ProviderConfig, Result, ToolConfig,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main entry point for parsing and extracting Unreal Engine assets
///
/// # Example
///
/// ```no_run
/// use cue4parse_provider::{GameVersion, Provider};
///
/// let mut provider = Provider::new("/path/to/game/paks", GameVersion::UE5_3);
/// provider.set_mappings("/path/to/mappings.usmap");
///
/// let packages = provider.list_packages()?;
/// println!("Found {} packages", packages.len());
/// # Ok::<(), cue4parse_provider::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Provider {
    pub(crate) config: ProviderConfig,
    tool: ToolConfig,
}

impl Provider {
    /// Create a provider for a game directory, using the default tool location
    pub fn new(directory_path: impl Into<String>, version: GameVersion) -> Self {
        Self {
            config: ProviderConfig::new(directory_path, version),
            tool: ToolConfig::default(),
        }
    }

    /// Create a provider from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.provider.clone(),
            tool: config.tool.clone(),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn executable_path(&self) -> &Path {
        &self.tool.executable
    }

    /// Set the path to the CUE4Parse CLI executable
    pub fn set_executable_path(&mut self, path: impl Into<PathBuf>) {
        self.tool.executable = path.into();
    }

    /// Set arguments that precede the command flags
    ///
    /// Used when the tool is launched through a host, e.g. `dotnet` with the
    /// assembly path as the first argument.
    pub fn set_tool_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tool.args = args.into_iter().map(Into::into).collect();
    }

    /// Add an AES key; an empty `guid` marks the main key
    ///
    /// Keys are validated when an operation runs.
    pub fn add_key(&mut self, guid: impl Into<String>, key: impl Into<String>) {
        self.config.aes_keys.push(AesKey::new(guid, key));
    }

    /// Set the type mappings file (.usmap)
    pub fn set_mappings(&mut self, path: impl Into<String>) {
        self.config.mappings_path = Some(path.into());
    }

    /// List every package in the game directory
    pub fn list_packages(&self) -> Result<Vec<String>> {
        self.check_inputs()?;
        let stdout = ToolCommand::new(&self.tool, "--list-packages")
            .provider_args(&self.config)
            .run()?;

        let packages: Vec<String> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        info!(count = packages.len(), "listed packages");
        Ok(packages)
    }

    /// Load a package's export table
    pub fn load_package(&self, package_path: &str) -> Result<PackageInfo> {
        require_path("package", package_path)?;
        self.check_inputs()?;

        let stdout = ToolCommand::new(&self.tool, "--package-info")
            .arg("--package", package_path)
            .provider_args(&self.config)
            .arg("--output-format", ExportFormat::Json.as_str())
            .run()?;

        let package: PackageInfo = serde_json::from_str(&stdout)?;
        debug!(package = %package.name, exports = package.exports.len(), "loaded package");
        Ok(package)
    }

    /// Export an object's properties as JSON
    pub fn export_object_json(&self, object_path: &str) -> Result<serde_json::Value> {
        require_path("object", object_path)?;
        self.check_inputs()?;

        let stdout = ToolCommand::new(&self.tool, "--export")
            .arg("--object", object_path)
            .provider_args(&self.config)
            .arg("--output-format", ExportFormat::Json.as_str())
            .run()?;

        Ok(serde_json::from_str(&stdout)?)
    }

    /// Export an object to a file
    ///
    /// `format` is one of `json`, `png`, `fbx` or `wav`.
    pub fn export_object(&self, object_path: &str, output_path: &str, format: &str) -> Result<()> {
        require_path("object", object_path)?;
        require_path("output", output_path)?;
        let format: ExportFormat = format.parse()?;
        self.check_inputs()?;

        ToolCommand::new(&self.tool, "--export")
            .arg("--object", object_path)
            .arg("--output", output_path)
            .provider_args(&self.config)
            .arg("--output-format", format.as_str())
            .run()?;

        info!(object = object_path, output = output_path, %format, "exported object");
        Ok(())
    }

    /// Validate local inputs before spawning the tool
    fn check_inputs(&self) -> Result<()> {
        let directory = &self.config.directory_path;
        if directory.trim().is_empty() {
            return Err(Error::invalid_path("game directory not set"));
        }
        if !Path::new(directory).is_dir() {
            return Err(Error::invalid_path(directory.clone()));
        }

        if let Some(mappings) = &self.config.mappings_path {
            if !Path::new(mappings).is_file() {
                return Err(Error::FileNotFound(mappings.clone()));
            }
        }

        self.config.validate_keys()
    }
}

fn require_path(kind: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::invalid_path(format!("empty {kind} path")));
    }
    Ok(())
}
