//! CUE4Parse CLI invocation
//!
//! Builds the argument list shared by every provider operation, runs the
//! tool to completion and maps its failures onto [`Error`].

use cue4parse_common::{Error, ProviderConfig, Result, ToolConfig};
use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, warn};

/// A single CUE4Parse CLI run
pub(crate) struct ToolCommand {
    cmd: Command,
    action: &'static str,
    executable: String,
}

impl ToolCommand {
    /// Start a command for `action` (e.g. `--list-packages`)
    pub(crate) fn new(tool: &ToolConfig, action: &'static str) -> Self {
        let mut cmd = Command::new(&tool.executable);
        cmd.args(&tool.args);
        cmd.arg(action);
        Self {
            cmd,
            action,
            executable: tool.executable.display().to_string(),
        }
    }

    pub(crate) fn arg(mut self, flag: &str, value: &str) -> Self {
        self.cmd.arg(flag).arg(value);
        self
    }

    /// Append directory, engine version, AES keys and mappings
    pub(crate) fn provider_args(mut self, config: &ProviderConfig) -> Self {
        self.cmd.arg("--directory").arg(&config.directory_path);
        self.cmd.arg("--version").arg(config.game_version.as_str());

        for key in &config.aes_keys {
            self.cmd.arg("--aes-key").arg(key.to_cli_arg());
        }

        if let Some(mappings) = &config.mappings_path {
            self.cmd.arg("--mappings").arg(mappings);
        }
        self
    }

    /// Run to completion and return stdout
    pub(crate) fn run(mut self) -> Result<String> {
        // Arguments carry AES keys, so only the action is logged.
        debug!(executable = %self.executable, action = self.action, "running CUE4Parse CLI");

        let output = self.cmd.output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::ExecutableNotFound(self.executable.clone())
            } else {
                Error::Io(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                output.status.to_string()
            } else {
                stderr
            };
            warn!(action = self.action, "CUE4Parse CLI failed: {}", message);
            return Err(Error::ProcessFailed(message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
