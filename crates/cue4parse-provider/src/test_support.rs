//! Stand-in CLI fixture shared by the process tests

use crate::{GameVersion, Provider};
use std::fs;
use tempfile::TempDir;

/// Prints each argument it receives on its own line
pub const ECHO_ARGS: &str = "for a in \"$@\"; do echo \"$a\"; done\n";

/// Game directory plus a stand-in CLI script run through `/bin/sh`
pub struct Fixture {
    pub dir: TempDir,
    pub provider: Provider,
}

impl Fixture {
    pub fn new(script: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let game = dir.path().join("paks");
        fs::create_dir(&game).unwrap();
        let script_path = dir.path().join("cue4parse.sh");
        fs::write(&script_path, script).unwrap();

        let mut provider = Provider::new(game.to_str().unwrap(), GameVersion::UE5_3);
        provider.set_executable_path("/bin/sh");
        provider.set_tool_args([script_path.to_str().unwrap()]);
        Self { dir, provider }
    }

    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }
}
