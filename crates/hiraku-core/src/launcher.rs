use std::process::{Command, Stdio};

use tracing::info;

use crate::error::HirakuError;

/// Starts player processes. Launching is fire-and-forget: implementations
/// must not wait for the player to exit.
pub trait ProcessLauncher {
    fn spawn(&self, executable: &str, args: &[String]) -> Result<(), HirakuError>;
}

/// Launches the player as a detached OS process with nulled stdio.
#[derive(Debug, Default)]
pub struct OsLauncher;

impl ProcessLauncher for OsLauncher {
    fn spawn(&self, executable: &str, args: &[String]) -> Result<(), HirakuError> {
        info!(executable = %executable, ?args, "Spawning player");
        Command::new(executable)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
            .map_err(|source| HirakuError::Launch {
                executable: executable.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_missing_executable_is_launch_error() {
        let err = OsLauncher
            .spawn("hiraku-test-no-such-binary", &[])
            .unwrap_err();
        assert!(matches!(
            err,
            HirakuError::Launch { executable, .. } if executable == "hiraku-test-no-such-binary"
        ));
    }
}
