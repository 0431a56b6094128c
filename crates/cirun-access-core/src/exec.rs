//! Checked subprocess invocation. Every external command's exit status is a
//! result; nothing in the pipeline ignores a failed child.

use crate::error::{AccessError, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::debug;

pub(crate) fn git_bin() -> Result<PathBuf> {
    which::which("git").map_err(|_| AccessError::GitNotInstalled)
}

pub(crate) fn smithy_bin() -> Result<PathBuf> {
    which::which("conda-smithy").map_err(|_| AccessError::SmithyNotInstalled)
}

/// The command line as a diagnostic string, for error messages and logs.
pub(crate) fn render(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command to completion, streaming its output through to the
/// operator. Spawn failures and non-zero exits are both errors.
pub(crate) fn run(cmd: &mut Command) -> Result<()> {
    let status = status(cmd)?;
    if !status.success() {
        return Err(AccessError::CommandFailed {
            command: render(cmd),
            status,
        });
    }
    Ok(())
}

/// Like `run`, but hands the exit status back for commands whose non-zero
/// exit carries meaning (e.g. `git diff --quiet`).
pub(crate) fn status(cmd: &mut Command) -> Result<ExitStatus> {
    let line = render(cmd);
    debug!("running `{line}`");
    cmd.status().map_err(|source| AccessError::CommandSpawn {
        command: line,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_program_and_args() {
        let mut cmd = Command::new("git");
        cmd.args(["clone", "--depth", "1"]);
        assert_eq!(render(&cmd), "git clone --depth 1");
    }

    #[test]
    fn failed_command_carries_its_command_line() {
        let err = run(Command::new("false").arg("--flag")).unwrap_err();
        match err {
            AccessError::CommandFailed { command, status } => {
                assert_eq!(command, "false --flag");
                assert!(!status.success());
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn unspawnable_command_is_a_spawn_error() {
        let err = run(&mut Command::new("/nonexistent/cirun-test-binary")).unwrap_err();
        assert!(matches!(err, AccessError::CommandSpawn { .. }));
    }
}
