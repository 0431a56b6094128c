//! Post-run housekeeping: delete processed request files and commit the
//! removals so the requests repository reflects what was done.

use crate::error::{AccessError, Result};
use crate::exec;
use crate::paths;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Delete every request file in `dir` except the template. Returns the
/// removed paths in name order.
pub fn remove_request_files(dir: &Path) -> Result<Vec<PathBuf>> {
    info!("removing processed request files in {}", dir.display());
    if !dir.is_dir() {
        return Err(AccessError::NotADirectory(dir.to_path_buf()));
    }
    let mut removed = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && entry.file_name() != paths::EXAMPLE_FILE {
            info!("removing {}", path.display());
            std::fs::remove_file(&path)?;
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

/// Stage everything and commit. Returns false without committing when the
/// tree is already clean, so a re-run over empty request directories stays
/// a no-op instead of dying on `git commit`.
pub fn commit_removals(root: &Path) -> Result<bool> {
    let git = exec::git_bin()?;
    exec::run(Command::new(&git).current_dir(root).args(["add", "."]))?;

    let staged = exec::status(
        Command::new(&git)
            .current_dir(root)
            .args(["diff", "--cached", "--quiet"]),
    )?;
    if staged.success() {
        debug!("nothing staged, skipping commit");
        return Ok(false);
    }

    exec::run(Command::new(&git).current_dir(root).args([
        "commit",
        "-m",
        "Remove access control files",
    ]))?;
    Ok(true)
}

/// Push the cleanup commits. Only called when the operator asked for it.
pub fn push(root: &Path) -> Result<()> {
    let git = exec::git_bin()?;
    exec::run(Command::new(&git).current_dir(root).arg("push"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn removes_everything_but_the_template() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("example.txt"), "template\n").unwrap();
        std::fs::write(dir.path().join("cirun-gpu-runner.txt"), "foo\n").unwrap();
        std::fs::write(dir.path().join("cirun-gpu-runner-pr.txt"), "bar\n").unwrap();

        let removed = remove_request_files(dir.path()).unwrap();
        assert_eq!(removed.len(), 2);
        assert!(dir.path().join("example.txt").exists());
        assert!(!dir.path().join("cirun-gpu-runner.txt").exists());
        assert!(!dir.path().join("cirun-gpu-runner-pr.txt").exists());
    }

    #[test]
    fn non_directory_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = remove_request_files(&file).unwrap_err();
        assert!(matches!(err, AccessError::NotADirectory(_)));
    }

    #[test]
    fn empty_directory_removes_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("example.txt"), "template\n").unwrap();
        assert!(remove_request_files(dir.path()).unwrap().is_empty());
    }
}
