//! Registration invoker: shallow-clone a feedstock and run
//! `conda-smithy register-ci` against the clone. The real CI registration
//! logic lives in conda-smithy; this module only builds and runs the command.

use crate::config::Config;
use crate::error::Result;
use crate::exec;
use std::path::Path;
use std::process::Command;
use tracing::info;

/// Clone URL for a feedstock repository under the configured host and org.
pub fn clone_url(cfg: &Config, feedstock_repo: &str) -> String {
    format!(
        "{}/{}/{}.git",
        cfg.server_url.trim_end_matches('/'),
        cfg.org,
        feedstock_repo
    )
}

/// Shallow-clone the feedstock into `dest`. A failed clone is a hard error;
/// there is no point handing conda-smithy an empty directory.
pub fn clone_feedstock(cfg: &Config, feedstock_repo: &str, dest: &Path) -> Result<()> {
    let git = exec::git_bin()?;
    let url = clone_url(cfg, feedstock_repo);
    info!("cloning {url}");
    exec::run(
        Command::new(git)
            .args(["clone", "--depth", "1"])
            .arg(&url)
            .arg(dest),
    )
}

/// Argument list for `conda-smithy register-ci`: every CI provider except
/// cirun is disabled, the operation is scoped to one resource, and each
/// policy qualifier rides its own `--cirun-policy-args` flag.
pub fn register_ci_args(
    org: &str,
    feedstock_dir: &Path,
    resource: &str,
    policy_args: &[&str],
    remove: bool,
) -> Vec<String> {
    let mut args: Vec<String> = [
        "register-ci",
        "--organization",
        org,
        "--without-azure",
        "--without-travis",
        "--without-circle",
        "--without-appveyor",
        "--without-drone",
        "--without-webservice",
        "--without-anaconda-token",
        "--feedstock_directory",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.push(feedstock_dir.to_string_lossy().into_owned());
    args.push("--cirun-resources".to_string());
    args.push(resource.to_string());
    for arg in policy_args {
        args.push("--cirun-policy-args".to_string());
        args.push(arg.to_string());
    }
    if remove {
        args.push("--remove".to_string());
    }
    args
}

/// Grant or revoke one resource for one feedstock: fresh clone into a temp
/// directory (removed again when this function returns), then register-ci.
pub fn register_feedstock(
    cfg: &Config,
    feedstock_repo: &str,
    resource: &str,
    policy_args: &[&str],
    remove: bool,
) -> Result<()> {
    let smithy = exec::smithy_bin()?;
    let clone_dir = tempfile::TempDir::new()?;
    clone_feedstock(cfg, feedstock_repo, clone_dir.path())?;

    let args = register_ci_args(&cfg.org, clone_dir.path(), resource, policy_args, remove);
    info!(
        "registering CI for {feedstock_repo}: resource {resource}, remove={remove}"
    );
    exec::run(Command::new(smithy).args(&args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_url_is_built_from_the_config() {
        let cfg = Config::default();
        assert_eq!(
            clone_url(&cfg, "scipy-feedstock"),
            "https://github.com/conda-forge/scipy-feedstock.git"
        );
    }

    #[test]
    fn register_args_disable_every_other_provider() {
        let args = register_ci_args(
            "conda-forge",
            Path::new("/tmp/clone"),
            "cirun-gpu-runner",
            &[],
            false,
        );
        assert_eq!(
            args,
            vec![
                "register-ci",
                "--organization",
                "conda-forge",
                "--without-azure",
                "--without-travis",
                "--without-circle",
                "--without-appveyor",
                "--without-drone",
                "--without-webservice",
                "--without-anaconda-token",
                "--feedstock_directory",
                "/tmp/clone",
                "--cirun-resources",
                "cirun-gpu-runner",
            ]
        );
    }

    #[test]
    fn policy_args_each_get_their_own_flag() {
        let args = register_ci_args(
            "conda-forge",
            Path::new("/tmp/clone"),
            "cirun-gpu-runner",
            &["pull_request", "push"],
            false,
        );
        let tail: Vec<&str> = args.iter().map(String::as_str).skip(14).collect();
        assert_eq!(
            tail,
            vec![
                "--cirun-policy-args",
                "pull_request",
                "--cirun-policy-args",
                "push",
            ]
        );
    }

    #[test]
    fn remove_flag_comes_last() {
        let args = register_ci_args(
            "conda-forge",
            Path::new("/tmp/clone"),
            "cirun-gpu-runner",
            &["pull_request"],
            true,
        );
        assert_eq!(args.last().map(String::as_str), Some("--remove"));
    }
}
