//! The orchestrator: validate pending requests, then grant and revoke access
//! feedstock by feedstock, updating the manifest as each registration lands.
//!
//! Everything is sequential and fail-fast. The first error anywhere aborts
//! the run; there is no per-feedstock isolation or retry.

use crate::cleanup;
use crate::config::Config;
use crate::error::{AccessError, Result};
use crate::github::RepoChecker;
use crate::manifest::{Action, Manifest};
use crate::paths;
use crate::registry::{self, ResourceMapping};
use crate::requests;
use crate::smithy;
use std::path::Path;
use tracing::{info, warn};

/// Seam between the orchestrator and the external registration tool. The
/// production implementation shells out to conda-smithy; tests record calls.
pub trait Registrar {
    fn register(
        &mut self,
        cfg: &Config,
        feedstock_repo: &str,
        mapping: &ResourceMapping,
        remove: bool,
    ) -> Result<()>;
}

/// The real thing: clone and `conda-smithy register-ci`.
pub struct SmithyRegistrar;

impl Registrar for SmithyRegistrar {
    fn register(
        &mut self,
        cfg: &Config,
        feedstock_repo: &str,
        mapping: &ResourceMapping,
        remove: bool,
    ) -> Result<()> {
        smithy::register_feedstock(
            cfg,
            feedstock_repo,
            mapping.resource,
            mapping.policy_args,
            remove,
        )
    }
}

/// Validate every pending request: each request name must map to a cirun
/// resource, and each listed feedstock must exist on the remote host.
/// Advisory and side-effect free.
pub fn check(cfg: &Config, root: &Path) -> Result<()> {
    let checker = RepoChecker::new(cfg)?;
    for dir in [paths::grant_dir(root), paths::revoke_dir(root)] {
        check_dir(&checker, &dir)?;
    }
    Ok(())
}

fn check_dir(checker: &RepoChecker, dir: &Path) -> Result<()> {
    let requests = requests::load_requests(dir)?;
    if requests.is_empty() {
        info!("nothing to check in {}", dir.display());
        return Ok(());
    }
    for request in &requests {
        info!("checking request '{}'", request.name);
        if registry::lookup(&request.name).is_none() {
            return Err(AccessError::UnknownRequest(request.name.clone()));
        }
        for feedstock in &request.feedstocks {
            checker.repo_exists(feedstock)?;
        }
    }
    Ok(())
}

/// The full pipeline: validate, process grants, process revokes, delete the
/// request files, commit the deletions, optionally push.
pub fn run(cfg: &Config, root: &Path, push: bool) -> Result<()> {
    run_with(cfg, root, push, &mut SmithyRegistrar)
}

pub fn run_with(
    cfg: &Config,
    root: &Path,
    push: bool,
    registrar: &mut dyn Registrar,
) -> Result<()> {
    check(cfg, root)?;

    process_dir(cfg, root, &paths::grant_dir(root), Action::Add, registrar)?;
    process_dir(cfg, root, &paths::revoke_dir(root), Action::Remove, registrar)?;

    for dir in [paths::grant_dir(root), paths::revoke_dir(root)] {
        cleanup::remove_request_files(&dir)?;
    }
    cleanup::commit_removals(root)?;
    if push {
        cleanup::push(root)?;
    }
    Ok(())
}

fn process_dir(
    cfg: &Config,
    root: &Path,
    dir: &Path,
    action: Action,
    registrar: &mut dyn Registrar,
) -> Result<()> {
    info!("processing access control requests in {}", dir.display());
    let remove = matches!(action, Action::Remove);
    for request in requests::load_requests(dir)? {
        let Some(mapping) = registry::lookup(&request.name) else {
            // check() already failed hard on these; the guard here mirrors
            // the membership test the processing path has always done.
            warn!("skipping '{}': not a known cirun resource", request.name);
            continue;
        };
        for feedstock in &request.feedstocks {
            let feedstock_repo = registry::feedstock_repo_name(feedstock);
            info!("processing {feedstock_repo} for access control");
            registrar.register(cfg, &feedstock_repo, mapping, remove)?;

            let manifest_path = paths::manifest_path(root);
            let mut manifest = Manifest::load(&manifest_path)?;
            manifest.apply(mapping.resource, &feedstock_repo, action);
            manifest.save(&manifest_path)?;
        }
    }
    Ok(())
}
