use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Well-known files and directories
// ---------------------------------------------------------------------------

/// Directory of pending grant requests, one file per cirun resource.
pub const GRANT_DIR: &str = "grant_access";

/// Directory of pending revoke requests.
pub const REVOKE_DIR: &str = "revoke_access";

/// Template file kept in both request directories; never a request itself.
pub const EXAMPLE_FILE: &str = "example.txt";

/// The access control manifest at the repository root.
pub const ACCESS_CONTROL_FILE: &str = ".access_control.yml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn grant_dir(root: &Path) -> PathBuf {
    root.join(GRANT_DIR)
}

pub fn revoke_dir(root: &Path) -> PathBuf {
    root.join(REVOKE_DIR)
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(ACCESS_CONTROL_FILE)
}
