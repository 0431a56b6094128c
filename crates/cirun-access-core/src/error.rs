use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("unknown access request '{0}': no cirun resource is mapped to that name")]
    UnknownRequest(String),

    #[error("repository {org}/{repo} not found (HTTP {status})")]
    RepoNotFound {
        org: String,
        repo: String,
        status: u16,
    },

    #[error("access control manifest not found at {0}")]
    ManifestNotFound(PathBuf),

    #[error("invalid action '{0}': choose 'add' or 'remove'")]
    InvalidAction(String),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("git is not installed or not on PATH")]
    GitNotInstalled,

    #[error("conda-smithy is not installed or not on PATH")]
    SmithyNotInstalled,

    #[error("`{command}` exited with {status}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
    },

    #[error("failed to run `{command}`")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AccessError>;
