//! The access control manifest: which feedstocks currently hold which cirun
//! resource grants. Stored as `.access_control.yml` at the repository root;
//! edits must be byte-stable so the automation's commits diff cleanly.

use crate::error::{AccessError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// What to do with a (resource, feedstock) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Action::Add),
            "remove" => Ok(Action::Remove),
            other => Err(AccessError::InvalidAction(other.to_string())),
        }
    }
}

/// One grant line under a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedstockEntry {
    pub feedstock: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    access_control: IndexMap<String, Vec<FeedstockEntry>>,
}

/// In-memory manifest. Resource keys keep insertion order; a leading comment
/// block in the file survives a load/save round trip verbatim.
#[derive(Debug)]
pub struct Manifest {
    header: String,
    resources: IndexMap<String, Vec<FeedstockEntry>>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AccessError::ManifestNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let body_start = content
            .split_inclusive('\n')
            .take_while(|line| {
                let line = line.trim_end();
                line.is_empty() || line.starts_with('#')
            })
            .map(str::len)
            .sum::<usize>();
        let (header, body) = content.split_at(body_start);
        let document: Document = serde_yaml::from_str(body)?;
        Ok(Self {
            header: header.to_string(),
            resources: document.access_control,
        })
    }

    /// Grant: create the resource key on first use, append the feedstock,
    /// no-op when it is already listed.
    pub fn add(&mut self, resource: &str, feedstock_repo: &str) {
        let entries = self.resources.entry(resource.to_string()).or_default();
        if entries.iter().any(|e| e.feedstock == feedstock_repo) {
            debug!("{feedstock_repo} already listed under {resource}, skipping");
            return;
        }
        entries.push(FeedstockEntry {
            feedstock: feedstock_repo.to_string(),
        });
    }

    /// Revoke: drop every matching entry; unknown resources and empty lists
    /// are a no-op.
    pub fn remove(&mut self, resource: &str, feedstock_repo: &str) {
        if let Some(entries) = self.resources.get_mut(resource) {
            entries.retain(|e| e.feedstock != feedstock_repo);
        }
    }

    pub fn apply(&mut self, resource: &str, feedstock_repo: &str, action: Action) {
        match action {
            Action::Add => self.add(resource, feedstock_repo),
            Action::Remove => self.remove(resource, feedstock_repo),
        }
    }

    pub fn entries(&self, resource: &str) -> Option<&[FeedstockEntry]> {
        self.resources.get(resource).map(Vec::as_slice)
    }

    /// Serialize with the fixed layout the file has always used: 2-space
    /// mapping indent, sequence dashes indented 2 with entry content at 4.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header);
        if self.resources.is_empty() {
            out.push_str("access_control: {}\n");
            return out;
        }
        out.push_str("access_control:\n");
        for (resource, entries) in &self.resources {
            if entries.is_empty() {
                let _ = writeln!(out, "  {resource}: []");
                continue;
            }
            let _ = writeln!(out, "  {resource}:");
            for entry in entries {
                let _ = writeln!(out, "    - feedstock: {}", entry.feedstock);
            }
        }
        out
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        atomic_write(path, self.render().as_bytes())
    }
}

/// Write via a tempfile in the same directory so a crash never leaves a
/// half-written manifest behind.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
