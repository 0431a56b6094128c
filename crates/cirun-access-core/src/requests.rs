use crate::error::Result;
use crate::paths;
use std::path::Path;

/// One parsed request file: the resource name it was filed under and the
/// feedstocks it lists, in file order. Duplicates are kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub name: String,
    pub feedstocks: Vec<String>,
}

/// Parse a single request file. The request name is the filename stem; the
/// body is one feedstock per line, whitespace-trimmed, blank lines dropped.
pub fn parse_request_file(path: &Path) -> Result<AccessRequest> {
    let content = std::fs::read_to_string(path)?;
    let feedstocks = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(AccessRequest { name, feedstocks })
}

/// Load every pending request in `dir`, sorted by request name.
///
/// A missing directory is an empty request set, so re-running after cleanup
/// stays harmless. The template file is never a request.
pub fn load_requests(dir: &Path) -> Result<Vec<AccessRequest>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut requests = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || entry.file_name() == paths::EXAMPLE_FILE {
            continue;
        }
        requests.push(parse_request_file(&path)?);
    }
    requests.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(requests)
}
