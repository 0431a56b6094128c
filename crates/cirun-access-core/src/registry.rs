//! The compiled-in mapping from request file names to cirun resource
//! configurations. This is the single source of truth for which request
//! names are valid.

/// Suffix appended to a bare feedstock name to form its repository name.
pub const FEEDSTOCK_SUFFIX: &str = "-feedstock";

/// Cirun resource configuration a request file name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceMapping {
    /// Cirun resource identifier passed to `register-ci`.
    pub resource: &'static str,
    /// Policy qualifiers restricting when the grant applies. Currently only
    /// `pull_request` is meaningful.
    pub policy_args: &'static [&'static str],
}

const RESOURCE_TABLE: &[(&str, ResourceMapping)] = &[
    (
        "cirun-gpu-runner",
        ResourceMapping {
            resource: "cirun-gpu-runner",
            policy_args: &[],
        },
    ),
    (
        "cirun-gpu-runner-pr",
        ResourceMapping {
            resource: "cirun-gpu-runner",
            policy_args: &["pull_request"],
        },
    ),
];

/// Look up the resource configuration for a request file name.
pub fn lookup(name: &str) -> Option<&'static ResourceMapping> {
    RESOURCE_TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, mapping)| mapping)
}

/// Every request name the registry accepts.
pub fn known_names() -> Vec<&'static str> {
    RESOURCE_TABLE.iter().map(|(key, _)| *key).collect()
}

/// Full repository name for a feedstock, e.g. `scipy` -> `scipy-feedstock`.
pub fn feedstock_repo_name(feedstock: &str) -> String {
    format!("{feedstock}{FEEDSTOCK_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_runner_has_no_policy_args() {
        let mapping = lookup("cirun-gpu-runner").unwrap();
        assert_eq!(mapping.resource, "cirun-gpu-runner");
        assert!(mapping.policy_args.is_empty());
    }

    #[test]
    fn pr_variant_maps_to_the_same_resource() {
        let mapping = lookup("cirun-gpu-runner-pr").unwrap();
        assert_eq!(mapping.resource, "cirun-gpu-runner");
        assert_eq!(mapping.policy_args, &["pull_request"]);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(lookup("cirun-tpu-runner").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn known_names_lists_the_table_keys() {
        assert_eq!(
            known_names(),
            vec!["cirun-gpu-runner", "cirun-gpu-runner-pr"]
        );
    }

    #[test]
    fn repo_name_appends_the_feedstock_suffix() {
        assert_eq!(feedstock_repo_name("scipy"), "scipy-feedstock");
    }
}
