use crate::error::{PkgsyncError, Result};
use crate::manifest::{DependencyGroup, Manifest, is_ranged};
use regex::Regex;
use serde::Serialize;

/// Packages of one group the installer should reinstall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupPlan {
    pub group: DependencyGroup,
    /// Ranged entries, in declaration order
    pub eligible: Vec<String>,
    /// Exact pins, left alone by the installer
    pub pinned: Vec<String>,
}

/// Read-only view of what needs reinstalling, derived from a loaded manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReinstallPlan {
    pub groups: Vec<GroupPlan>,
}

impl ReinstallPlan {
    pub fn from_manifest(manifest: &Manifest, filter: Option<&PatternMatcher>) -> Self {
        let groups = DependencyGroup::ALL
            .iter()
            .map(|&group| {
                let mut eligible = Vec::new();
                let mut pinned = Vec::new();

                for name in manifest.package_names(group) {
                    if filter.is_some_and(|f| !f.matches(&name)) {
                        continue;
                    }

                    match manifest.specifier(group, &name) {
                        Some(spec) if is_ranged(spec) => eligible.push(name),
                        _ => {
                            tracing::debug!("skipping {}", name);
                            pinned.push(name);
                        }
                    }
                }

                GroupPlan {
                    group,
                    eligible,
                    pinned,
                }
            })
            .collect();

        Self { groups }
    }

    pub fn group(&self, group: DependencyGroup) -> Option<&GroupPlan> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn eligible_count(&self) -> usize {
        self.groups.iter().map(|g| g.eligible.len()).sum()
    }
}

/// Case-insensitive glob over package names
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(PkgsyncError::ProjectValidation(
                "Filter pattern cannot be empty".to_string(),
            ));
        }

        let adjusted = if trimmed.contains(['*', '?']) {
            trimmed.to_string()
        } else {
            format!("*{}*", trimmed)
        };

        let regex = Self::compile_glob(&adjusted)?;
        Ok(Self { regex })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    fn compile_glob(pattern: &str) -> Result<Regex> {
        let mut regex = String::from("(?i)^");
        for ch in pattern.chars() {
            match ch {
                '*' => regex.push_str(".*"),
                '?' => regex.push('.'),
                _ => regex.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4]))),
            }
        }
        regex.push('$');

        Regex::new(&regex).map_err(|e| {
            PkgsyncError::ProjectValidation(format!("Invalid filter pattern '{}': {}", pattern, e))
        })
    }
}
