pub mod store;
pub mod version;

pub use store::ManifestStore;
pub use version::{Verdict, VersionComparator, is_ranged};

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// File name of the manifest inside a project directory.
pub const MANIFEST_FILE: &str = "package.json";

/// A declaration group of the manifest.
///
/// The order of [`DependencyGroup::ALL`] decides both the visiting order of the
/// synchronizer and the order in which groups are reinstalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DependencyGroup {
    #[serde(rename = "dependencies")]
    Normal,
    #[serde(rename = "devDependencies")]
    Dev,
    #[serde(rename = "peerDependencies")]
    Peer,
    #[serde(rename = "optionalDependencies")]
    Optional,
}

impl DependencyGroup {
    pub const ALL: [DependencyGroup; 4] = [
        DependencyGroup::Normal,
        DependencyGroup::Dev,
        DependencyGroup::Peer,
        DependencyGroup::Optional,
    ];

    /// Key of the group inside the manifest
    pub fn key(self) -> &'static str {
        match self {
            DependencyGroup::Normal => "dependencies",
            DependencyGroup::Dev => "devDependencies",
            DependencyGroup::Peer => "peerDependencies",
            DependencyGroup::Optional => "optionalDependencies",
        }
    }

    pub fn selector(self) -> GroupSelector {
        match self {
            DependencyGroup::Normal => GroupSelector::None,
            DependencyGroup::Dev => GroupSelector::Dev,
            DependencyGroup::Peer => GroupSelector::Peer,
            DependencyGroup::Optional => GroupSelector::Optional,
        }
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Tells the installer which group the packages are added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSelector {
    None,
    Dev,
    Peer,
    Optional,
}

impl GroupSelector {
    /// yarn flag for the group; the normal group takes none
    pub fn flag(self) -> Option<&'static str> {
        match self {
            GroupSelector::None => None,
            GroupSelector::Dev => Some("-D"),
            GroupSelector::Peer => Some("-P"),
            GroupSelector::Optional => Some("-O"),
        }
    }
}

/// The parsed `package.json`. Key order is kept as read.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(root) => Some(Self { root }),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// The declarations of a group, if the manifest has that group as an object
    pub fn group(&self, group: DependencyGroup) -> Option<&Map<String, Value>> {
        self.root.get(group.key()).and_then(Value::as_object)
    }

    fn group_mut(&mut self, group: DependencyGroup) -> Option<&mut Map<String, Value>> {
        self.root.get_mut(group.key()).and_then(Value::as_object_mut)
    }

    /// Package names declared in a group, in declaration order
    pub fn package_names(&self, group: DependencyGroup) -> Vec<String> {
        self.group(group)
            .map(|g| g.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The specifier of a package, when it is a non-empty string
    pub fn specifier(&self, group: DependencyGroup, package: &str) -> Option<&str> {
        self.group(group)
            .and_then(|g| g.get(package))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Overwrite the specifier of a package already declared in `group`.
    /// Returns false when the group or package is missing.
    pub fn set_specifier(&mut self, group: DependencyGroup, package: &str, specifier: &str) -> bool {
        match self.group_mut(group).and_then(|g| g.get_mut(package)) {
            Some(slot) => {
                *slot = Value::String(specifier.to_string());
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_have_fixed_order() {
        let keys: Vec<&str> = DependencyGroup::ALL.iter().map(|g| g.key()).collect();
        assert_eq!(
            keys,
            vec![
                "dependencies",
                "devDependencies",
                "peerDependencies",
                "optionalDependencies"
            ]
        );
    }

    #[test]
    fn selector_flags() {
        assert_eq!(DependencyGroup::Normal.selector().flag(), None);
        assert_eq!(DependencyGroup::Dev.selector().flag(), Some("-D"));
        assert_eq!(DependencyGroup::Peer.selector().flag(), Some("-P"));
        assert_eq!(DependencyGroup::Optional.selector().flag(), Some("-O"));
    }

    #[test]
    fn specifier_ignores_non_strings() {
        let manifest = Manifest::from_value(json!({
            "dependencies": { "a": "^1.0.0", "b": 3, "c": "" },
            "devDependencies": ["not", "an", "object"]
        }))
        .unwrap();

        assert_eq!(manifest.specifier(DependencyGroup::Normal, "a"), Some("^1.0.0"));
        assert_eq!(manifest.specifier(DependencyGroup::Normal, "b"), None);
        assert_eq!(manifest.specifier(DependencyGroup::Normal, "c"), None);
        assert!(manifest.group(DependencyGroup::Dev).is_none());
        assert!(manifest.package_names(DependencyGroup::Peer).is_empty());
    }

    #[test]
    fn set_specifier_only_touches_existing_entries() {
        let mut manifest = Manifest::from_value(json!({
            "dependencies": { "a": "^1.0.0" }
        }))
        .unwrap();

        assert!(manifest.set_specifier(DependencyGroup::Normal, "a", "2.0.0"));
        assert!(!manifest.set_specifier(DependencyGroup::Normal, "b", "2.0.0"));
        assert!(!manifest.set_specifier(DependencyGroup::Dev, "a", "2.0.0"));
        assert_eq!(manifest.specifier(DependencyGroup::Normal, "a"), Some("2.0.0"));
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(Manifest::from_value(json!([1, 2, 3])).is_none());
    }
}
