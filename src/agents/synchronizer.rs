use crate::manifest::{DependencyGroup, Manifest, Verdict, VersionComparator};

/// A specifier copied from one group into another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncChange {
    pub package: String,
    pub from: DependencyGroup,
    pub to: DependencyGroup,
    pub old_specifier: String,
    pub new_specifier: String,
}

/// Tracks the changes made during a synchronization pass
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub changes: Vec<SyncChange>,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of distinct packages that were touched
    pub fn package_count(&self) -> usize {
        let mut names: Vec<&str> = self.changes.iter().map(|c| c.package.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}

/// DependencySynchronizer makes every package carry the same specifier in all
/// groups that declare it.
pub struct DependencySynchronizer;

impl DependencySynchronizer {
    /// Run one synchronization pass over the manifest.
    ///
    /// Every (group, package, other group) triple is compared once and the larger
    /// specifier is copied into the other slot right away, so a winner found early in
    /// the pass takes part in later comparisons for the same package.
    pub fn synchronize(manifest: &mut Manifest) -> SyncReport {
        let mut report = SyncReport::default();

        for group in DependencyGroup::ALL {
            for package in manifest.package_names(group) {
                for other in DependencyGroup::ALL {
                    if other == group {
                        continue;
                    }

                    let (Some(ours), Some(theirs)) = (
                        manifest.specifier(group, &package),
                        manifest.specifier(other, &package),
                    ) else {
                        continue;
                    };
                    let (ours, theirs) = (ours.to_string(), theirs.to_string());

                    let (from, to, winner, loser) = match VersionComparator::compare(&ours, &theirs)
                    {
                        Verdict::FirstLarger => (group, other, ours, theirs),
                        Verdict::SecondLarger => (other, group, theirs, ours),
                        Verdict::Tie => continue,
                    };

                    tracing::debug!(
                        "syncing {} -> {} {}: {} -> {}",
                        from,
                        to,
                        package,
                        loser,
                        winner
                    );
                    manifest.set_specifier(to, &package, &winner);
                    report.changes.push(SyncChange {
                        package: package.clone(),
                        from,
                        to,
                        old_specifier: loser,
                        new_specifier: winner,
                    });
                }
            }
        }

        report
    }
}
