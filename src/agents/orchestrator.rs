use crate::agents::installer::Installer;
use crate::agents::plan::ReinstallPlan;
use crate::agents::reporter::{Reporter, Status, Step};
use crate::agents::synchronizer::{DependencySynchronizer, SyncReport};
use crate::error::Result;
use crate::manifest::{DependencyGroup, ManifestStore};

/// Outcome of a whole update run
#[derive(Debug)]
pub struct RunResult {
    pub groups: Vec<(DependencyGroup, Status)>,
    /// The final synchronization; an error here means the manifest was not written.
    pub sync: Result<SyncReport>,
}

impl RunResult {
    pub fn failed_groups(&self) -> Vec<DependencyGroup> {
        self.groups
            .iter()
            .filter(|(_, status)| *status == Status::Fail)
            .map(|(group, _)| *group)
            .collect()
    }
}

/// UpdateOrchestrator reinstalls each group in turn, then synchronizes versions.
pub struct UpdateOrchestrator {
    store: ManifestStore,
}

impl UpdateOrchestrator {
    pub fn new(store: ManifestStore) -> Self {
        Self { store }
    }

    /// Process every group of the plan, one installer call at a time.
    ///
    /// A failing group is reported and the run moves on. The final synchronization
    /// always runs against a freshly loaded manifest, so versions written by the
    /// installer are picked up.
    pub async fn run(
        &self,
        plan: &ReinstallPlan,
        installer: &dyn Installer,
        reporter: &mut dyn Reporter,
    ) -> RunResult {
        let mut groups = Vec::with_capacity(plan.groups.len());

        for group_plan in &plan.groups {
            let step = Step::Group(group_plan.group);
            reporter.start(step);

            let status = if group_plan.eligible.is_empty() {
                Status::Skip
            } else {
                match installer
                    .invoke(group_plan.group.selector(), &group_plan.eligible)
                    .await
                {
                    Ok(0) => Status::Ok,
                    Ok(code) => {
                        tracing::warn!("{} install exited with status {}", group_plan.group, code);
                        Status::Fail
                    }
                    Err(e) => {
                        tracing::warn!("{} install failed: {}", group_plan.group, e);
                        Status::Fail
                    }
                }
            };

            reporter.finish(step, status);
            groups.push((group_plan.group, status));
        }

        reporter.start(Step::Synchronize);
        let sync = self.synchronize().await;
        let status = if sync.is_ok() { Status::Ok } else { Status::Fail };
        reporter.finish(Step::Synchronize, status);
        reporter.close();

        RunResult { groups, sync }
    }

    /// Load, synchronize and persist the manifest once
    pub async fn synchronize(&self) -> Result<SyncReport> {
        tracing::info!("Syncing dependencies");
        let mut manifest = self.store.load().await?;
        let report = DependencySynchronizer::synchronize(&mut manifest);
        self.store.persist(&manifest).await?;
        Ok(report)
    }
}
