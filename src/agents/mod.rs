pub mod cleanup;
pub mod installer;
pub mod orchestrator;
pub mod plan;
pub mod project_scanner;
pub mod reporter;
pub mod synchronizer;

pub use installer::{Installer, YarnInstaller};
pub use orchestrator::{RunResult, UpdateOrchestrator};
pub use plan::{PatternMatcher, ReinstallPlan};
pub use project_scanner::{ProjectInfo, ProjectScannerAgent};
pub use reporter::{PlainReporter, Reporter, SpinnerReporter};
pub use synchronizer::{DependencySynchronizer, SyncReport};
