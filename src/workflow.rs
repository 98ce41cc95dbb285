use crate::agents::{
    DependencySynchronizer, Installer, PatternMatcher, PlainReporter, ProjectInfo, ProjectScannerAgent,
    ReinstallPlan, Reporter, RunResult, SpinnerReporter, SyncReport, UpdateOrchestrator,
    YarnInstaller, cleanup,
};
use crate::config::Config;
use crate::error::{PkgsyncError, Result};
use crate::manifest::{DependencyGroup, ManifestStore};
use colored::Colorize;

/// Execute the update workflow
pub async fn execute_update(config: &Config) -> Result<()> {
    println!("{}", "Starting dependency update process...".cyan().bold());

    // Step 1: Validate project structure
    let project_info = validate_project(config)?;

    let installer = YarnInstaller::new(
        config.installer_program.as_str(),
        &project_info.project_path,
        config.verbose,
    );
    let mut reporter: Box<dyn Reporter> = if config.verbose {
        Box::new(PlainReporter)
    } else {
        Box::new(SpinnerReporter::new())
    };
    let result = run_update(config, &project_info, &installer, reporter.as_mut()).await?;

    // Step 5: Display summary
    print_run_result(&result);

    let report = result.sync?;
    print_sync_report(&report);

    println!(
        "\n{}",
        "✨ Update process completed successfully!".green().bold()
    );
    Ok(())
}

/// Steps 2 to 4 of the update: plan, clean, reinstall and sync.
///
/// Nothing on disk is touched when the manifest cannot be read.
async fn run_update(
    config: &Config,
    project_info: &ProjectInfo,
    installer: &dyn Installer,
    reporter: &mut dyn Reporter,
) -> Result<RunResult> {
    // Step 2: Read the manifest and work out what to reinstall
    println!("\n{}", "2. Reading package.json...".yellow());
    let store = ManifestStore::new(&project_info.manifest_path);
    let manifest = store.load().await?;
    let matcher = config
        .filter
        .as_deref()
        .map(PatternMatcher::new)
        .transpose()?;
    let plan = ReinstallPlan::from_manifest(&manifest, matcher.as_ref());
    println!(
        "   {} package(s) to reinstall across {} group(s)",
        plan.eligible_count().to_string().bright_cyan(),
        plan.groups.iter().filter(|g| !g.eligible.is_empty()).count()
    );

    // Step 3: Clear stale install state
    if config.clean {
        println!(
            "\n{}",
            "3. Removing yarn.lock and node_modules...".yellow()
        );
        let failures =
            cleanup::remove_install_state(&project_info.lockfile_path, &project_info.modules_path)
                .await;
        for failure in &failures {
            println!(
                "{}",
                format!(
                    "⚠ Could not remove {}: {}",
                    failure.path.display(),
                    failure.error
                )
                .yellow()
            );
        }
    } else {
        println!("\n{}", "3. Keeping existing install state".yellow());
    }

    // Step 4: Reinstall group by group, then sync
    println!("\n{}", "4. Updating dependency groups...".yellow());
    let orchestrator = UpdateOrchestrator::new(store);
    Ok(orchestrator.run(&plan, installer, reporter).await)
}

/// Execute the sync workflow (no reinstall)
pub async fn execute_sync(config: &Config, check: bool) -> Result<()> {
    println!(
        "{}",
        "Syncing versions across dependency groups...".cyan().bold()
    );

    let project_info = validate_project(config)?;
    let store = ManifestStore::new(&project_info.manifest_path);

    if check {
        println!("\n{}", "2. Checking package.json...".yellow());
        let mut manifest = store.load().await?;
        let report = DependencySynchronizer::synchronize(&mut manifest);
        print_sync_report(&report);

        if !report.is_empty() {
            println!("\n{}", "To apply these changes, run:".dimmed());
            println!("  {}", "pkgsync sync".cyan());
            return Err(PkgsyncError::OutOfSync(report.package_count()));
        }
        return Ok(());
    }

    println!("\n{}", "2. Syncing package.json...".yellow());
    let report = UpdateOrchestrator::new(store).synchronize().await?;
    println!("{}", "✓ package.json written".green());
    print_sync_report(&report);

    Ok(())
}

/// Execute the list workflow - show the reinstall plan
pub async fn execute_list(config: &Config, json: bool) -> Result<()> {
    let project_info = ProjectScannerAgent::new(&config.project_path).validate()?;
    let manifest = ManifestStore::new(&project_info.manifest_path)
        .load()
        .await?;
    let plan = ReinstallPlan::from_manifest(&manifest, None);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("{}", "📦 Reinstall plan:".cyan().bold());
    for group in DependencyGroup::ALL.iter().filter_map(|&g| plan.group(g)) {
        println!("\n{}:", group.group.to_string().yellow().bold());
        if group.eligible.is_empty() && group.pinned.is_empty() {
            println!("  {}", "(none)".dimmed());
            continue;
        }
        for name in &group.eligible {
            let spec = manifest.specifier(group.group, name).unwrap_or_default();
            println!("  • {} {}", name.white().bold(), spec.green());
        }
        for name in &group.pinned {
            let spec = manifest.specifier(group.group, name).unwrap_or("?");
            println!(
                "  • {} {} {}",
                name.white(),
                spec.dimmed(),
                "(pinned, skipped)".dimmed()
            );
        }
    }

    println!("\n{}", "Summary:".cyan().bold());
    println!(
        "  {} package(s) to reinstall",
        plan.eligible_count().to_string().yellow()
    );

    Ok(())
}

fn validate_project(config: &Config) -> Result<ProjectInfo> {
    println!("\n{}", "1. Validating project structure...".yellow());
    let project_info = ProjectScannerAgent::new(&config.project_path).validate()?;
    println!("{}", "✓ Project structure is valid".green());
    Ok(project_info)
}

fn print_run_result(result: &RunResult) {
    let failed = result.failed_groups();
    if failed.is_empty() {
        println!("{}", "✓ All groups processed".green());
        return;
    }

    println!(
        "{}",
        format!("⚠ {} group(s) failed to reinstall:", failed.len()).red()
    );
    for group in failed {
        println!("  • {}", group.to_string().red());
    }
}

fn print_sync_report(report: &SyncReport) {
    if report.is_empty() {
        println!("\n{}", "All dependency groups are in sync".green());
        return;
    }

    println!("\n{}", "Synced versions:".cyan().bold());
    for change in &report.changes {
        println!(
            "  • {} {} → {} ({} → {})",
            change.package.white().bold(),
            change.old_specifier.red(),
            change.new_specifier.green(),
            change.from.to_string().dimmed(),
            change.to.to_string().dimmed()
        );
    }
}
