use crate::manifest::DependencyGroup;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A unit of work the orchestrator reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Group(DependencyGroup),
    Synchronize,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Group(group) => write!(f, "Updating {}", group),
            Step::Synchronize => f.write_str("Syncing dependencies"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Skip,
    Fail,
}

/// Receives the outcome of every step.
pub trait Reporter {
    fn start(&mut self, step: Step);
    fn finish(&mut self, step: Step, status: Status);
    /// Called once after the last step
    fn close(&mut self) {}
}

const SYMBOL_OK: &str = " \\(*＾▽＾*)/ ";
const SYMBOL_SKIP: &str = " [> ↷ ↷ ↷ >] ";
const SYMBOL_FAIL: &str = " ~{ƒA1l-€∂// ";

const SPINNER_FRAMES: &[&str] = &[
    "▉▊▋▌▍▎▏▎▍▌▋▊▉",
    "▊▋▌▍▎▏▎▍▌▋▊▉▉",
    "▋▌▍▎▏▎▍▌▋▊▉▉▊",
    "▌▍▎▏▎▍▌▋▊▉▉▊▋",
    "▍▎▏▎▍▌▋▊▉▉▊▋▌",
    "▎▏▎▍▌▋▊▉▉▊▋▌▍",
    "▏▎▍▌▋▊▉▉▊▋▌▍▎",
    "▎▍▌▋▊▉▉▊▋▌▍▎▏",
    "▍▌▋▊▉▉▊▋▌▍▎▏▎",
    "▌▋▊▉▉▊▋▌▍▎▏▎▍",
    "▋▊▉▉▊▋▌▍▎▏▎▍▌",
    "▊▉▉▊▋▌▍▎▏▎▍▌▋",
    "▉▉▊▋▌▍▎▏▎▍▌▋▊",
];

const SPINNER_COLORS: &[&str] = &["cyan", "red", "green", "yellow", "blue", "magenta"];
const COLOR_PERIOD: Duration = Duration::from_secs(5);
const TICK: Duration = Duration::from_millis(80);

fn spinner_style(color: &str) -> ProgressStyle {
    ProgressStyle::with_template(&format!("{{spinner:.{}}} {{msg}}", color))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_FRAMES)
}

fn status_symbol(status: Status) -> String {
    match status {
        Status::Ok => SYMBOL_OK.green().to_string(),
        Status::Skip => SYMBOL_SKIP.blue().to_string(),
        Status::Fail => SYMBOL_FAIL.red().to_string(),
    }
}

/// Animated spinner for non-verbose runs.
///
/// Finished steps are printed above the spinner with their status symbol. The
/// spinner colour rotates on its own task, which is aborted on close.
pub struct SpinnerReporter {
    bar: ProgressBar,
    color_cycle: Option<JoinHandle<()>>,
}

impl SpinnerReporter {
    /// Must be called from within a tokio runtime.
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style(SPINNER_COLORS[0]));

        let color_cycle = Some(tokio::spawn(cycle_colors(bar.clone())));

        Self { bar, color_cycle }
    }
}

async fn cycle_colors(bar: ProgressBar) {
    let mut ticker = tokio::time::interval(COLOR_PERIOD);
    ticker.tick().await;
    for color in SPINNER_COLORS.iter().cycle().skip(1) {
        ticker.tick().await;
        bar.set_style(spinner_style(color));
    }
}

impl Reporter for SpinnerReporter {
    fn start(&mut self, step: Step) {
        self.bar.set_message(step.to_string());
        self.bar.enable_steady_tick(TICK);
    }

    fn finish(&mut self, step: Step, status: Status) {
        self.bar.println(format!("{} {}", status_symbol(status), step));
    }

    fn close(&mut self) {
        if let Some(handle) = self.color_cycle.take() {
            handle.abort();
        }
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if let Some(handle) = self.color_cycle.take() {
            handle.abort();
        }
    }
}

/// Sequential text output for verbose runs
#[derive(Debug, Default)]
pub struct PlainReporter;

impl Reporter for PlainReporter {
    fn start(&mut self, step: Step) {
        println!("{}", step.to_string().cyan());
    }

    fn finish(&mut self, step: Step, status: Status) {
        let label = match status {
            Status::Ok => "ok".green(),
            Status::Skip => "skipped".blue(),
            Status::Fail => "failed".red(),
        };
        println!("{} {}", step, label);
    }
}

/// Keeps every reported event; used by tests to assert on the run.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub started: Vec<Step>,
    pub finished: Vec<(Step, Status)>,
    pub closed: bool,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn start(&mut self, step: Step) {
        self.started.push(step);
    }

    fn finish(&mut self, step: Step, status: Status) {
        self.finished.push((step, status));
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
