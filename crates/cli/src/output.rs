//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use preset_lib::{ApplySummary, Preset, ProgressSink, ScaleEvent, Violation, WorkloadKind};
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Sink that renders each scale event as an immediate status line.
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, event: ScaleEvent) {
        match event {
            ScaleEvent::Captured {
                kind,
                name,
                replicas,
            } => print_success(&format!("Captured {kind} {name} at {replicas} replicas")),
            ScaleEvent::ListFailed { kind, error } => {
                print_error(&format!("Could not fetch {kind}s: {error}"))
            }
            ScaleEvent::KindCaptured { kind, count } => {
                print_info(&format!("Processed {count} {kind}s"))
            }
            ScaleEvent::Scaled {
                kind,
                name,
                replicas,
            } => print_success(&format!("Scaled {kind} {name} to {replicas}")),
            ScaleEvent::WouldScale {
                kind,
                name,
                current,
                target,
            } => print_info(&format!(
                "Would scale {kind} {name} from {current} to {target}"
            )),
            ScaleEvent::Missing { kind, name } => {
                print_warning(&format!("{kind} {name} not found, skipping"))
            }
            ScaleEvent::ScaleFailed { kind, name, error } => {
                print_error(&format!("Could not scale {kind} {name}: {error}"))
            }
            ScaleEvent::KindApplied { kind, count } => {
                print_info(&format!("Processed {count} {kind}s"))
            }
        }
    }
}

/// Row for the captured-resources table
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Replicas")]
    replicas: i32,
}

/// Print the contents of a preset as a table
pub fn print_preset_table(preset: &Preset) {
    let rows: Vec<ResourceRow> = preset
        .deployments
        .iter()
        .map(|r| (r, WorkloadKind::Deployment))
        .chain(
            preset
                .stateful_sets
                .iter()
                .map(|r| (r, WorkloadKind::StatefulSet)),
        )
        .map(|(r, kind)| ResourceRow {
            kind: kind.to_string(),
            name: r.name.clone(),
            replicas: r.replicas,
        })
        .collect();

    if rows.is_empty() {
        print_warning("No scalable workloads captured");
        return;
    }

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Row for the validation-violations table
#[derive(Tabled)]
struct ViolationRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// Print validation violations as a table
pub fn print_violations(violations: &[Violation]) {
    print_error("Preset failed validation");
    let rows: Vec<ViolationRow> = violations
        .iter()
        .map(|v| ViolationRow {
            field: v.field.clone(),
            reason: v.reason.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print the per-entry outcome counts of an apply run
pub fn print_apply_summary(summary: &ApplySummary) {
    let line = format!(
        "Scaled {} workloads, {} missing, {} failed",
        summary.scaled, summary.missing, summary.failed
    );
    if summary.failed > 0 {
        print_warning(&line);
    } else {
        print_success(&line);
    }
}
