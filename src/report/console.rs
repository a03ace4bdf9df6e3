use crate::runner::state::{FlowReport, StepStatus};
use crate::utils::HarnessConfig;
use colored::Colorize;

const RULE_WIDTH: usize = 70;

pub fn separator(title: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    if !title.is_empty() {
        println!("  {}", title.bold());
        println!("{}", "=".repeat(RULE_WIDTH));
    }
}

pub fn flow_banner(flow_name: &str, config: &HarnessConfig) {
    separator(&format!("▶ RUNNING {}", flow_name.to_uppercase()));
    println!("Base URL: {}", config.base_url.cyan());
    println!("Test User: {}", config.username.cyan());
    println!("Test Email: {}", config.email.cyan());
    println!(
        "Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

pub fn skipped(name: &str, reason: &str) {
    println!("\n{} Skipping {}: {}", "⏭".yellow(), name.bold(), reason);
}

pub fn note(message: &str) {
    println!("{}", message);
}

pub fn flow_summary(report: &FlowReport) {
    let summary = report.summary();

    separator(&format!("■ {} COMPLETED", report.flow_name.to_uppercase()));
    println!("  Total steps: {}", summary.total);
    println!(
        "  {} passed, {} failed, {} expected failures, {} skipped",
        summary.passed.to_string().green(),
        summary.failed.to_string().red(),
        summary.expected_failures.to_string().blue(),
        summary.skipped.to_string().yellow()
    );
    println!("  Duration: {}ms", summary.duration_ms);

    let unexpected: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, StepStatus::Failed { .. }) && !o.expected_failure)
        .collect();
    if !unexpected.is_empty() {
        println!("\n  {}", "Failed steps:".red().bold());
        for outcome in unexpected {
            if let StepStatus::Failed { error } = &outcome.status {
                println!("    {} {} - {}", "✗".red(), outcome.name, error);
            }
        }
    }

    for line in &report.notes {
        note(line);
    }
}
