//! Pure formatting functions for UI output.
//!
//! Everything the operator reads goes through here; diagnostics go through
//! `tracing` instead.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::publisher::{ModuleReport, PublishState};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One line describing how a module ended.
pub fn format_module_report(report: &ModuleReport) -> String {
    match (report.state, report.tag.as_deref()) {
        (PublishState::Done, Some(tag)) => match report.previous_tag.as_deref() {
            Some(previous) => format!(
                "Module {} pushed and tagged {} (was {})",
                report.module, tag, previous
            ),
            None => format!("Module {} pushed and tagged {}", report.module, tag),
        },
        (state, _) => format!("Module {}: {}", report.module, state),
    }
}

/// Print the warnings and outcome of a finished module.
pub fn display_module_report(report: &ModuleReport) {
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }

    if report.state == PublishState::Done {
        display_success(&format_module_report(report));
    } else {
        display_status(&format_module_report(report));
    }
}

/// Print the end-of-run tally.
pub fn display_summary(reports: &[ModuleReport]) {
    let tagged = reports
        .iter()
        .filter(|r| r.state == PublishState::Done)
        .count();

    println!(
        "\n{} {} module(s) processed, {} tagged, {} unchanged\n",
        style("✓").green(),
        reports.len(),
        tagged,
        reports.len() - tagged
    );
}
