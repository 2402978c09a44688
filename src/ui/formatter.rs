//! Pure formatting functions for terminal output.
//!
//! `format_*` functions build strings and are testable; `display_*`
//! functions print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::engine::ReleaseDecision;

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

/// One-line summary of a decision, without styling.
///
/// # Arguments
/// * `decision` - The computed decision
/// * `prefix` - Tag prefix used to render versions
/// * `dry_run` - Whether tag creation is suppressed
pub fn format_decision(decision: &ReleaseDecision, prefix: &str, dry_run: bool) -> String {
    let previous = decision
        .previous
        .as_ref()
        .map(|release| release.tag.clone())
        .unwrap_or_else(|| "no prior release".to_string());

    if !decision.is_release {
        return format!(
            "No new release: {} commit(s) since {}, current version {}",
            decision.commits_analyzed,
            previous,
            decision.tag_name(prefix)
        );
    }

    let action = if dry_run { "would be" } else { "will be" };
    format!(
        "New {} release {} tagged {} ({} commit(s) since {})",
        decision.precedence,
        action,
        decision.tag_name(prefix),
        decision.commits_analyzed,
        previous
    )
}

/// Print the decision summary and any boundary warnings.
pub fn display_decision(decision: &ReleaseDecision, prefix: &str, dry_run: bool) {
    for warning in &decision.warnings {
        display_boundary_warning(warning);
    }

    let summary = format_decision(decision, prefix, dry_run);
    if decision.is_release {
        display_success(&summary);
    } else {
        display_status(&summary);
    }
}
