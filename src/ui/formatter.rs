//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic. Functions that build
//! text are separated from the ones that print it so the text is testable.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::domain::Version;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").for_stderr().red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal release warning.
pub fn display_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").for_stderr().yellow(), warning);
}

/// Display the version change about to be released.
pub fn display_version_change(old: &Version, new: &Version) {
    println!("\n{}", style("Version bump:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

/// Prefix a planned step for dry-run output.
pub fn dry_run_line(step: &str) -> String {
    format!("[dry-run] {}", step)
}

/// Print every planned step of a dry run.
pub fn display_dry_run(steps: &[String]) {
    for step in steps {
        println!("{}", style(dry_run_line(step)).dim());
    }
}

/// Display the final summary after a release.
pub fn display_released(tag: &str, old: &Version, pushed: bool) {
    let suffix = if pushed { "" } else { " (not pushed)" };
    println!(
        "\n{} Released {} (was {}){}\n",
        style("✓").green(),
        style(tag).bold(),
        old,
        suffix
    );
}
