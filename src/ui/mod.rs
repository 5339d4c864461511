//! User interface module - terminal output for the release workflow.
//!
//! Releases never prompt; everything here only prints.

pub mod formatter;

pub use formatter::{
    display_dry_run, display_error, display_released, display_status, display_success,
    display_version_change, display_warning, dry_run_line,
};
