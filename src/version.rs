//! Version information for the Datebook application.
//!
//! This module provides centralized access to version information,
//! ensuring consistent version reporting throughout the application.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the current application version
pub fn get_version() -> &'static str {
    VERSION
}

/// Returns a formatted version string for display purposes
pub fn get_display_version() -> String {
    format!("v{}", VERSION)
}
