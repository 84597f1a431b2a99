//! Output formatting utilities for CLI messages.
//!
//! stdout belongs to pipelines and the host protocol, so every message here
//! goes to stderr.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, white for messages
//! - **Quiet by default**: Only failures are printed

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
///
/// # Colors
/// - "✕ Error:" in red
/// - Message in white
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}
