//! CLI output formatting for every command.
//!
//! # Output Format
//!
//! ## generate
//!
//! ```text
//! Config      email-config-example
//!     Source: config/email-config-example.json
//! Template    newsletter
//!     Source: templates/newsletter.template
//! Rendered    4812 bytes
//! Email successfully generated: output/newsletter_20250314_091500.mjml
//! ```
//!
//! ## new-config
//!
//! ```text
//! New config created: config/march.json
//! Edit this file to customize your email content.
//! ```
//!
//! ## list-configs / list-templates
//!
//! ```text
//! Available configurations:
//!   - email-config-example
//!   - march
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::generate::Generated;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Label column padded so values line up.
fn labeled(label: &str, value: &str) -> String {
    format!("{:<12}{}", label, value)
}

/// Paths are shown relative to `base` when possible.
fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

// ============================================================================
// generate
// ============================================================================

pub fn format_generate_output(generated: &Generated, base: &Path) -> Vec<String> {
    vec![
        labeled("Config", &generated.config_name),
        format!(
            "{}Source: {}",
            indent(1),
            display_path(&generated.config_path, base)
        ),
        labeled("Template", &generated.template_name),
        format!(
            "{}Source: {}",
            indent(1),
            display_path(&generated.template_path, base)
        ),
        labeled("Rendered", &format!("{} bytes", generated.bytes)),
        format!(
            "Email successfully generated: {}",
            display_path(&generated.output_path, base)
        ),
    ]
}

pub fn print_generate_output(generated: &Generated, base: &Path) {
    for line in format_generate_output(generated, base) {
        println!("{}", line);
    }
}

// ============================================================================
// new-config
// ============================================================================

pub fn format_new_config_output(path: &Path, base: &Path) -> Vec<String> {
    vec![
        format!("New config created: {}", display_path(path, base)),
        "Edit this file to customize your email content.".to_string(),
    ]
}

pub fn print_new_config_output(path: &Path, base: &Path) {
    for line in format_new_config_output(path, base) {
        println!("{}", line);
    }
}

// ============================================================================
// Listings
// ============================================================================

fn format_listing(names: &[String], heading: &str, empty: &str) -> Vec<String> {
    if names.is_empty() {
        return vec![empty.to_string()];
    }
    let mut lines = vec![heading.to_string()];
    lines.extend(names.iter().map(|n| format!("  - {}", n)));
    lines
}

pub fn format_config_list(names: &[String]) -> Vec<String> {
    format_listing(
        names,
        "Available configurations:",
        "No configuration files found.",
    )
}

pub fn format_template_list(names: &[String]) -> Vec<String> {
    format_listing(names, "Available templates:", "No template files found.")
}

pub fn print_config_list(names: &[String]) {
    for line in format_config_list(names) {
        println!("{}", line);
    }
}

pub fn print_template_list(names: &[String]) {
    for line in format_template_list(names) {
        println!("{}", line);
    }
}
