//! File naming conventions shared by the stores and the driver.
//!
//! Users refer to configurations and templates by name, with or without the
//! extension:
//! - `weekly` and `weekly.json` both resolve to `config/weekly.json`
//! - `newsletter` and `newsletter.template` both resolve to
//!   `templates/newsletter.template`
//!
//! Generated emails get a timestamped name unless the caller supplies one:
//! `newsletter_20250314_091500.mjml`.

use chrono::NaiveDateTime;
use std::path::Path;

/// Extension of configuration documents.
pub const CONFIG_EXTENSION: &str = "json";

/// Append `.{ext}` to `name` unless it already ends with it.
pub fn with_extension(name: &str, ext: &str) -> String {
    let suffix = format!(".{ext}");
    if name.ends_with(&suffix) && name.len() > suffix.len() {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// File name of the configuration document called `name`.
pub fn config_file_name(name: &str) -> String {
    with_extension(name, CONFIG_EXTENSION)
}

/// Display name for a file: its stem, or the whole name if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Timestamped output name with second resolution.
///
/// `timestamped_output_name("newsletter", "mjml", t)` →
/// `"newsletter_20250314_091500.mjml"`.
pub fn timestamped_output_name(prefix: &str, ext: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, at.format("%Y%m%d_%H%M%S"), ext)
}
