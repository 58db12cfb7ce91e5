//! Output writers for reports and histograms.
//!
//! This module handles writing data to disk in various formats:
//! - JSON resolution reports
//! - SVG histograms
//! - Text summaries

pub mod json;
pub mod plots_dir;
pub mod schema;
pub mod summary;
pub mod svg;

// Re-export main functions
pub use json::{read_report, write_report};
pub use plots_dir::ensure_plots_dir;
pub use schema::{to_report, GroupReport, ResolutionReport};
pub use summary::{format_resolution, generate_text_summary, resolution_lines};
pub use svg::write_svg;

use crate::utils::error::OutputError;
use std::path::Path;

/// Validate that an output path is writable
///
/// Rejects empty paths and paths pointing at an existing directory.
pub fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
