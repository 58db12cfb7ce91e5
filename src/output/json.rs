//! JSON report output writer.
//!
//! Writes ResolutionReport structs to JSON files with proper formatting.

use super::schema::ResolutionReport;
use super::validate_output_path;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &ResolutionReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// # Errors
/// * `OutputError::ReadFailed` - File read error
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ResolutionReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let report: ResolutionReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} groups",
        report.version,
        report.groups.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Calibration, EstimatorSet};
    use crate::output::schema::GroupReport;
    use tempfile::NamedTempFile;

    fn create_test_report() -> ResolutionReport {
        ResolutionReport {
            version: "1.0.0".to_string(),
            source: "sim.root".to_string(),
            tree: "Sim".to_string(),
            total_events: 2,
            calibration: Calibration::default(),
            groups: vec![GroupReport {
                e_nu: 500.0,
                events: 2,
                means: EstimatorSet {
                    e_rec_l1: Some(100.0),
                    e_rec_q1: Some(4.1667),
                    e_rec_q2: None,
                },
                resolutions: EstimatorSet {
                    e_rec_l1: Some(0.0),
                    e_rec_q1: Some(0.5),
                    e_rec_q2: None,
                },
            }],
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.total_events, 2);
        assert_eq!(loaded.groups.len(), 1);
        assert_eq!(loaded.groups[0].resolutions.e_rec_q1, Some(0.5));
        assert_eq!(loaded.groups[0].resolutions.e_rec_q2, None);
    }

    #[test]
    fn test_undefined_resolution_serialized_as_null() {
        let report = create_test_report();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["groups"][0]["resolutions"]["e_rec_q2"].is_null());
        assert_eq!(json["groups"][0]["resolutions"]["e_rec_q1"], 0.5);
    }

    #[test]
    fn test_read_missing_report() {
        let result = read_report("/nonexistent/report.json");
        assert!(matches!(result, Err(OutputError::ReadFailed(_))));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
