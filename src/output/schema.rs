//! JSON report schema for per-energy resolution results.
//!
//! Schema is versioned to allow future evolution.

use crate::aggregator::{mean, Calibration, EnergyGroups, EstimatorSet, GroupAggregate};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the events were read from
    pub source: String,

    /// Tree name inside the input
    pub tree: String,

    /// Events across all groups
    pub total_events: usize,

    /// Calibration used for the estimators
    pub calibration: Calibration,

    /// One entry per `E_nu`, ascending
    pub groups: Vec<GroupReport>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Summary of one `E_nu` group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    pub e_nu: f64,
    pub events: usize,

    /// Mean reconstructed energy per estimator; `null` if empty or non-finite
    pub means: EstimatorSet<Option<f64>>,

    /// Coefficient of variation per estimator; `null` where undefined
    pub resolutions: EstimatorSet<Option<f64>>,
}

impl GroupReport {
    pub fn from_group(group: &GroupAggregate) -> Self {
        Self {
            e_nu: group.e_nu(),
            events: group.events(),
            means: group
                .reconstructed()
                .map(|values| mean(values).filter(|m| m.is_finite())),
            resolutions: group.resolutions().clone(),
        }
    }
}

/// Build the report for a finished aggregation
pub fn to_report(
    groups: &EnergyGroups,
    source: impl Into<String>,
    tree: impl Into<String>,
    calibration: &Calibration,
) -> ResolutionReport {
    let groups: Vec<GroupReport> = groups.values().map(GroupReport::from_group).collect();

    ResolutionReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        tree: tree.into(),
        total_events: groups.iter().map(|g| g.events).sum(),
        calibration: *calibration,
        groups,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}
