//! Reconstructed-energy estimators and their resolution.
//!
//! Three estimators are derived per group:
//! - `E_rec_L1` from scintillation light
//! - `E_rec_Q1` from total charge
//! - `E_rec_Q2` from charge split into EM and hadronic components
//!
//! Resolution is the coefficient of variation (population stddev / mean)
//! of an estimator's distribution.

use crate::utils::config::{EM_CHARGE_SCALE, HADRONIC_CHARGE_SCALE, L1_SCALE, Q1_SCALE};
use crate::utils::error::AggregateError;
use serde::{Deserialize, Serialize};

/// Visible-energy fractions used to undo detector response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Light per unit true energy (`E_rec_L1 = L / l1_scale`)
    pub l1_scale: f64,

    /// Charge per unit true energy (`E_rec_Q1 = Q / q1_scale`)
    pub q1_scale: f64,

    /// EM charge per unit EM energy
    pub em_scale: f64,

    /// Hadronic charge per unit hadronic energy
    pub hadronic_scale: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            l1_scale: L1_SCALE,
            q1_scale: Q1_SCALE,
            em_scale: EM_CHARGE_SCALE,
            hadronic_scale: HADRONIC_CHARGE_SCALE,
        }
    }
}

impl Calibration {
    /// Names and values of every scale, for validation and reporting
    pub fn scales(&self) -> [(&'static str, f64); 4] {
        [
            ("l1_scale", self.l1_scale),
            ("q1_scale", self.q1_scale),
            ("em_scale", self.em_scale),
            ("hadronic_scale", self.hadronic_scale),
        ]
    }

    /// True when every scale is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.scales()
            .iter()
            .all(|(_, scale)| scale.is_finite() && *scale > 0.0)
    }
}

/// One value per reconstructed-energy estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorSet<T> {
    pub e_rec_l1: T,
    pub e_rec_q1: T,
    pub e_rec_q2: T,
}

impl<T> EstimatorSet<T> {
    /// Estimator names paired with their values, in display order
    pub fn named(&self) -> [(&'static str, &T); 3] {
        [
            ("E_rec_L1", &self.e_rec_l1),
            ("E_rec_Q1", &self.e_rec_q1),
            ("E_rec_Q2", &self.e_rec_q2),
        ]
    }

    pub fn map<U, F: Fn(&T) -> U>(&self, f: F) -> EstimatorSet<U> {
        EstimatorSet {
            e_rec_l1: f(&self.e_rec_l1),
            e_rec_q1: f(&self.e_rec_q1),
            e_rec_q2: f(&self.e_rec_q2),
        }
    }
}

/// Reconstructed-energy distributions of one group
pub type ReconstructedEnergies = EstimatorSet<Vec<f64>>;

/// Resolution per estimator; `None` where the statistic is undefined
pub type Resolutions = EstimatorSet<Option<f64>>;

/// Derive the three estimators elementwise
///
/// `light`, `charge`, `em_charge` and `hadronic_charge` must be parallel
/// arrays of one group.
pub fn reconstruct_energies(
    light: &[f64],
    charge: &[f64],
    em_charge: &[f64],
    hadronic_charge: &[f64],
    calibration: &Calibration,
) -> ReconstructedEnergies {
    EstimatorSet {
        e_rec_l1: light.iter().map(|l| l / calibration.l1_scale).collect(),
        e_rec_q1: charge.iter().map(|q| q / calibration.q1_scale).collect(),
        e_rec_q2: em_charge
            .iter()
            .zip(hadronic_charge)
            .map(|(q_e, q_h)| q_e / calibration.em_scale + q_h / calibration.hadronic_scale)
            .collect(),
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N)
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Coefficient of variation of a distribution
///
/// **Public** - the resolution metric
///
/// # Errors
/// * `AggregateError::EmptyDistribution` - no values
/// * `AggregateError::ZeroMean` - mean is exactly zero
/// * `AggregateError::NonFinite` - a NaN or infinite value, or overflow
pub fn calculate_resolution(values: &[f64]) -> Result<f64, AggregateError> {
    let mean = mean(values).ok_or(AggregateError::EmptyDistribution)?;
    if !mean.is_finite() {
        return Err(AggregateError::NonFinite);
    }
    if mean == 0.0 {
        return Err(AggregateError::ZeroMean);
    }
    let std_dev = population_std_dev(values).ok_or(AggregateError::EmptyDistribution)?;

    let resolution = std_dev / mean;
    if !resolution.is_finite() {
        return Err(AggregateError::NonFinite);
    }
    Ok(resolution)
}
