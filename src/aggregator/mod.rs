//! Aggregation of event records into per-energy groups and resolutions.
//!
//! This module transforms the event tree into:
//! - Raw deposited-energy spectra grouped by `E_nu`
//! - EM / hadronic charge partitions
//! - Reconstructed-energy estimators and their resolution

pub mod energy_groups;
pub mod resolution;

// Re-export main types and functions
pub use energy_groups::{
    aggregate_events, split_charge, ChargePartition, DepositSpectra, EnergyGroups, EnergyKey,
    GroupAggregate,
};
pub use resolution::{
    calculate_resolution, mean, population_std_dev, reconstruct_energies, Calibration,
    EstimatorSet, ReconstructedEnergies, Resolutions,
};
