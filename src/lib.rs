//! edep-resolution
//!
//! Energy-deposition histograms and reconstructed-energy resolution
//! for edep-sim analysis trees.
//!
//! This crate provides the core implementation for the
//! `edep-resolution` CLI tool: events are grouped by true neutrino
//! energy, three reconstructed-energy estimators are derived from
//! calibration constants, and each estimator's resolution (stddev / mean)
//! is reported per group.
//!
//! ## Getting Started
//!
//! ```bash
//! edep-resolution sim.root energy_depo_hist.svg --summary
//! edep-resolution --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod histogram;
pub mod output;
pub mod reader;
pub mod utils;
