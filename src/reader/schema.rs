//! Event record layout of the edep-sim analysis tree.
//!
//! Field names on disk follow the branch names written by the edep-sim
//! writer; the Rust side uses snake_case.

use serde::{Deserialize, Serialize};

/// One simulated interaction with its deposited-energy measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// True neutrino energy (MeV), the grouping key
    #[serde(rename = "E_nu")]
    pub e_nu: f64,

    /// Energy available for deposition (MeV)
    #[serde(rename = "E_avail")]
    pub e_avail: f64,

    /// Total deposited energy (MeV)
    #[serde(rename = "E_depoTotal")]
    pub e_depo_total: f64,

    /// Total deposited charge (MeV-equivalent)
    #[serde(rename = "Q_depoTotal")]
    pub q_depo_total: f64,

    /// Deposited charge counting only steps with dQ > 75 keV
    #[serde(rename = "Q_depoTotal_th_75keV")]
    pub q_depo_total_th_75kev: f64,

    /// Scintillation light at 180 PE/MeV (MIPs, 0.5 kV/cm, Birks)
    #[serde(rename = "L_depoTotal_avg_180PEpMeV")]
    pub l_depo_total: f64,

    /// Deposited charge per particle type, indexed 0-7
    #[serde(rename = "Q_depoList")]
    pub q_depo_list: Vec<f64>,
}
