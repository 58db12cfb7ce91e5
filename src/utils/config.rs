//! Configuration and constants for the CLI.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Tree written by the edep-sim writer
pub const DEFAULT_TREE_NAME: &str = "Sim";

/// Directory all plots are written into
pub const DEFAULT_PLOTS_DIR: &str = "./plots";

/// Neutrino energy (MeV) plotted when none is requested
pub const DEFAULT_PLOT_ENERGY: f64 = 1000.0;

/// Bin count shared by every histogram
pub const HISTOGRAM_BINS: usize = 100;

// Calibration constants: visible fraction of the true energy per estimator
pub const L1_SCALE: f64 = 0.42;
pub const Q1_SCALE: f64 = 0.48;
pub const EM_CHARGE_SCALE: f64 = 0.55;
pub const HADRONIC_CHARGE_SCALE: f64 = 0.31;

/// Number of particle-type categories in `Q_depoList`
pub const PARTICLE_TYPES: usize = 8;

// Gammas count as electromagnetic; alphas and "other" count as hadronic.
pub const EM_INDICES: [usize; 3] = [0, 4, 5];
pub const HADRONIC_INDICES: [usize; 5] = [1, 2, 3, 6, 7];

// Branch names in the simulation tree
pub const BRANCH_E_NU: &str = "E_nu";
pub const BRANCH_E_AVAIL: &str = "E_avail";
pub const BRANCH_E_DEPO_TOTAL: &str = "E_depoTotal";
pub const BRANCH_Q_DEPO_TOTAL: &str = "Q_depoTotal";
pub const BRANCH_Q_DEPO_TOTAL_TH: &str = "Q_depoTotal_th_75keV";
pub const BRANCH_L_DEPO_TOTAL: &str = "L_depoTotal_avg_180PEpMeV";
pub const BRANCH_Q_DEPO_LIST: &str = "Q_depoList";

/// Scalar branches, in `EventRecord` field order
pub const SCALAR_BRANCHES: [&str; 6] = [
    BRANCH_E_NU,
    BRANCH_E_AVAIL,
    BRANCH_E_DEPO_TOTAL,
    BRANCH_Q_DEPO_TOTAL,
    BRANCH_Q_DEPO_TOTAL_TH,
    BRANCH_L_DEPO_TOTAL,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_indices_partition_all_types() {
        let mut seen = [false; PARTICLE_TYPES];
        for i in EM_INDICES.iter().chain(HADRONIC_INDICES.iter()) {
            assert!(!seen[*i], "index {} listed twice", i);
            seen[*i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
