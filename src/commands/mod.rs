//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;

// Re-export main command functions
pub use analyze::{
    deposit_series, execute_analyze, find_group, reconstructed_series, suffixed_path,
    validate_args, AnalyzeArgs, PlotSelection,
};
