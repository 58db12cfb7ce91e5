//! edep-resolution CLI
//!
//! Histograms deposited energy, charge and light from an edep-sim tree and
//! reports the reconstructed-energy resolution per true neutrino energy.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use edep_resolution::aggregator::Calibration;
use edep_resolution::commands::{execute_analyze, validate_args, AnalyzeArgs, PlotSelection};
use edep_resolution::utils::config::{
    DEFAULT_PLOTS_DIR, DEFAULT_PLOT_ENERGY, DEFAULT_TREE_NAME, EM_CHARGE_SCALE,
    HADRONIC_CHARGE_SCALE, L1_SCALE, Q1_SCALE,
};

/// Energy-deposition histograms and resolution for edep-sim trees
#[derive(Parser, Debug)]
#[command(name = "edep-resolution")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input event file (.root, .json, .jsonl or .ndjson)
    input: PathBuf,

    /// Plot file name, written inside the plots directory
    output: PathBuf,

    /// Tree to read from a ROOT file
    #[arg(long, default_value = DEFAULT_TREE_NAME)]
    tree: String,

    /// Directory receiving the plots
    #[arg(long, env = "EDEP_PLOTS_DIR", default_value = DEFAULT_PLOTS_DIR)]
    plots_dir: PathBuf,

    /// Neutrino energy (MeV) whose events are plotted [default: 1000]
    #[arg(short, long, conflicts_with_all = ["all_energies", "inclusive"])]
    energy: Option<f64>,

    /// Plot every neutrino energy, one file each
    #[arg(long, conflicts_with = "inclusive")]
    all_energies: bool,

    /// Plot all events together, ignoring the neutrino energy
    #[arg(long)]
    inclusive: bool,

    /// Also plot the reconstructed-energy estimators
    #[arg(long)]
    reconstructed: bool,

    /// Output path for a JSON resolution report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print resolution summary to stdout
    #[arg(long)]
    summary: bool,

    /// Light calibration: E_rec_L1 = L / scale
    #[arg(long, default_value_t = L1_SCALE)]
    l1_scale: f64,

    /// Charge calibration: E_rec_Q1 = Q / scale
    #[arg(long, default_value_t = Q1_SCALE)]
    q1_scale: f64,

    /// EM charge calibration used by E_rec_Q2
    #[arg(long, default_value_t = EM_CHARGE_SCALE)]
    em_scale: f64,

    /// Hadronic charge calibration used by E_rec_Q2
    #[arg(long, default_value_t = HADRONIC_CHARGE_SCALE)]
    had_scale: f64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Cli {
    fn selection(&self) -> PlotSelection {
        if self.inclusive {
            PlotSelection::Inclusive
        } else if self.all_energies {
            PlotSelection::AllEnergies
        } else {
            PlotSelection::Energy(self.energy.unwrap_or(DEFAULT_PLOT_ENERGY))
        }
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let selection = cli.selection();
    let args = AnalyzeArgs {
        input: cli.input,
        output: cli.output,
        tree: cli.tree,
        plots_dir: cli.plots_dir,
        selection,
        reconstructed: cli.reconstructed,
        report: cli.report,
        print_summary: cli.summary,
        calibration: Calibration {
            l1_scale: cli.l1_scale,
            q1_scale: cli.q1_scale,
            em_scale: cli.em_scale,
            hadronic_scale: cli.had_scale,
        },
    };

    // Validate args first
    validate_args(&args)?;

    execute_analyze(args)?;

    Ok(())
}
