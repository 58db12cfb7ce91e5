//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Prepares the plots directory
//! 2. Reads the event tree
//! 3. Groups events by E_nu and derives resolutions
//! 4. Renders the requested histograms
//! 5. Writes the optional JSON report and text summary

use crate::aggregator::{
    aggregate_events, Calibration, DepositSpectra, EnergyGroups, EnergyKey, GroupAggregate,
};
use crate::histogram::{render_histograms, HistogramConfig, HistogramSeries};
use crate::output::{
    ensure_plots_dir, generate_text_summary, resolution_lines, to_report, write_report,
};
use crate::reader::{open_event_tree, ReadOptions};
use crate::utils::config::{DEFAULT_PLOTS_DIR, DEFAULT_PLOT_ENERGY, DEFAULT_TREE_NAME};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Which events end up in the deposited-energy plots
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotSelection {
    /// The group with this E_nu (MeV)
    Energy(f64),
    /// One plot per group
    AllEnergies,
    /// Every event in one plot, ignoring E_nu
    Inclusive,
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Input event file
    pub input: PathBuf,

    /// Plot file name, placed inside `plots_dir`
    pub output: PathBuf,

    /// Tree name inside a ROOT input
    pub tree: String,

    /// Directory receiving the plots
    pub plots_dir: PathBuf,

    pub selection: PlotSelection,

    /// Also plot the reconstructed-energy estimators
    pub reconstructed: bool,

    /// Output path for the JSON report (optional)
    pub report: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    pub calibration: Calibration,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("energy_depo_hist.svg"),
            tree: DEFAULT_TREE_NAME.to_string(),
            plots_dir: PathBuf::from(DEFAULT_PLOTS_DIR),
            selection: PlotSelection::Energy(DEFAULT_PLOT_ENERGY),
            reconstructed: false,
            report: None,
            print_summary: false,
            calibration: Calibration::default(),
        }
    }
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Must specify an input file to make histograms from");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output file name cannot be empty");
    }

    if args.tree.is_empty() {
        anyhow::bail!("Tree name cannot be empty");
    }

    if let PlotSelection::Energy(e_nu) = args.selection {
        if !e_nu.is_finite() {
            anyhow::bail!("Energy must be a finite number of MeV");
        }
    }

    if !args.calibration.is_valid() {
        let scales: Vec<String> = args
            .calibration
            .scales()
            .iter()
            .map(|(name, scale)| format!("{}={}", name, scale))
            .collect();
        anyhow::bail!(
            "Calibration scales must be positive and finite, got {}",
            scales.join(", ")
        );
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input or missing branches
/// * `Q_depoList` shorter than 8 entries
/// * Requested energy not present in the input
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing {}", args.input.display());

    ensure_plots_dir(&args.plots_dir).context("Failed to prepare plots directory")?;

    let options = ReadOptions {
        tree: args.tree.clone(),
    };
    let tree = open_event_tree(&args.input, &options)
        .with_context(|| format!("Failed to read events from {}", args.input.display()))?;

    let needs_groups = args.selection != PlotSelection::Inclusive
        || args.report.is_some()
        || args.print_summary;

    let groups = if needs_groups {
        let groups = aggregate_events(tree.events(), &args.calibration)
            .context("Failed to aggregate events")?;
        info!("Found {} distinct E_nu values", groups.len());
        log_resolutions(&groups);
        Some(groups)
    } else {
        None
    };

    let output_path = args.plots_dir.join(&args.output);

    match (args.selection, &groups) {
        (PlotSelection::Inclusive, _) => {
            let spectra = DepositSpectra::from_events(tree.events());
            let config = HistogramConfig::new().with_title("All events");
            render_histograms(&deposit_series(&spectra), &output_path, &config)
                .context("Failed to render histograms")?;
        }
        (PlotSelection::Energy(e_nu), Some(groups)) => {
            let group = find_group(groups, e_nu)?;
            plot_group(group, &output_path, args.reconstructed)?;
        }
        (PlotSelection::AllEnergies, Some(groups)) => {
            for (key, group) in groups {
                let path = suffixed_path(&output_path, &format!("_E{}", key));
                plot_group(group, &path, args.reconstructed)?;
            }
        }
        (_, None) => anyhow::bail!("Events were not grouped by E_nu"),
    }

    if let (Some(report_path), Some(groups)) = (&args.report, &groups) {
        let report = to_report(
            groups,
            args.input.display().to_string(),
            tree.name(),
            &args.calibration,
        );
        write_report(&report, report_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", report_path.display());
    }

    if let (true, Some(groups)) = (args.print_summary, &groups) {
        println!("\n{}", "=".repeat(60));
        println!("RESOLUTION SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Input:  {}", args.input.display());
        println!("Events: {}", tree.entries());
        println!("\n{}", generate_text_summary(groups));
        println!("{}", "=".repeat(60));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn log_resolutions(groups: &EnergyGroups) {
    for (key, group) in groups {
        info!("E_nu = {} MeV ({} events)", key, group.events());
        for line in resolution_lines(group) {
            info!("  {}", line);
        }
    }
}

/// Look up the group for `e_nu`, listing available energies on failure
pub fn find_group(groups: &EnergyGroups, e_nu: f64) -> Result<&GroupAggregate> {
    groups.get(&EnergyKey::new(e_nu)).with_context(|| {
        let available: Vec<String> = groups.keys().map(|k| k.to_string()).collect();
        format!(
            "No events with E_nu = {} MeV (available: {})",
            e_nu,
            available.join(", ")
        )
    })
}

/// Raw deposited spectra as plot series
pub fn deposit_series(spectra: &DepositSpectra) -> Vec<HistogramSeries<'_>> {
    vec![
        HistogramSeries::new("E_avail", &spectra.e_avail),
        HistogramSeries::new("E_dep", &spectra.e_dep),
        HistogramSeries::new("Q", &spectra.q),
        HistogramSeries::new("Q_thre (dQ > 75keV)", &spectra.q_thre).dashed(),
        HistogramSeries::new("L", &spectra.l),
    ]
}

/// Reconstructed-energy estimators as plot series
pub fn reconstructed_series(group: &GroupAggregate) -> Vec<HistogramSeries<'_>> {
    group
        .reconstructed()
        .named()
        .into_iter()
        .map(|(name, values)| HistogramSeries::new(name, values))
        .collect()
}

fn plot_group(group: &GroupAggregate, output_path: &Path, reconstructed: bool) -> Result<()> {
    debug!(
        "Plotting E_nu = {} MeV ({} events)",
        group.e_nu(),
        group.events()
    );

    let title = format!("E_nu = {} MeV", group.e_nu());
    let config = HistogramConfig::new().with_title(title.as_str());

    render_histograms(&deposit_series(group.spectra()), output_path, &config)
        .context("Failed to render deposited-energy histograms")?;

    if reconstructed {
        let reco_path = suffixed_path(output_path, "_reco");
        let reco_config = HistogramConfig::new()
            .with_title(format!("{} (reconstructed)", title))
            .with_labels("Reconstructed energy [MeV]", "Number of events");
        render_histograms(&reconstructed_series(group), &reco_path, &reco_config)
            .context("Failed to render reconstructed-energy histograms")?;
    }

    Ok(())
}

/// Insert `suffix` between the file stem and its extension
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}
