use edep_resolution::commands::{execute_analyze, validate_args, AnalyzeArgs, PlotSelection};
use edep_resolution::output::read_report;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};

const EVENTS_JSONL: &str = r#"{"E_nu":1000,"E_avail":900,"E_depoTotal":850,"Q_depoTotal":400,"Q_depoTotal_th_75keV":390,"L_depoTotal_avg_180PEpMeV":360,"Q_depoList":[1,2,3,4,5,6,7,8]}
{"E_nu":1000,"E_avail":910,"E_depoTotal":860,"Q_depoTotal":410,"Q_depoTotal_th_75keV":395,"L_depoTotal_avg_180PEpMeV":365,"Q_depoList":[1,1,1,1,1,1,1,1]}
{"E_nu":500,"E_avail":450,"E_depoTotal":420,"Q_depoTotal":200,"Q_depoTotal_th_75keV":195,"L_depoTotal_avg_180PEpMeV":180,"Q_depoList":[2,2,2,2,2,2,2,2]}
"#;

fn write_input(dir: &Path, content: &str) -> PathBuf {
    let mut file = Builder::new()
        .suffix(".jsonl")
        .tempfile_in(dir)
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    let (_, path) = file.keep().unwrap();
    path
}

fn args_in(dir: &TempDir) -> AnalyzeArgs {
    AnalyzeArgs {
        input: write_input(dir.path(), EVENTS_JSONL),
        output: PathBuf::from("hist.svg"),
        plots_dir: dir.path().join("plots"),
        ..Default::default()
    }
}

#[test]
fn test_validate_args_valid() {
    let args = AnalyzeArgs {
        input: PathBuf::from("sim.root"),
        ..Default::default()
    };
    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_missing_input() {
    assert!(validate_args(&AnalyzeArgs::default()).is_err());
}

#[test]
fn test_analyze_single_energy() {
    let dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        reconstructed: true,
        ..args_in(&dir)
    };
    let plots = args.plots_dir.clone();

    execute_analyze(args).unwrap();

    assert!(plots.is_dir());
    assert!(plots.join("hist.svg").exists());
    assert!(plots.join("hist_reco.svg").exists());
}

#[test]
fn test_analyze_all_energies() {
    let dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        selection: PlotSelection::AllEnergies,
        ..args_in(&dir)
    };
    let plots = args.plots_dir.clone();

    execute_analyze(args).unwrap();

    assert!(plots.join("hist_E500.svg").exists());
    assert!(plots.join("hist_E1000.svg").exists());
}

#[test]
fn test_analyze_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        selection: PlotSelection::Inclusive,
        ..args_in(&dir)
    };
    let plots = args.plots_dir.clone();

    execute_analyze(args).unwrap();

    let svg = std::fs::read_to_string(plots.join("hist.svg")).unwrap();
    assert!(svg.contains("E_avail"));
}

#[test]
fn test_analyze_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("out/report.json");
    let args = AnalyzeArgs {
        report: Some(report_path.clone()),
        ..args_in(&dir)
    };

    execute_analyze(args).unwrap();

    let report = read_report(&report_path).unwrap();
    assert_eq!(report.tree, "Sim");
    assert_eq!(report.total_events, 3);
    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[0].e_nu, 500.0);
    assert_eq!(report.groups[0].events, 1);
    assert_eq!(report.groups[1].events, 2);
    // a single event has no spread
    assert_eq!(report.groups[0].resolutions.e_rec_l1, Some(0.0));
}

#[test]
fn test_analyze_unknown_energy_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = AnalyzeArgs {
        selection: PlotSelection::Energy(750.0),
        ..args_in(&dir)
    };

    let err = execute_analyze(args).unwrap_err();
    assert!(format!("{:#}", err).contains("available: 500, 1000"));
}

#[test]
fn test_analyze_short_particle_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bad = r#"{"E_nu":1000,"E_avail":900,"E_depoTotal":850,"Q_depoTotal":400,"Q_depoTotal_th_75keV":390,"L_depoTotal_avg_180PEpMeV":360,"Q_depoList":[1,2,3]}"#;
    let args = AnalyzeArgs {
        input: write_input(dir.path(), bad),
        ..args_in(&dir)
    };

    assert!(execute_analyze(args).is_err());
}
