//! Human-readable resolution summaries.

use crate::aggregator::{EnergyGroups, GroupAggregate};

/// Format a resolution as a percentage, `n/a` if undefined
pub fn format_resolution(resolution: Option<f64>) -> String {
    match resolution {
        Some(res) => format!("{:.2}%", res * 100.0),
        None => "n/a".to_string(),
    }
}

/// One line per estimator, e.g. `E_rec_L1 resolution: 12.34%`
pub fn resolution_lines(group: &GroupAggregate) -> Vec<String> {
    group
        .resolutions()
        .named()
        .iter()
        .map(|(name, res)| format!("{} resolution: {}", name, format_resolution(**res)))
        .collect()
}

/// Table of every group's event count and resolutions
pub fn generate_text_summary(groups: &EnergyGroups) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:>12}  {:>8}  {:>10}  {:>10}  {:>10}\n",
        "E_nu [MeV]", "events", "E_rec_L1", "E_rec_Q1", "E_rec_Q2"
    ));
    out.push_str(&format!("{}\n", "-".repeat(58)));

    for (key, group) in groups {
        let res = group.resolutions();
        out.push_str(&format!(
            "{:>12}  {:>8}  {:>10}  {:>10}  {:>10}\n",
            key.to_string(),
            group.events(),
            format_resolution(res.e_rec_l1),
            format_resolution(res.e_rec_q1),
            format_resolution(res.e_rec_q2),
        ));
    }

    out
}
