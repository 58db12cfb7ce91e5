//! Group events by true neutrino energy.
//!
//! A single pass appends each event's quantities to the group of its `E_nu`,
//! in arrival order. Once the pass is over every group is finalised into an
//! immutable `GroupAggregate` carrying the reconstructed energies and their
//! resolutions.

use super::resolution::{
    calculate_resolution, reconstruct_energies, Calibration, ReconstructedEnergies, Resolutions,
};
use crate::reader::EventRecord;
use crate::utils::config::{EM_INDICES, HADRONIC_INDICES, PARTICLE_TYPES};
use crate::utils::error::AggregateError;
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Totally ordered `E_nu` key
///
/// Ordering follows `f64::total_cmp`; `-0.0` is folded into `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct EnergyKey(f64);

impl EnergyKey {
    pub fn new(e_nu: f64) -> Self {
        if e_nu == 0.0 {
            Self(0.0)
        } else {
            Self(e_nu)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for EnergyKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EnergyKey {}

impl PartialOrd for EnergyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnergyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for EnergyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw deposited quantities, one element per event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepositSpectra {
    /// `E_avail`
    pub e_avail: Vec<f64>,
    /// `E_depoTotal`
    pub e_dep: Vec<f64>,
    /// `Q_depoTotal`
    pub q: Vec<f64>,
    /// `Q_depoTotal_th_75keV`
    pub q_thre: Vec<f64>,
    /// `L_depoTotal_avg_180PEpMeV`
    pub l: Vec<f64>,
}

impl DepositSpectra {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            e_avail: Vec::with_capacity(capacity),
            e_dep: Vec::with_capacity(capacity),
            q: Vec::with_capacity(capacity),
            q_thre: Vec::with_capacity(capacity),
            l: Vec::with_capacity(capacity),
        }
    }

    /// Collect the spectra of every event, ignoring `E_nu`
    pub fn from_events<I>(events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<EventRecord>,
    {
        let events = events.into_iter();
        let mut spectra = Self::with_capacity(events.size_hint().0);
        for event in events {
            spectra.push(event.borrow());
        }
        spectra
    }

    pub fn push(&mut self, event: &EventRecord) {
        self.e_avail.push(event.e_avail);
        self.e_dep.push(event.e_depo_total);
        self.q.push(event.q_depo_total);
        self.q_thre.push(event.q_depo_total_th_75kev);
        self.l.push(event.l_depo_total);
    }

    pub fn len(&self) -> usize {
        self.e_avail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.e_avail.is_empty()
    }
}

/// Deposited charge split by particle type, one element per event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChargePartition {
    /// Electromagnetic component `Q_e`
    pub q_e: Vec<f64>,
    /// Hadronic component `Q_h`
    pub q_h: Vec<f64>,
}

/// Sum a per-particle charge list into (EM, hadronic) components
///
/// Returns `None` if the list has fewer than `PARTICLE_TYPES` entries.
/// Entries past the last particle type are ignored.
pub fn split_charge(q_depo_list: &[f64]) -> Option<(f64, f64)> {
    if q_depo_list.len() < PARTICLE_TYPES {
        return None;
    }
    let sum = |indices: &[usize]| -> Option<f64> {
        indices.iter().map(|&i| q_depo_list.get(i).copied()).sum()
    };
    Some((sum(&EM_INDICES[..])?, sum(&HADRONIC_INDICES[..])?))
}

/// Per-group state while the pass is still running
#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    spectra: DepositSpectra,
    partition: ChargePartition,
}

impl GroupAccumulator {
    fn push(&mut self, event: &EventRecord, q_e: f64, q_h: f64) {
        self.spectra.push(event);
        self.partition.q_e.push(q_e);
        self.partition.q_h.push(q_h);
    }

    fn finalize(self, e_nu: f64, calibration: &Calibration) -> GroupAggregate {
        let reconstructed = reconstruct_energies(
            &self.spectra.l,
            &self.spectra.q,
            &self.partition.q_e,
            &self.partition.q_h,
            calibration,
        );

        let resolutions = reconstructed.map(|values| resolution_or_warn(e_nu, values));

        GroupAggregate {
            e_nu,
            spectra: self.spectra,
            partition: self.partition,
            reconstructed,
            resolutions,
        }
    }
}

fn resolution_or_warn(e_nu: f64, values: &[f64]) -> Option<f64> {
    match calculate_resolution(values) {
        Ok(res) => Some(res),
        Err(err) => {
            warn!("E_nu = {} MeV: {}", e_nu, err);
            None
        }
    }
}

/// All per-event and derived data of one `E_nu` group
///
/// Built once by `aggregate_events`; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAggregate {
    e_nu: f64,
    spectra: DepositSpectra,
    partition: ChargePartition,
    reconstructed: ReconstructedEnergies,
    resolutions: Resolutions,
}

impl GroupAggregate {
    pub fn e_nu(&self) -> f64 {
        self.e_nu
    }

    /// Number of events in the group
    pub fn events(&self) -> usize {
        self.spectra.len()
    }

    pub fn spectra(&self) -> &DepositSpectra {
        &self.spectra
    }

    pub fn partition(&self) -> &ChargePartition {
        &self.partition
    }

    pub fn reconstructed(&self) -> &ReconstructedEnergies {
        &self.reconstructed
    }

    pub fn resolutions(&self) -> &Resolutions {
        &self.resolutions
    }
}

/// Aggregates keyed by `E_nu`, ascending
pub type EnergyGroups = BTreeMap<EnergyKey, GroupAggregate>;

/// Group events by `E_nu` and derive per-group resolutions
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `events` - events in arrival order
/// * `calibration` - scales for the reconstructed-energy estimators
///
/// # Returns
/// One `GroupAggregate` per distinct `E_nu`
///
/// # Errors
/// * `AggregateError::ShortDepositionList` - an event's `Q_depoList` has
///   fewer than 8 entries; nothing is returned
pub fn aggregate_events<I>(
    events: I,
    calibration: &Calibration,
) -> Result<EnergyGroups, AggregateError>
where
    I: IntoIterator,
    I::Item: Borrow<EventRecord>,
{
    let mut accumulators: BTreeMap<EnergyKey, GroupAccumulator> = BTreeMap::new();
    let mut total = 0usize;

    for (index, event) in events.into_iter().enumerate() {
        let event: &EventRecord = event.borrow();
        let (q_e, q_h) =
            split_charge(&event.q_depo_list).ok_or(AggregateError::ShortDepositionList {
                event: index,
                len: event.q_depo_list.len(),
                expected: PARTICLE_TYPES,
            })?;

        accumulators
            .entry(EnergyKey::new(event.e_nu))
            .or_default()
            .push(event, q_e, q_h);
        total += 1;
    }

    debug!(
        "Accumulated {} events into {} energy groups",
        total,
        accumulators.len()
    );

    // Each group's arrays are complete and ordered, so groups finalise independently
    let groups: EnergyGroups = accumulators
        .into_par_iter()
        .map(|(key, acc)| (key, acc.finalize(key.value(), calibration)))
        .collect();

    Ok(groups)
}
