use edep_resolution::aggregator::{
    aggregate_events, calculate_resolution, mean, population_std_dev, split_charge, Calibration,
    EnergyKey,
};
use edep_resolution::reader::EventRecord;
use pretty_assertions::assert_eq;

fn event(e_nu: f64, q: f64, l: f64, q_depo_list: Vec<f64>) -> EventRecord {
    EventRecord {
        e_nu,
        e_avail: e_nu * 0.95,
        e_depo_total: e_nu * 0.9,
        q_depo_total: q,
        q_depo_total_th_75kev: q * 0.97,
        l_depo_total: l,
        q_depo_list,
    }
}

fn ones() -> Vec<f64> {
    vec![1.0; 8]
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn test_constant_light_gives_zero_resolution() {
    let events: Vec<EventRecord> = (0..3).map(|_| event(1000.0, 10.0, 42.0, ones())).collect();

    let groups = aggregate_events(&events, &Calibration::default()).unwrap();
    let group = &groups[&EnergyKey::new(1000.0)];

    assert_eq!(group.events(), 3);
    for value in &group.reconstructed().e_rec_l1 {
        assert_close(*value, 100.0);
    }
    assert_close(group.resolutions().e_rec_l1.unwrap(), 0.0);
}

#[test]
fn test_two_event_charge_resolution() {
    let events = vec![
        event(500.0, 1.0, 10.0, ones()),
        event(500.0, 3.0, 10.0, ones()),
    ];

    let groups = aggregate_events(&events, &Calibration::default()).unwrap();
    let group = &groups[&EnergyKey::new(500.0)];
    let e_rec_q1 = &group.reconstructed().e_rec_q1;

    assert_close(e_rec_q1[0], 2.083_333_333_333_333);
    assert_close(e_rec_q1[1], 6.25);
    assert_close(mean(e_rec_q1).unwrap(), 4.166_666_666_666_667);
    assert_close(population_std_dev(e_rec_q1).unwrap(), 2.083_333_333_333_333);
    assert_close(group.resolutions().e_rec_q1.unwrap(), 0.5);
}

#[test]
fn test_charge_partition_of_particle_list() {
    let list = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    assert_eq!(split_charge(&list), Some((12.0, 24.0)));

    let events = vec![event(1000.0, 36.0, 10.0, list)];
    let groups = aggregate_events(&events, &Calibration::default()).unwrap();
    let partition = groups[&EnergyKey::new(1000.0)].partition();

    assert_eq!(partition.q_e, vec![12.0]);
    assert_eq!(partition.q_h, vec![24.0]);
}

#[test]
fn test_partition_covers_whole_list() {
    let lists = [
        vec![0.5, 1.5, 2.5, 0.0, 9.0, 0.25, 3.0, 1.0],
        vec![10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ];

    for list in lists {
        let (q_e, q_h) = split_charge(&list).unwrap();
        let total: f64 = list.iter().sum();
        assert_close(q_e + q_h, total);
    }
}

#[test]
fn test_distinct_energies_stay_separate() {
    let events = vec![
        event(500.0, 1.0, 5.0, ones()),
        event(1000.0, 2.0, 6.0, ones()),
        event(500.0, 3.0, 7.0, ones()),
        event(1000.0, 4.0, 8.0, ones()),
    ];

    let groups = aggregate_events(&events, &Calibration::default()).unwrap();

    assert_eq!(groups.len(), 2);
    let low = &groups[&EnergyKey::new(500.0)];
    let high = &groups[&EnergyKey::new(1000.0)];

    assert_eq!(low.spectra().q, vec![1.0, 3.0]);
    assert_eq!(low.spectra().l, vec![5.0, 7.0]);
    assert_eq!(high.spectra().q, vec![2.0, 4.0]);
    assert_eq!(high.spectra().l, vec![6.0, 8.0]);
}

#[test]
fn test_all_arrays_match_group_size() {
    let mut events = Vec::new();
    for i in 0..7 {
        let e_nu = if i % 3 == 0 { 250.0 } else { 750.0 };
        events.push(event(e_nu, i as f64 + 1.0, i as f64 + 2.0, ones()));
    }

    let groups = aggregate_events(&events, &Calibration::default()).unwrap();

    for (key, group) in &groups {
        let expected = events
            .iter()
            .filter(|e| EnergyKey::new(e.e_nu) == *key)
            .count();
        let spectra = group.spectra();
        let partition = group.partition();
        let reco = group.reconstructed();

        for len in [
            spectra.e_avail.len(),
            spectra.e_dep.len(),
            spectra.q.len(),
            spectra.q_thre.len(),
            spectra.l.len(),
            partition.q_e.len(),
            partition.q_h.len(),
            reco.e_rec_l1.len(),
            reco.e_rec_q1.len(),
            reco.e_rec_q2.len(),
        ] {
            assert_eq!(len, expected);
        }
        assert_eq!(group.events(), expected);
    }
}

#[test]
fn test_aggregation_is_repeatable() {
    let events = vec![
        event(500.0, 1.0, 5.0, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]),
        event(1000.0, 2.0, 6.0, ones()),
        event(500.0, 3.0, 7.0, ones()),
    ];

    let first = aggregate_events(&events, &Calibration::default()).unwrap();
    let second = aggregate_events(&events, &Calibration::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_resolution_scale_invariance() {
    let values = [95.0, 102.5, 99.0, 110.0, 87.25];
    for factor in [0.001, 2.0, 1e6] {
        let scaled: Vec<f64> = values.iter().map(|v| v * factor).collect();
        let a = calculate_resolution(&values).unwrap();
        let b = calculate_resolution(&scaled).unwrap();
        assert!((a - b).abs() < 1e-12, "{} vs {}", a, b);
    }
}

#[test]
fn test_short_particle_list_fails() {
    let events = vec![event(1000.0, 1.0, 1.0, vec![1.0; 3])];
    assert!(aggregate_events(&events, &Calibration::default()).is_err());
}

#[test]
fn test_custom_calibration() {
    let calibration = Calibration {
        l1_scale: 0.5,
        q1_scale: 0.25,
        em_scale: 1.0,
        hadronic_scale: 0.5,
    };
    let events = vec![event(1000.0, 2.0, 4.0, ones())];

    let groups = aggregate_events(&events, &calibration).unwrap();
    let reco = groups[&EnergyKey::new(1000.0)].reconstructed();

    assert_eq!(reco.e_rec_l1, vec![8.0]);
    assert_eq!(reco.e_rec_q1, vec![8.0]);
    // 3 EM + 5 hadronic entries of 1.0
    assert_eq!(reco.e_rec_q2, vec![13.0]);
}

#[test]
fn test_nan_light_leaves_resolution_undefined() {
    let events = vec![
        event(1000.0, 2.0, 42.0, ones()),
        event(1000.0, 4.0, f64::NAN, ones()),
    ];

    let groups = aggregate_events(&events, &Calibration::default()).unwrap();
    let resolutions = groups[&EnergyKey::new(1000.0)].resolutions();

    assert_eq!(resolutions.e_rec_l1, None);
    assert!(resolutions.e_rec_q1.is_some());
    assert_eq!(
        calculate_resolution(&[1.0, f64::INFINITY]),
        Err(edep_resolution::utils::error::AggregateError::NonFinite)
    );
}
