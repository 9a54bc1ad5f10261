mod common;

use common::good_event;
use proptest::prelude::*;
use slad_ambe::hist::livetime::{CutStage, Livetime};
use slad_ambe::selector::cuts::{Cut, CutFlags};
use slad_ambe::selector::AmBeSelector;
use slad_ambe::SladError;
use strum::{EnumCount, IntoEnumIterator};

fn passing_flags() -> CutFlags {
    AmBeSelector::default().inspect(&good_event()).1
}

#[test]
fn test_stage_order_and_labels() {
    assert_eq!(CutStage::COUNT, 10);
    assert_eq!(CutStage::REFERENCE, CutStage::NoCuts);
    let labels = CutStage::labels();
    assert_eq!(labels.first().map(String::as_str), Some("No cuts"));
    assert_eq!(labels.last().map(String::as_str), Some("Veto match"));
    // audit-only cuts have no livetime stage
    for stage in CutStage::iter() {
        assert!(stage.cut().is_none_or(|c| c.is_selection()));
    }
}

#[test]
fn test_first_failed_stage() {
    let mut flags = passing_flags();
    assert_eq!(CutStage::first_failed(&flags), None);

    flags.set(Cut::S2F90, false);
    flags.set(Cut::VetoMatch, false);
    assert_eq!(CutStage::first_failed(&flags), Some(CutStage::S2F90));

    flags.set(Cut::Baseline, false);
    assert_eq!(CutStage::first_failed(&flags), Some(CutStage::Baseline));

    let mut flags = passing_flags();
    flags.set(Cut::TriggerTime, false);
    flags.set(Cut::S2Size, false);
    assert_eq!(CutStage::first_failed(&flags), None);
}

#[test]
fn test_record_is_cumulative() {
    let mut lt = Livetime::new();
    let ok = passing_flags();
    let mut late = ok;
    late.set(Cut::VetoPresent, false);
    let mut early = ok;
    early.set(Cut::NChannels, false);

    lt.record(1.0, &ok);
    lt.record(2.0, &late);
    lt.record(4.0, &early);

    assert_eq!(lt.raw(CutStage::NoCuts), 7.0);
    assert_eq!(lt.raw(CutStage::NChannels), 4.0);
    assert_eq!(lt.raw(CutStage::S2F90), 4.0);
    assert_eq!(lt.raw(CutStage::VetoPresent), 6.0);
    assert_eq!(lt.raw(CutStage::VetoMatch), 6.0);

    let fin = lt.finalize();
    assert_eq!(fin.total(), 7.0);
    assert_eq!(fin.get(CutStage::NChannels), 3.0);
    assert_eq!(fin.analysis_livetime(), 3.0);
    assert_eq!(fin.get(CutStage::VetoMatch), 1.0);
}

#[test]
fn test_from_raw_checks_length() {
    assert!(matches!(
        Livetime::from_raw(vec![0.0; 3]),
        Err(SladError::Binning(_))
    ));
}

#[test]
fn test_finalize_from_raw_counts() {
    let raw = vec![10.0, 1.0, 1.5, 2.0, 2.0, 4.0, 4.0, 5.0, 5.5, 6.0];
    let fin = Livetime::from_raw(raw).unwrap().finalize();
    assert_eq!(
        fin.surviving,
        vec![10.0, 9.0, 8.5, 8.0, 8.0, 6.0, 6.0, 5.0, 4.5, 4.0]
    );
    assert_eq!(fin.labels.len(), CutStage::COUNT);
}

#[test]
fn test_merge_adds_stage_bins() {
    let ok = passing_flags();
    let mut bad = ok;
    bad.set(Cut::LongWait, false);

    let mut a = Livetime::new();
    a.record(1.0, &ok);
    let mut b = Livetime::new();
    b.record(2.0, &bad);
    a.merge(&b);

    let fin = a.finalize();
    assert_eq!(fin.total(), 3.0);
    assert_eq!(fin.get(CutStage::EventDt), 3.0);
    assert_eq!(fin.get(CutStage::LongWait), 1.0);
}

proptest! {
    #[test]
    fn prop_finalize_is_total_minus_raw(raw in prop::collection::vec(0.0f64..1e4, CutStage::COUNT)) {
        let lt = Livetime::from_raw(raw.clone()).unwrap();
        let fin = lt.finalize();
        prop_assert_eq!(fin.get(CutStage::NoCuts), raw[0]);
        for stage in CutStage::iter().skip(1) {
            prop_assert_eq!(fin.get(stage), raw[0] - raw[stage.index()]);
        }
    }

    #[test]
    fn prop_surviving_never_increases(
        events in prop::collection::vec((0.0f64..2.0, prop::option::of(0usize..CutStage::COUNT - 1)), 0..50)
    ) {
        let stages: Vec<CutStage> = CutStage::iter().skip(1).collect();
        let mut lt = Livetime::new();
        for (exposure, fail) in &events {
            let mut flags = passing_flags();
            if let Some(i) = fail {
                if let Some(cut) = stages[*i].cut() {
                    flags.set(cut, false);
                }
            }
            lt.record(*exposure, &flags);
        }
        let fin = lt.finalize();
        for pair in fin.surviving.windows(2) {
            prop_assert!(pair[1] <= pair[0] + 1e-9);
        }
        prop_assert!(fin.surviving.iter().all(|v| *v >= -1e-9));
    }
}

#[test]
fn test_stage_labels_follow_cut_labels() {
    for stage in CutStage::iter() {
        match stage.cut() {
            Some(cut) => assert_eq!(stage.to_string(), cut.to_string()),
            None => assert_eq!(stage.to_string(), "No cuts"),
        }
    }
    assert_eq!(CutStage::S1MaxFrac.to_string(), "S1 max frac");
}
