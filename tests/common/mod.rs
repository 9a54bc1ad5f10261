#![allow(dead_code)]

use slad_ambe::selector::event::{PositionReco, RawEvent, VetoRecord};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// An event that passes every selection cut, in the first trigger epoch.
pub fn good_event() -> RawEvent {
    RawEvent {
        run_id: 5000,
        event_id: 42,
        nchannels: 38,
        baseline_not_found: false,
        lifetime: 0.0,
        inhibittime: 0.002,
        npulses: 2,
        has_s3: false,
        s1_start_time: -0.2,
        total_s1_corr: 100.0,
        total_s2_corr: 5000.0,
        total_f90: 0.7,
        total_s2_f90_fixed: 0.1,
        max_s1_frac_cut_exceeds99: 0,
        tpc_digital_sum: 100.0,
        masas: PositionReco::new(-99.0, -99.0, 1.2),
        xyl: PositionReco::UNSET,
        aww: PositionReco::UNSET,
        veto: VetoRecord {
            present: true,
            run_id: 5000,
            event_id: 42,
            cluster_charges: vec![1200.0],
        },
    }
}

fn b(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}

/// Writes the primary CSV and all five friend CSVs; returns the primary path.
pub fn write_dataset(dir: &Path, stem: &str, events: &[RawEvent]) -> PathBuf {
    let main_path = dir.join(format!("{}.csv", stem));
    let open = |suffix: &str| File::create(dir.join(format!("{}{}.csv", stem, suffix))).unwrap();

    let mut main = File::create(&main_path).unwrap();
    writeln!(
        main,
        "run_id,event_id,nchannels,baseline_not_found,lifetime,inhibittime,npulses,\
         total_s1_corr,total_s2_corr,total_f90,s1_start_time,total_s2_f90_fixed,\
         max_s1_frac_cut_exceeds99,tpc_digital_sum"
    )
    .unwrap();

    let mut pulses = open("_allpulses");
    writeln!(pulses, "has_s3").unwrap();

    let mut recos: Vec<(File, &str)> = vec![
        (open("_masas_xy"), "masas"),
        (open("_xylocator_xy"), "xyl"),
        (open("_aww_xy"), "aww"),
    ];
    for (f, prefix) in recos.iter_mut() {
        writeln!(f, "{0}_x,{0}_y,{0}_xycorr_factor", prefix).unwrap();
    }

    let mut veto = open("_veto_cluster");
    writeln!(
        veto,
        "veto_present,veto_run_id,veto_event_id,veto_cluster_charge_vec"
    )
    .unwrap();

    for ev in events {
        writeln!(
            main,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            ev.run_id,
            ev.event_id,
            ev.nchannels,
            b(ev.baseline_not_found),
            ev.lifetime,
            ev.inhibittime,
            ev.npulses,
            ev.total_s1_corr,
            ev.total_s2_corr,
            ev.total_f90,
            ev.s1_start_time,
            ev.total_s2_f90_fixed,
            ev.max_s1_frac_cut_exceeds99,
            ev.tpc_digital_sum
        )
        .unwrap();
        writeln!(pulses, "{}", b(ev.has_s3)).unwrap();
        for ((f, _), r) in recos.iter_mut().zip(ev.reconstructions()) {
            writeln!(f, "{},{},{}", r.x, r.y, r.xycorr_factor).unwrap();
        }
        let charges: Vec<String> = ev
            .veto
            .cluster_charges
            .iter()
            .map(|c| c.to_string())
            .collect();
        writeln!(
            veto,
            "{},{},{},{}",
            b(ev.veto.present),
            ev.veto.run_id,
            ev.veto.event_id,
            charges.join(";")
        )
        .unwrap();
    }

    main_path
}

/// Deterministic mix of accepted, rejected and prescaled events.
pub fn mixed_events(n: usize) -> Vec<RawEvent> {
    (0..n)
        .map(|i| {
            let mut ev = good_event();
            ev.event_id = i as i32;
            ev.veto.event_id = i as i32;
            ev.lifetime = 0.01 + (i % 7) as f64 * 0.05;
            ev.total_s1_corr = 50.0 + (i % 40) as f64 * 30.0;
            ev.total_s2_corr = 800.0 + (i % 13) as f64 * 400.0;
            ev.total_f90 = 0.2 + (i % 10) as f64 * 0.06;
            if i % 5 == 0 {
                ev.tpc_digital_sum = 600.0;
            }
            if i % 11 == 0 {
                ev.nchannels = 37;
            }
            if i % 9 == 0 {
                ev.npulses = 3;
                ev.has_s3 = i % 2 == 0;
            }
            if i % 17 == 0 {
                ev.veto.present = false;
            }
            if i % 4 == 0 {
                ev.masas = PositionReco::UNSET;
                ev.xyl = PositionReco::new(3.0, 4.0, 0.9);
            }
            ev
        })
        .collect()
}
