use crate::store::EventStore;
use serde::{Deserialize, Serialize};

/// Correction factor an xy algorithm reports when it has no result.
pub const UNSET_XYCORR: f64 = 1.0;
/// Coordinate value an xy algorithm reports when it has no result.
pub const UNSET_COORD: f64 = -99.0;
/// Veto ids for events whose veto stream is absent.
pub const MISSING_ID: i32 = -998;

/// One position reconstruction: `(x, y, xy-correction factor)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionReco {
    pub x: f64,
    pub y: f64,
    pub xycorr_factor: f64,
}

impl PositionReco {
    pub const UNSET: PositionReco = PositionReco {
        x: UNSET_COORD,
        y: UNSET_COORD,
        xycorr_factor: UNSET_XYCORR,
    };

    pub fn new(x: f64, y: f64, xycorr_factor: f64) -> Self {
        Self {
            x,
            y,
            xycorr_factor,
        }
    }

    #[inline]
    pub fn has_factor(&self) -> bool {
        self.xycorr_factor != UNSET_XYCORR
    }

    #[inline]
    pub fn has_xy(&self) -> bool {
        self.x > UNSET_COORD && self.y > UNSET_COORD
    }
}

impl Default for PositionReco {
    fn default() -> Self {
        Self::UNSET
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoRecord {
    pub present: bool,
    pub run_id: i32,
    pub event_id: i32,
    pub cluster_charges: Vec<f64>,
}

impl Default for VetoRecord {
    fn default() -> Self {
        Self {
            present: false,
            run_id: MISSING_ID,
            event_id: MISSING_ID,
            cluster_charges: Vec::new(),
        }
    }
}

/// One triggered event with the friend-stream fields already joined in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawEvent {
    pub run_id: i32,
    pub event_id: i32,
    pub nchannels: i32,
    pub baseline_not_found: bool,
    /// Live time since the previous trigger [s].
    pub lifetime: f64,
    /// Inhibit time after the previous trigger [s].
    pub inhibittime: f64,
    pub npulses: i32,
    pub has_s3: bool,
    /// [us] relative to the trigger
    pub s1_start_time: f64,
    pub total_s1_corr: f64,
    pub total_s2_corr: f64,
    pub total_f90: f64,
    pub total_s2_f90_fixed: f64,
    pub max_s1_frac_cut_exceeds99: i32,
    pub tpc_digital_sum: f64,

    pub masas: PositionReco,
    pub xyl: PositionReco,
    pub aww: PositionReco,

    pub veto: VetoRecord,
}

impl RawEvent {
    /// Reads record `index`. Fields whose stream is not loaded fall back to
    /// the "unset"/"missing" sentinels above instead of failing.
    pub fn from_store(store: &EventStore, index: usize) -> Self {
        let i32_or = |name: &str, d: i32| store.get_i32(name, index).unwrap_or(d);
        let f64_or = |name: &str, d: f64| store.get_f64(name, index).unwrap_or(d);
        let bool_or = |name: &str, d: bool| store.get_bool(name, index).unwrap_or(d);

        let reco = |prefix: &str| PositionReco {
            x: f64_or(&format!("{}_x", prefix), UNSET_COORD),
            y: f64_or(&format!("{}_y", prefix), UNSET_COORD),
            xycorr_factor: f64_or(&format!("{}_xycorr_factor", prefix), UNSET_XYCORR),
        };

        Self {
            run_id: i32_or("run_id", MISSING_ID),
            event_id: i32_or("event_id", MISSING_ID),
            nchannels: i32_or("nchannels", 0),
            baseline_not_found: bool_or("baseline_not_found", true),
            lifetime: f64_or("lifetime", 0.0),
            inhibittime: f64_or("inhibittime", 0.0),
            npulses: i32_or("npulses", 0),
            has_s3: bool_or("has_s3", false),
            s1_start_time: f64_or("s1_start_time", 0.0),
            total_s1_corr: f64_or("total_s1_corr", 0.0),
            total_s2_corr: f64_or("total_s2_corr", 0.0),
            total_f90: f64_or("total_f90", 0.0),
            total_s2_f90_fixed: f64_or("total_s2_f90_fixed", 1.0),
            max_s1_frac_cut_exceeds99: i32_or("max_s1_frac_cut_exceeds99", 1),
            tpc_digital_sum: f64_or("tpc_digital_sum", 0.0),
            masas: reco("masas"),
            xyl: reco("xyl"),
            aww: reco("aww"),
            veto: VetoRecord {
                present: bool_or("veto_present", false),
                run_id: i32_or("veto_run_id", MISSING_ID),
                event_id: i32_or("veto_event_id", MISSING_ID),
                cluster_charges: store
                    .get_list("veto_cluster_charge_vec", index)
                    .map(<[f64]>::to_vec)
                    .unwrap_or_default(),
            },
        }
    }

    /// Reconstructions in selection priority order.
    pub fn reconstructions(&self) -> [PositionReco; 3] {
        [self.masas, self.xyl, self.aww]
    }
}
