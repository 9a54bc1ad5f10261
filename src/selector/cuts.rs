use super::event::RawEvent;
use super::observables::Observables;
use serde::{Deserialize, Serialize};
use std::ops::{Range, RangeInclusive};
use strum_macros::{Display, EnumCount, EnumIter};

pub const EXPECTED_NCHANNELS: i32 = 38;
/// Minimum lifetime + inhibit time since the previous trigger [s].
pub const MIN_EVENT_DT: f64 = 1.35e-3;
/// [s]
pub const MAX_LIFETIME: f64 = 1.0;
pub const MAX_S2_F90: f64 = 0.2;
/// Corrected S2 floor [PE].
pub const MIN_S2: f64 = 30.0;

/// A run range sharing one trigger configuration, and where S1 must start.
#[derive(Debug, Clone)]
pub struct TriggerEpoch {
    pub runs: Range<i32>,
    pub s1_start_window: RangeInclusive<f64>,
}

pub static TRIGGER_EPOCHS: [TriggerEpoch; 3] = [
    TriggerEpoch {
        runs: -999..7344,
        s1_start_window: -0.25..=-0.15,
    },
    TriggerEpoch {
        runs: 7344..7641,
        s1_start_window: -4.10..=-4.00,
    },
    TriggerEpoch {
        runs: 7641..999_999,
        s1_start_window: -6.10..=-6.00,
    },
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Display, Serialize, Deserialize,
)]
pub enum Cut {
    #[strum(to_string = "N channels")]
    NChannels,
    #[strum(to_string = "Baseline")]
    Baseline,
    #[strum(to_string = "Event dt")]
    EventDt,
    #[strum(to_string = "Long wait")]
    LongWait,
    #[strum(to_string = "Trigger time")]
    TriggerTime,
    #[strum(to_string = "Single scatter")]
    SingleScatter,
    #[strum(to_string = "S1 max frac")]
    S1MaxFrac,
    #[strum(to_string = "S2 f90")]
    S2F90,
    #[strum(to_string = "S2 size")]
    S2Size,
    #[strum(to_string = "Veto present")]
    VetoPresent,
    #[strum(to_string = "Veto match")]
    VetoMatch,
}

impl Cut {
    /// Cuts that take part in acceptance. `TriggerTime` and `S2Size` are
    /// evaluated and tallied only.
    pub fn is_selection(&self) -> bool {
        !matches!(self, Cut::TriggerTime | Cut::S2Size)
    }

    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            Cut::NChannels | Cut::Baseline | Cut::EventDt | Cut::LongWait
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutFlags {
    pub nchannels: bool,
    pub baseline: bool,
    pub event_dt: bool,
    pub long_wait: bool,
    pub trigger_time: bool,
    pub single_scatter: bool,
    pub s1_max_frac: bool,
    pub s2_f90: bool,
    pub s2_size: bool,
    pub veto_present: bool,
    pub veto_match: bool,
}

impl CutFlags {
    pub fn evaluate(ev: &RawEvent, obs: &Observables) -> Self {
        let trigger_time = TRIGGER_EPOCHS
            .iter()
            .any(|e| e.runs.contains(&ev.run_id) && e.s1_start_window.contains(&ev.s1_start_time));

        CutFlags {
            nchannels: ev.nchannels == EXPECTED_NCHANNELS,
            baseline: !ev.baseline_not_found,
            event_dt: ev.lifetime + ev.inhibittime >= MIN_EVENT_DT,
            long_wait: ev.lifetime < MAX_LIFETIME,
            trigger_time,
            single_scatter: ev.npulses == 2 || (ev.npulses == 3 && ev.has_s3),
            s1_max_frac: ev.max_s1_frac_cut_exceeds99 == 0,
            s2_f90: ev.total_s2_f90_fixed < MAX_S2_F90,
            s2_size: obs.s2 > MIN_S2,
            veto_present: ev.veto.present,
            veto_match: ev.run_id == ev.veto.run_id && ev.event_id == ev.veto.event_id,
        }
    }

    pub fn passed(&self, cut: Cut) -> bool {
        match cut {
            Cut::NChannels => self.nchannels,
            Cut::Baseline => self.baseline,
            Cut::EventDt => self.event_dt,
            Cut::LongWait => self.long_wait,
            Cut::TriggerTime => self.trigger_time,
            Cut::SingleScatter => self.single_scatter,
            Cut::S1MaxFrac => self.s1_max_frac,
            Cut::S2F90 => self.s2_f90,
            Cut::S2Size => self.s2_size,
            Cut::VetoPresent => self.veto_present,
            Cut::VetoMatch => self.veto_match,
        }
    }

    pub fn set(&mut self, cut: Cut, value: bool) {
        let slot = match cut {
            Cut::NChannels => &mut self.nchannels,
            Cut::Baseline => &mut self.baseline,
            Cut::EventDt => &mut self.event_dt,
            Cut::LongWait => &mut self.long_wait,
            Cut::TriggerTime => &mut self.trigger_time,
            Cut::SingleScatter => &mut self.single_scatter,
            Cut::S1MaxFrac => &mut self.s1_max_frac,
            Cut::S2F90 => &mut self.s2_f90,
            Cut::S2Size => &mut self.s2_size,
            Cut::VetoPresent => &mut self.veto_present,
            Cut::VetoMatch => &mut self.veto_match,
        };
        *slot = value;
    }

    #[inline]
    pub fn basic(&self) -> bool {
        self.nchannels && self.baseline && self.event_dt && self.long_wait
    }

    #[inline]
    pub fn analysis(&self) -> bool {
        self.single_scatter
            && self.s1_max_frac
            && self.s2_f90
            && self.veto_present
            && self.veto_match
    }

    #[inline]
    pub fn accepted(&self) -> bool {
        self.basic() && self.analysis()
    }
}
