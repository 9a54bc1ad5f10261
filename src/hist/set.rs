use super::livetime::Livetime;
use super::{Hist1D, Hist2D};
use crate::error::{SladError, SladResult};
use crate::selector::cuts::{Cut, CutFlags};
use crate::selector::event::RawEvent;
use crate::selector::observables::Observables;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

/// High-rate triggers with a digital sum in this range are kept 1 in 33.
pub const PRESCALE_SUM_MIN: f64 = 250.0;
pub const PRESCALE_SUM_MAX: f64 = 1200.0;
pub const PRESCALE_WEIGHT: f64 = 33.0;

#[inline]
pub fn is_prescaled(ev: &RawEvent) -> bool {
    ev.tpc_digital_sum >= PRESCALE_SUM_MIN && ev.tpc_digital_sum < PRESCALE_SUM_MAX
}

#[inline]
pub fn event_weight(ev: &RawEvent) -> f64 {
    if is_prescaled(ev) {
        PRESCALE_WEIGHT
    } else {
        1.0
    }
}

/// The analysis histograms for accepted events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSet {
    pub h_s1: Hist1D,
    pub h_s2: Hist1D,
    pub h_f90vss1: Hist2D,
    pub h_log10s2overs1vsf90: Hist2D,
    pub h_ene: Hist1D,
    pub h_lys1vsene: Hist2D,
    pub h_f90vsene: Hist2D,
    pub h_rvsene: Hist2D,
    pub h_veto_cluster_charge_vec0: Hist1D,
}

impl Default for HistogramSet {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramSet {
    pub fn new() -> Self {
        Self {
            h_s1: Hist1D::new("h_s1", "; S1 [PE]; a.u.", 500, 0., 6000.),
            h_s2: Hist1D::new("h_s2", "; S2 [PE]; a.u.", 500, 0., 60000.),
            h_f90vss1: Hist2D::new("h_f90vss1", "; S1 [PE]; f90", 1000, 0., 3000., 1000, 0., 1.),
            h_log10s2overs1vsf90: Hist2D::new(
                "h_log10s2overs1vsf90",
                "; f90; Log_{10}(S2/S1)",
                500,
                0.,
                1.,
                500,
                -1.,
                4.,
            ),
            h_ene: Hist1D::new("h_ene", "; E [keV]; a.u.", 500, 0., 600.),
            h_lys1vsene: Hist2D::new(
                "h_lys1vsene",
                "; E [keV]; LY_{S1} [PE/keV]",
                500,
                0.,
                600.,
                500,
                0.,
                10.,
            ),
            h_f90vsene: Hist2D::new("h_f90vsene", "; E [keV]; f90", 500, 0., 600., 500, 0., 1.),
            h_rvsene: Hist2D::new("h_rvsene", "; E [keV]; r", 500, 0., 600., 500, 0., 1.),
            h_veto_cluster_charge_vec0: Hist1D::new(
                "h_veto_cluster_charge_vec0",
                "; PE; a.u.",
                100,
                0.,
                5000.,
            ),
        }
    }

    pub fn fill(&mut self, ev: &RawEvent, obs: &Observables) {
        let w = event_weight(ev);

        self.h_s1.fill(obs.s1, w);
        self.h_s2.fill(obs.s2, w);
        self.h_f90vss1.fill(obs.s1, obs.f90, w);
        self.h_log10s2overs1vsf90
            .fill(obs.f90, obs.log10_s2_over_s1, w);
        self.h_ene.fill(obs.energy, w);
        self.h_lys1vsene.fill(obs.energy, obs.ly_s1, w);
        self.h_f90vsene.fill(obs.energy, obs.f90, w);
        self.h_rvsene.fill(obs.energy, obs.r, w);

        // veto charge is never prescale-corrected
        if let Some(&charge) = ev.veto.cluster_charges.first() {
            self.h_veto_cluster_charge_vec0.fill(charge, 1.0);
        }
    }

    pub fn merge(&mut self, other: &HistogramSet) -> SladResult<()> {
        self.h_s1.merge(&other.h_s1)?;
        self.h_s2.merge(&other.h_s2)?;
        self.h_f90vss1.merge(&other.h_f90vss1)?;
        self.h_log10s2overs1vsf90
            .merge(&other.h_log10s2overs1vsf90)?;
        self.h_ene.merge(&other.h_ene)?;
        self.h_lys1vsene.merge(&other.h_lys1vsene)?;
        self.h_f90vsene.merge(&other.h_f90vsene)?;
        self.h_rvsene.merge(&other.h_rvsene)?;
        self.h_veto_cluster_charge_vec0
            .merge(&other.h_veto_cluster_charge_vec0)?;
        Ok(())
    }

    pub fn check_shape(&self) -> SladResult<()> {
        for h in self.hists_1d() {
            h.check_shape()?;
        }
        for h in self.hists_2d() {
            h.check_shape()?;
        }
        Ok(())
    }

    pub fn hists_1d(&self) -> [&Hist1D; 4] {
        [
            &self.h_s1,
            &self.h_s2,
            &self.h_ene,
            &self.h_veto_cluster_charge_vec0,
        ]
    }

    pub fn hists_2d(&self) -> [&Hist2D; 5] {
        [
            &self.h_f90vss1,
            &self.h_log10s2overs1vsf90,
            &self.h_lys1vsene,
            &self.h_f90vsene,
            &self.h_rvsene,
        ]
    }
}

/// How many processed events passed each cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutTally {
    pub processed: u64,
    pub accepted: u64,
    pub prescaled: u64,
    passed: Vec<u64>,
}

impl Default for CutTally {
    fn default() -> Self {
        Self {
            processed: 0,
            accepted: 0,
            prescaled: 0,
            passed: vec![0; Cut::COUNT],
        }
    }
}

impl CutTally {
    pub fn record(&mut self, ev: &RawEvent, flags: &CutFlags) {
        self.processed += 1;
        for (i, cut) in Cut::iter().enumerate() {
            if flags.passed(cut) {
                self.passed[i] += 1;
            }
        }
        if flags.accepted() {
            self.accepted += 1;
            if is_prescaled(ev) {
                self.prescaled += 1;
            }
        }
    }

    pub fn check_shape(&self) -> SladResult<()> {
        if self.passed.len() != Cut::COUNT {
            return Err(SladError::Binning(format!(
                "cut tally needs {} counters, got {}",
                Cut::COUNT,
                self.passed.len()
            )));
        }
        Ok(())
    }

    pub fn passed(&self, cut: Cut) -> u64 {
        self.passed[cut as usize]
    }

    pub fn merge(&mut self, other: &CutTally) {
        self.processed += other.processed;
        self.accepted += other.accepted;
        self.prescaled += other.prescaled;
        for (d, s) in self.passed.iter_mut().zip(&other.passed) {
            *d += s;
        }
    }
}

/// Everything one partition accumulates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    pub hists: HistogramSet,
    pub livetime: Livetime,
    pub tally: CutTally,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(mut self, other: Accumulator) -> SladResult<Self> {
        self.hists.merge(&other.hists)?;
        self.livetime.merge(&other.livetime);
        self.tally.merge(&other.tally);
        Ok(self)
    }
}
