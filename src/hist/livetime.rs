use crate::error::{SladError, SladResult};
use crate::selector::cuts::{Cut, CutFlags};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::EnumIter;

/// Ordered cut stages of the livetime counter. `NoCuts` is the reference stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, Serialize, Deserialize)]
pub enum CutStage {
    NoCuts,
    NChannels,
    Baseline,
    EventDt,
    LongWait,
    SingleScatter,
    S1MaxFrac,
    S2F90,
    VetoPresent,
    VetoMatch,
}

// labels come from the cut table
impl fmt::Display for CutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cut() {
            Some(cut) => write!(f, "{}", cut),
            None => f.write_str("No cuts"),
        }
    }
}

impl CutStage {
    pub const REFERENCE: CutStage = CutStage::NoCuts;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn cut(self) -> Option<Cut> {
        match self {
            Self::NoCuts => None,
            Self::NChannels => Some(Cut::NChannels),
            Self::Baseline => Some(Cut::Baseline),
            Self::EventDt => Some(Cut::EventDt),
            Self::LongWait => Some(Cut::LongWait),
            Self::SingleScatter => Some(Cut::SingleScatter),
            Self::S1MaxFrac => Some(Cut::S1MaxFrac),
            Self::S2F90 => Some(Cut::S2F90),
            Self::VetoPresent => Some(Cut::VetoPresent),
            Self::VetoMatch => Some(Cut::VetoMatch),
        }
    }

    pub fn labels() -> Vec<String> {
        CutStage::iter().map(|s| s.to_string()).collect()
    }

    /// First stage (in order) the event fails, if any.
    pub fn first_failed(flags: &CutFlags) -> Option<CutStage> {
        CutStage::iter().find(|s| s.cut().is_some_and(|c| !flags.passed(c)))
    }
}

/// Per-stage exposure counter.
///
/// While events are processed the reference bin collects all exposure and
/// every other bin collects the time *rejected* up to and including that
/// stage. [`Livetime::finalize`] turns the rejected time into surviving time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Livetime {
    raw: Vec<f64>,
}

impl Default for Livetime {
    fn default() -> Self {
        Self {
            raw: vec![0.0; CutStage::COUNT],
        }
    }
}

impl Livetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: Vec<f64>) -> SladResult<Self> {
        if raw.len() != CutStage::COUNT {
            return Err(SladError::Binning(format!(
                "livetime needs {} stage bins, got {}",
                CutStage::COUNT,
                raw.len()
            )));
        }
        Ok(Self { raw })
    }

    pub fn record(&mut self, exposure: f64, flags: &CutFlags) {
        self.raw[CutStage::REFERENCE.index()] += exposure;
        if let Some(stage) = CutStage::first_failed(flags) {
            for bin in &mut self.raw[stage.index()..] {
                *bin += exposure;
            }
        }
    }

    pub fn raw(&self, stage: CutStage) -> f64 {
        self.raw[stage.index()]
    }

    pub fn merge(&mut self, other: &Livetime) {
        for (d, s) in self.raw.iter_mut().zip(&other.raw) {
            *d += s;
        }
    }

    pub fn finalize(&self) -> FinalLivetime {
        let total = self.raw[CutStage::REFERENCE.index()];
        let surviving = CutStage::iter()
            .map(|stage| {
                if stage.index() > CutStage::REFERENCE.index() {
                    total - self.raw[stage.index()]
                } else {
                    self.raw[stage.index()]
                }
            })
            .collect();
        FinalLivetime {
            labels: CutStage::labels(),
            surviving,
        }
    }
}

/// Surviving livetime per stage [s], keyed by stage label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalLivetime {
    pub labels: Vec<String>,
    pub surviving: Vec<f64>,
}

impl FinalLivetime {
    pub fn check_shape(&self) -> SladResult<()> {
        if self.surviving.len() != CutStage::COUNT || self.labels.len() != CutStage::COUNT {
            return Err(SladError::Binning(format!(
                "livetime needs {} stages, got {} values and {} labels",
                CutStage::COUNT,
                self.surviving.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    pub fn get(&self, stage: CutStage) -> f64 {
        self.surviving[stage.index()]
    }

    pub fn total(&self) -> f64 {
        self.get(CutStage::REFERENCE)
    }

    /// Livetime after the basic quality cuts; the exposure quoted for the run.
    pub fn analysis_livetime(&self) -> f64 {
        self.get(CutStage::LongWait)
    }
}
