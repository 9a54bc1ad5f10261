pub mod cuts;
pub mod event;
pub mod observables;

use self::cuts::CutFlags;
use self::event::RawEvent;
use self::observables::Observables;
use crate::config::Calibration;
use crate::error::SladResult;
use crate::hist::livetime::FinalLivetime;
use crate::hist::set::{Accumulator, CutTally, HistogramSet};
use serde::{Deserialize, Serialize};

/// Three-phase event selection. A host calls `init` once per partition,
/// `step` for every record of that partition, folds partitions together with
/// `merge`, and calls `finalize` once on the merged state.
pub trait Selector: Sync {
    type Partial: Send;
    type Output;

    fn init(&self) -> Self::Partial;

    /// Processes one record; returns whether it was accepted.
    fn step(&self, partial: &mut Self::Partial, event: &RawEvent) -> bool;

    /// Must be associative and commutative.
    fn merge(&self, a: Self::Partial, b: Self::Partial) -> SladResult<Self::Partial>;

    fn finalize(&self, partial: Self::Partial) -> Self::Output;
}

/// AmBe nuclear-recoil selection.
#[derive(Debug, Clone, Default)]
pub struct AmBeSelector {
    pub calibration: Calibration,
}

impl AmBeSelector {
    pub fn new(calibration: Calibration) -> Self {
        Self { calibration }
    }

    /// Derived quantities and cut decisions for one record, without accumulating.
    pub fn inspect(&self, event: &RawEvent) -> (Observables, CutFlags) {
        let obs = Observables::derive(event, &self.calibration);
        let flags = CutFlags::evaluate(event, &obs);
        (obs, flags)
    }
}

impl Selector for AmBeSelector {
    type Partial = Accumulator;
    type Output = AnalysisResults;

    fn init(&self) -> Accumulator {
        Accumulator::new()
    }

    fn step(&self, acc: &mut Accumulator, event: &RawEvent) -> bool {
        let (obs, flags) = self.inspect(event);

        acc.livetime.record(event.lifetime, &flags);
        acc.tally.record(event, &flags);

        let accepted = flags.accepted();
        if accepted {
            acc.hists.fill(event, &obs);
        }
        accepted
    }

    fn merge(&self, a: Accumulator, b: Accumulator) -> SladResult<Accumulator> {
        a.merge(b)
    }

    fn finalize(&self, acc: Accumulator) -> AnalysisResults {
        let livetime = acc.livetime.finalize();
        AnalysisResults {
            total_livetime: livetime.analysis_livetime(),
            livetime,
            tally: acc.tally,
            hists: acc.hists,
        }
    }
}

/// Final, merged output of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Livetime surviving the basic quality cuts [s].
    pub total_livetime: f64,
    pub livetime: FinalLivetime,
    pub tally: CutTally,
    pub hists: HistogramSet,
}

impl AnalysisResults {
    /// Every vector matches its axes, stages and cuts.
    pub fn check_shape(&self) -> SladResult<()> {
        self.livetime.check_shape()?;
        self.tally.check_shape()?;
        self.hists.check_shape()
    }
}
