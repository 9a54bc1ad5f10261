mod tables;

use slad_ambe::selector::AnalysisResults;

pub use self::tables::{cut_flow as print_cut_flow, summary as print_summary};

/// Full terminal report of a finished run.
pub fn print_full_report(results: &AnalysisResults, with_hists: bool) {
    tables::summary(results);
    tables::cut_flow(results);
    tables::livetime(results);
    if with_hists {
        tables::histograms(results);
    }
}
