use crate::reports;
use clap::Args;
use slad_ambe::sink::load_results;
use slad_ambe::SladResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Results file written by `run`.
    pub results: PathBuf,

    /// Also list every histogram.
    #[arg(long, default_value_t = false)]
    pub hists: bool,
}

pub fn run(args: ReportArgs) -> SladResult<()> {
    info!("📊 Loading results: {}", args.results.display());
    let results = load_results(&args.results)?;
    reports::print_full_report(&results, args.hists);
    Ok(())
}
