use crate::reports;
use clap::{ArgMatches, Args};
use slad_ambe::config::Config;
use slad_ambe::driver::Driver;
use slad_ambe::selector::AmBeSelector;
use slad_ambe::sink::{JsonSink, ResultSink};
use slad_ambe::store::EventStore;
use slad_ambe::SladResult;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Primary event file; friend streams are looked up next to it.
    pub input: PathBuf,

    #[arg(short, long, default_value = "results.json")]
    pub output: PathBuf,

    /// Worker threads (0 = all cores).
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Index-space partitions (0 = one per worker).
    #[arg(short, long, default_value_t = 0)]
    pub partitions: usize,

    /// JSON file with stream switches and calibration; CLI flags override it.
    #[arg(long = "config")]
    pub config_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    #[command(flatten)]
    pub config: Config,
}

pub fn run(args: RunArgs, matches: &ArgMatches) -> SladResult<()> {
    let clock = Instant::now();

    let config = match &args.config_file {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path.display());
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(&args.config, matches);
            file_config
        }
        None => args.config.clone(),
    };
    config.calibration.validate()?;

    let store = EventStore::open(&args.input, &config.streams)?;
    let selector = AmBeSelector::new(config.calibration.clone());
    let results = Driver::new(args.threads, args.partitions).run(&selector, &store)?;

    let mut sink = JsonSink::new(&args.output).pretty(args.pretty);
    sink.write(&results)?;

    reports::print_summary(&results);
    reports::print_cut_flow(&results);

    info!("Done! {:.2} s.", clock.elapsed().as_secs_f64());
    Ok(())
}
