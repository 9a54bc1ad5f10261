use clap::{CommandFactory, FromArgMatches, Parser};
use slad_ambe::config::{Calibration, Config, StreamSwitches};
use slad_ambe::SladError;
use std::fs;
use tempfile::tempdir;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let argv = std::iter::once("test").chain(args.iter().copied());
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert!(config.streams.load_allpulses);
    assert!(config.streams.load_veto);
    assert_eq!(config.calibration.g2_over_g1, 178.296);
    assert_eq!(config.calibration.alpha_factor, 0.000673624);
    assert!(config.calibration.validate().is_ok());

    // clap defaults agree with Default
    let (cli, _) = parse(&[]);
    assert_eq!(cli.calibration.work_function, config.calibration.work_function);
    assert_eq!(cli.calibration.excitation_ratio, 0.21);
    assert!(cli.streams.load_xyl_xy);
}

#[test]
fn test_load_partial_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("slad.json");
    fs::write(
        &path,
        r#"{ "streams": { "load_veto": false }, "calibration": { "g2_over_g1": 150.0 } }"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert!(!config.streams.load_veto);
    assert!(config.streams.load_masas_xy);
    assert_eq!(config.calibration.g2_over_g1, 150.0);
    assert_eq!(config.calibration.alpha_factor, 0.000673624);
}

#[test]
fn test_invalid_calibration_in_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "calibration": { "alpha_factor": 0.0 } }"#).unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SladError::Config(_))
    ));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SladError::Json(_))
    ));

    assert!(matches!(
        Config::load_from_file(dir.path().join("absent.json")),
        Err(SladError::Io(_))
    ));
}

#[test]
fn test_validate() {
    let bad = Calibration {
        work_function: f64::NAN,
        ..Calibration::default()
    };
    assert!(bad.validate().is_err());

    let bad = Calibration {
        excitation_ratio: -0.1,
        ..Calibration::default()
    };
    assert!(bad.validate().is_err());

    let zero_ratio = Calibration {
        excitation_ratio: 0.0,
        ..Calibration::default()
    };
    assert!(zero_ratio.validate().is_ok());
}

#[test]
fn test_cli_overrides_only_typed_flags() {
    let mut file_config = Config {
        streams: StreamSwitches::primary_only(),
        calibration: Calibration {
            g2_over_g1: 150.0,
            alpha_factor: 0.0007,
            ..Calibration::default()
        },
    };

    let (cli, matches) = parse(&["--g2-over-g1", "200", "--load-masas-xy", "true"]);
    file_config.merge_from_cli(&cli, &matches);

    assert_eq!(file_config.calibration.g2_over_g1, 200.0);
    assert!(file_config.streams.load_masas_xy);
    // untouched by the command line, so the file values stay
    assert_eq!(file_config.calibration.alpha_factor, 0.0007);
    assert!(!file_config.streams.load_veto);
    assert!(!file_config.streams.load_allpulses);
}
