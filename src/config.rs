use crate::error::{SladError, SladResult};
use clap::{parser::ValueSource, ArgAction, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub streams: StreamSwitches,
    #[command(flatten)]
    pub calibration: Calibration,
}

/// Which satellite streams are joined onto the primary event stream.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSwitches {
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub load_allpulses: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub load_masas_xy: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub load_xyl_xy: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub load_aww_xy: bool,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub load_veto: bool,
}

impl Default for StreamSwitches {
    fn default() -> Self {
        Self {
            load_allpulses: true,
            load_masas_xy: true,
            load_xyl_xy: true,
            load_aww_xy: true,
            load_veto: true,
        }
    }
}

impl StreamSwitches {
    /// Every satellite switched off; only the primary stream is read.
    pub fn primary_only() -> Self {
        Self {
            load_allpulses: false,
            load_masas_xy: false,
            load_xyl_xy: false,
            load_aww_xy: false,
            load_veto: false,
        }
    }
}

/// Light/charge calibration (Doke plot values for UAr).
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    #[arg(long, default_value_t = 178.296)]
    pub g2_over_g1: f64,
    #[arg(long, default_value_t = 0.000673624)]
    pub alpha_factor: f64,

    // T. Doke et al., Jpn. J. Appl. Phys. 41, 1538 (2002)
    /// Mean work function per quantum [keV].
    #[arg(long, default_value_t = 19.5e-3)]
    pub work_function: f64,
    /// Excitation-to-ionization ratio.
    #[arg(long, default_value_t = 0.21)]
    pub excitation_ratio: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            g2_over_g1: 178.296,
            alpha_factor: 0.000673624,
            work_function: 19.5e-3,
            excitation_ratio: 0.21,
        }
    }
}

impl Calibration {
    #[inline]
    pub fn g2(&self) -> f64 {
        self.work_function / self.alpha_factor
    }

    #[inline]
    pub fn g1(&self) -> f64 {
        self.g2() / self.g2_over_g1
    }

    pub fn validate(&self) -> SladResult<()> {
        let checks = [
            ("g2_over_g1", self.g2_over_g1),
            ("alpha_factor", self.alpha_factor),
            ("work_function", self.work_function),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SladError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.excitation_ratio.is_finite() || self.excitation_ratio < 0.0 {
            return Err(SladError::Config(format!(
                "excitation_ratio must be non-negative, got {}",
                self.excitation_ratio
            )));
        }
        Ok(())
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SladResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.calibration.validate()?;
        Ok(config)
    }

    /// Overwrites fields with CLI values, but only those the user actually typed.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(streams.load_allpulses);
        update_if_present!(streams.load_masas_xy);
        update_if_present!(streams.load_xyl_xy);
        update_if_present!(streams.load_aww_xy);
        update_if_present!(streams.load_veto);

        update_if_present!(calibration.g2_over_g1);
        update_if_present!(calibration.alpha_factor);
        update_if_present!(calibration.work_function);
        update_if_present!(calibration.excitation_ratio);
    }
}
