use super::event::{PositionReco, RawEvent};
use crate::config::Calibration;
use serde::{Deserialize, Serialize};

/// Position / correction value when no reconstruction applies.
pub const MISSING: f64 = -998.0;
/// Value of a derived quantity whose arithmetic is undefined for this event.
pub const UNDEFINED: f64 = -999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecoAlgorithm {
    Masas,
    Xylocator,
    Aww,
}

impl RecoAlgorithm {
    pub const PRIORITY: [RecoAlgorithm; 3] = [Self::Masas, Self::Xylocator, Self::Aww];
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observables {
    pub s1: f64,
    /// S2 after the xy correction.
    pub s2: f64,
    pub f90: f64,
    pub xycorr: f64,
    pub log10_s2_over_s1: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// [keV]
    pub energy: f64,
    /// S1 light yield [PE/keV]
    pub ly_s1: f64,
    /// Ionization fraction ne / (ne + ng).
    pub ion_fraction: f64,
    /// Recoil discriminant.
    pub r: f64,
    /// Algorithm providing the correction factor and coordinates.
    pub xycorr_source: Option<RecoAlgorithm>,
    pub xy_source: Option<RecoAlgorithm>,
}

impl Observables {
    pub fn derive(ev: &RawEvent, cal: &Calibration) -> Self {
        let recos = ev.reconstructions();
        let (xycorr_source, xycorr, (xy_source, x, y)) = select_reconstruction(&recos);

        let s1 = ev.total_s1_corr;
        let s2 = ev.total_s2_corr * xycorr;

        let log10_s2_over_s1 = if s2 > 0.0 && s1 > 0.0 {
            (s2 / s1).log10()
        } else {
            UNDEFINED
        };

        let radius = if x > 0.0 && y > 0.0 {
            (x * x + y * y).sqrt()
        } else {
            MISSING
        };

        let g1 = cal.g1();
        let g2 = cal.g2();
        let energy = cal.alpha_factor * (s2 + cal.g2_over_g1 * s1);
        let ly_s1 = ratio(s1, energy);
        let ng = s1 / g1;
        let ne = s2 / g2;
        let ion_fraction = ratio(ne, ne + ng);
        let r = if ion_fraction == UNDEFINED {
            UNDEFINED
        } else {
            1.0 - (cal.excitation_ratio + 1.0) * ion_fraction
        };

        Self {
            s1,
            s2,
            f90: ev.total_f90,
            xycorr,
            log10_s2_over_s1,
            x,
            y,
            radius,
            energy,
            ly_s1,
            ion_fraction,
            r,
            xycorr_source,
            xy_source,
        }
    }
}

type XySelection = (Option<RecoAlgorithm>, f64, f64);

/// First algorithm with a correction factor wins, and its coordinates go with
/// it. Without any factor, coordinates come from the first algorithm with a
/// complete (x, y). x and y never come from different algorithms.
pub fn select_reconstruction(
    recos: &[PositionReco; 3],
) -> (Option<RecoAlgorithm>, f64, XySelection) {
    let tagged = RecoAlgorithm::PRIORITY.iter().copied().zip(recos.iter());

    if let Some((alg, reco)) = tagged.clone().find(|(_, r)| r.has_factor()) {
        let xy = if reco.has_xy() {
            (Some(alg), reco.x, reco.y)
        } else {
            (None, MISSING, MISSING)
        };
        return (Some(alg), reco.xycorr_factor, xy);
    }

    let xy = tagged
        .into_iter()
        .find(|(_, r)| r.has_xy())
        .map(|(alg, r)| (Some(alg), r.x, r.y))
        .unwrap_or((None, MISSING, MISSING));
    (None, MISSING, xy)
}

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    let v = num / den;
    if den == 0.0 || !v.is_finite() {
        UNDEFINED
    } else {
        v
    }
}
