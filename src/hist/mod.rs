//! Fixed-binning weighted histograms.
//!
//! Bin numbering follows the ROOT convention: bin 0 is the underflow, bins
//! `1..=bins` cover `[low, high)`, and `bins + 1` is the overflow. Each bin
//! keeps the sum of weights and the sum of squared weights, so errors remain
//! correct for weighted fills and merging is plain element-wise addition.

pub mod livetime;
pub mod set;

use crate::error::{SladError, SladResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub bins: usize,
    pub low: f64,
    pub high: f64,
}

impl Axis {
    pub fn new(bins: usize, low: f64, high: f64) -> Self {
        debug_assert!(bins > 0 && high > low);
        Self { bins, low, high }
    }

    /// Number of storage slots including under/overflow.
    #[inline]
    pub fn slots(&self) -> usize {
        self.bins + 2
    }

    #[inline]
    pub fn width(&self) -> f64 {
        (self.high - self.low) / self.bins as f64
    }

    /// NaN lands in the underflow.
    #[inline]
    pub fn find_bin(&self, x: f64) -> usize {
        if x.is_nan() || x < self.low {
            return 0;
        }
        if x >= self.high {
            return self.bins + 1;
        }
        let b = ((x - self.low) / (self.high - self.low) * self.bins as f64) as usize + 1;
        b.min(self.bins)
    }

    pub fn validate(&self) -> SladResult<()> {
        if self.bins == 0 || self.high.partial_cmp(&self.low) != Some(Ordering::Greater) {
            return Err(SladError::Binning(format!("invalid axis {:?}", self)));
        }
        Ok(())
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        self.low + (bin as f64 - 0.5) * self.width()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist1D {
    pub name: String,
    pub title: String,
    pub axis: Axis,
    sumw: Vec<f64>,
    sumw2: Vec<f64>,
    entries: u64,
}

impl Hist1D {
    pub fn new(name: &str, title: &str, bins: usize, low: f64, high: f64) -> Self {
        let axis = Axis::new(bins, low, high);
        Self {
            name: name.to_string(),
            title: title.to_string(),
            axis,
            sumw: vec![0.0; axis.slots()],
            sumw2: vec![0.0; axis.slots()],
            entries: 0,
        }
    }

    pub fn fill(&mut self, x: f64, w: f64) {
        let bin = self.axis.find_bin(x);
        self.sumw[bin] += w;
        self.sumw2[bin] += w * w;
        self.entries += 1;
    }

    #[inline]
    pub fn find_bin(&self, x: f64) -> usize {
        self.axis.find_bin(x)
    }

    pub fn bin_content(&self, bin: usize) -> f64 {
        self.sumw.get(bin).copied().unwrap_or(0.0)
    }

    pub fn bin_error(&self, bin: usize) -> f64 {
        self.sumw2.get(bin).copied().unwrap_or(0.0).sqrt()
    }

    pub fn sumw2(&self, bin: usize) -> f64 {
        self.sumw2.get(bin).copied().unwrap_or(0.0)
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of weights over the in-range bins.
    pub fn integral(&self) -> f64 {
        self.sumw[1..=self.axis.bins].iter().sum()
    }

    pub fn underflow(&self) -> f64 {
        self.sumw[0]
    }

    pub fn overflow(&self) -> f64 {
        self.sumw[self.axis.bins + 1]
    }

    /// Weighted mean of the in-range bin centers.
    pub fn mean(&self) -> Option<f64> {
        let total = self.integral();
        if total == 0.0 {
            return None;
        }
        let moment: f64 = (1..=self.axis.bins)
            .map(|b| self.sumw[b] * self.axis.bin_center(b))
            .sum();
        Some(moment / total)
    }

    /// Storage must match the axis.
    pub fn check_shape(&self) -> SladResult<()> {
        self.axis.validate()?;
        check_slots(&self.name, self.axis.slots(), &self.sumw, &self.sumw2)
    }

    pub fn merge(&mut self, other: &Hist1D) -> SladResult<()> {
        if self.axis != other.axis || self.name != other.name {
            return Err(SladError::Binning(format!(
                "cannot merge '{}' {:?} with '{}' {:?}",
                self.name, self.axis, other.name, other.axis
            )));
        }
        add_into(&mut self.sumw, &other.sumw);
        add_into(&mut self.sumw2, &other.sumw2);
        self.entries += other.entries;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hist2D {
    pub name: String,
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    sumw: Vec<f64>,
    sumw2: Vec<f64>,
    entries: u64,
}

impl Hist2D {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        title: &str,
        x_bins: usize,
        x_low: f64,
        x_high: f64,
        y_bins: usize,
        y_low: f64,
        y_high: f64,
    ) -> Self {
        let x_axis = Axis::new(x_bins, x_low, x_high);
        let y_axis = Axis::new(y_bins, y_low, y_high);
        let slots = x_axis.slots() * y_axis.slots();
        Self {
            name: name.to_string(),
            title: title.to_string(),
            x_axis,
            y_axis,
            sumw: vec![0.0; slots],
            sumw2: vec![0.0; slots],
            entries: 0,
        }
    }

    /// Global slot of the (bx, by) cell.
    #[inline]
    pub fn bin(&self, bx: usize, by: usize) -> usize {
        by * self.x_axis.slots() + bx
    }

    pub fn find_bin(&self, x: f64, y: f64) -> (usize, usize) {
        (self.x_axis.find_bin(x), self.y_axis.find_bin(y))
    }

    pub fn fill(&mut self, x: f64, y: f64, w: f64) {
        let (bx, by) = self.find_bin(x, y);
        let g = self.bin(bx, by);
        self.sumw[g] += w;
        self.sumw2[g] += w * w;
        self.entries += 1;
    }

    pub fn bin_content(&self, bx: usize, by: usize) -> f64 {
        self.sumw.get(self.bin(bx, by)).copied().unwrap_or(0.0)
    }

    pub fn bin_error(&self, bx: usize, by: usize) -> f64 {
        self.sumw2
            .get(self.bin(bx, by))
            .copied()
            .unwrap_or(0.0)
            .sqrt()
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn integral(&self) -> f64 {
        let mut total = 0.0;
        for by in 1..=self.y_axis.bins {
            let row = self.bin(1, by);
            total += self.sumw[row..row + self.x_axis.bins].iter().sum::<f64>();
        }
        total
    }

    pub fn check_shape(&self) -> SladResult<()> {
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        check_slots(
            &self.name,
            self.x_axis.slots() * self.y_axis.slots(),
            &self.sumw,
            &self.sumw2,
        )
    }

    pub fn merge(&mut self, other: &Hist2D) -> SladResult<()> {
        if self.x_axis != other.x_axis || self.y_axis != other.y_axis || self.name != other.name
        {
            return Err(SladError::Binning(format!(
                "cannot merge '{}' with '{}': axes differ",
                self.name, other.name
            )));
        }
        add_into(&mut self.sumw, &other.sumw);
        add_into(&mut self.sumw2, &other.sumw2);
        self.entries += other.entries;
        Ok(())
    }
}

fn check_slots(name: &str, slots: usize, sumw: &[f64], sumw2: &[f64]) -> SladResult<()> {
    if sumw.len() != slots || sumw2.len() != slots {
        return Err(SladError::Binning(format!(
            "'{}' has {}/{} bin sums, axes need {}",
            name,
            sumw.len(),
            sumw2.len(),
            slots
        )));
    }
    Ok(())
}

fn add_into(dst: &mut [f64], src: &[f64]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d += s;
    }
}
