// Copyright 2025 the Barviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! A grouped bar chart needs three kinds of mapping:
//! - band scales for categories (and for groups inside one category band),
//! - a continuous scale for bar values,
//! - an ordinal scale from groups to colors.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use peniko::Brush;

use crate::domain::Domain;

/// Which continuous scale maps bar values to pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueScaleKind {
    /// Linear mapping.
    #[default]
    Linear,
    /// Base-10 logarithmic mapping. The domain must be strictly positive.
    Log,
}

impl ValueScaleKind {
    /// Instantiates a concrete scale for `domain` and `range`.
    pub fn instantiate(self, domain: (f64, f64), range: (f64, f64)) -> ScaleContinuous {
        match self {
            Self::Linear => ScaleContinuous::Linear(ScaleLinear::new(domain, range)),
            Self::Log => ScaleContinuous::Log(ScaleLog::new(domain, range)),
        }
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
        }
    }

    /// Returns the spacing of `count` nice ticks over the domain.
    ///
    /// This drives the decimal precision of formatted values.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (d0, d1) = self.domain();
        if count == 0 {
            return 0.0;
        }
        nice_step((d1 - d0).abs() / count as f64)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Log(s) => s.domain,
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Log(s) => s.range,
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    // Only ticks inside the domain; the value axis must not draw past the plot.
    let start = (min / step).ceil();
    let stop = (max / step).floor();
    let n_f = stop - start;
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        return Vec::new();
    };
    (0..=n).map(|i| (start + i as f64) * step).collect()
}

// Mantissa cut-offs between the 1/2/5/10 steps: the geometric means of neighbours.
const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new base-10 log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Non-positive values map to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns powers of `base` that fall within the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let exponent = |v: f64| {
            let e = v.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        // Tolerate rounding in `ln(x) / ln(base)` at exact powers.
        let min_e = exponent((self.log_base(min) - 1e-9).ceil());
        let max_e = exponent((self.log_base(max) + 1e-9).floor());
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }
}

/// A discrete band scale for categorical axes.
///
/// Padding is expressed as a fraction of the step (the distance between band starts):
/// `padding_inner` is reserved between bands, `padding_outer` before the first and after the
/// last band. Leftover space is split evenly on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, without padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
        }
    }

    /// Sets inner and outer padding as fractions of the step.
    ///
    /// Inner padding is clamped to `[0, 1]`, outer padding to `>= 0`.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Sets only the inner padding.
    pub fn with_padding_inner(self, inner: f64) -> Self {
        let outer = self.padding_outer;
        self.with_padding(inner, outer)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count as f64;
        let denom = (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0);
        (r1 - r0).abs() / denom
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start (left or top) position of the band at `index`.
    ///
    /// A reversed range (`r0 > r1`) lays bands out from `r0` towards `r1`, so the first band
    /// sits at the high end.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let span = (r1 - r0).abs();
        let n = self.count as f64;
        let step = self.step();
        let used = step * (n - self.padding_inner);
        let offset = (span - used) * 0.5 + step * index as f64;
        if r1 < r0 {
            r0 - offset - self.band_width()
        } else {
            r0 + offset
        }
    }

    /// Returns the center position of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }
}

/// An ordinal scale from a categorical domain to palette entries.
///
/// The Nth domain entry receives palette entry `N % palette.len()`.
#[derive(Clone, Debug)]
pub struct ScaleOrdinal {
    domain: Domain,
    palette: Vec<Brush>,
}

impl ScaleOrdinal {
    /// Creates an ordinal scale. Returns `None` if `palette` is empty.
    pub fn new(domain: Domain, palette: Vec<Brush>) -> Option<Self> {
        if palette.is_empty() {
            return None;
        }
        Some(Self { domain, palette })
    }

    /// Returns the paint for domain position `index`.
    pub fn at(&self, index: usize) -> &Brush {
        &self.palette[index % self.palette.len()]
    }

    /// Returns the paint for `value`, or `None` if it is outside the domain.
    pub fn get(&self, value: &str) -> Option<&Brush> {
        self.domain.index_of(value).map(|i| self.at(i))
    }

    /// Returns the domain.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn band_scale_inner_padding_splits_step() {
        // 2 bands, inner 0.1: step = 100 / 1.9, band = 0.9 step.
        let s = ScaleBand::new((0.0, 100.0), 2).with_padding_inner(0.1);
        let step = 100.0 / 1.9;
        assert!(close(s.step(), step));
        assert!(close(s.band_width(), 0.9 * step));
        assert!(close(s.x(0), 0.0));
        assert!(close(s.x(1), step));
        assert!(close(s.x(1) + s.band_width(), 100.0));
    }

    #[test]
    fn reversed_band_scale_starts_at_the_high_end() {
        let fwd = ScaleBand::new((0.0, 100.0), 3).with_padding(0.2, 0.1);
        let rev = ScaleBand::new((100.0, 0.0), 3).with_padding(0.2, 0.1);
        assert!(close(rev.band_width(), fwd.band_width()));
        for i in 0..3 {
            assert!(close(rev.center(i), 100.0 - fwd.center(i)));
        }
        assert!(rev.x(0) > rev.x(2));
        assert!(close(rev.x(0) + rev.band_width(), 100.0 - fwd.x(0)));
    }

    #[test]
    fn band_scale_outer_padding_centers_bands() {
        let s = ScaleBand::new((10.0, 30.0), 2).with_padding(0.0, 0.5);
        // step = 20 / 3; bands start half a step in.
        let step = 20.0 / 3.0;
        assert!(close(s.x(0), 10.0 + 0.5 * step));
        assert!(close(s.center(1), 30.0 - step));
    }

    #[test]
    fn linear_scale_inverts_for_vertical_ranges() {
        let s = ScaleLinear::new((0.0, 5.0), (100.0, 0.0));
        assert!(close(s.map(0.0), 100.0));
        assert!(close(s.map(5.0), 0.0));
        assert!(close(s.map(4.0), 20.0));
    }

    #[test]
    fn linear_ticks_stay_inside_domain() {
        let s = ScaleLinear::new((0.0, 5.0), (0.0, 1.0));
        assert_eq!(s.ticks(10), vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0]);
        let s = ScaleLinear::new((0.0, 4.7), (0.0, 1.0));
        assert_eq!(s.ticks(5), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn title_precision_step_for_hundred_ticks() {
        let s = ValueScaleKind::Linear.instantiate((0.0, 5.0), (100.0, 0.0));
        assert!(close(s.tick_step(100), 0.05));
    }

    #[test]
    fn step_rounds_at_geometric_midpoints() {
        // 7.2 / 100 sits between sqrt(50) and 7.5 times 0.01.
        let s = ValueScaleKind::Linear.instantiate((0.0, 7.2), (100.0, 0.0));
        assert!(close(s.tick_step(100), 0.1));
        assert!(close(nice_step(1.45), 2.0));
        assert!(close(nice_step(1.4), 1.0));
        assert!(close(nice_step(3.3), 5.0));
    }

    #[test]
    fn log_scale_maps_endpoints_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!(close(s.map(1.0), 0.0));
        assert!(close(s.map(100.0), 10.0));
        assert_eq!(s.ticks(0), vec![1.0, 10.0, 100.0]);
    }

    #[test]
    fn ordinal_scale_cycles_palette() {
        let domain = Domain::from_values(["a", "b", "c"]);
        let s = ScaleOrdinal::new(
            domain,
            vec![Brush::Solid(css::RED), Brush::Solid(css::BLUE)],
        )
        .expect("non-empty palette");
        assert_eq!(s.get("a"), Some(&Brush::Solid(css::RED)));
        assert_eq!(s.get("b"), Some(&Brush::Solid(css::BLUE)));
        assert_eq!(s.get("c"), Some(&Brush::Solid(css::RED)));
        assert_eq!(s.get("z"), None);
        assert!(ScaleOrdinal::new(Domain::new(), Vec::new()).is_none());
    }
}
