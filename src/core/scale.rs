use serde::{Deserialize, Serialize};

/// Linear mapping from a value domain onto a pixel range.
///
/// A reversed range (`range.0 > range.1`) mirrors the axis. A collapsed
/// domain maps every value onto `range.0`; a domain containing NaN maps
/// everything to NaN. Neither case is rejected because the row pipeline
/// guards the result itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self { range, ..self }
    }

    /// Maps a domain value to a pixel position.
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let normalized = if span == 0.0 {
            // collapsed extent: x / inf, which is 0 for finite x
            (value - d0) / f64::INFINITY
        } else {
            (value - d0) / span
        };
        r0 + (r1 - r0) * normalized
    }

    /// Maps a pixel position back into the domain.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (d1 - d0) * ((pixel - r0) / span)
    }

    /// Round tick values covering the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = tick_step(lo, hi, count);
        if !step.is_finite() || step <= 0.0 {
            return if lo.is_finite() && lo == hi {
                vec![lo]
            } else {
                Vec::new()
            };
        }

        let start = (lo / step).ceil();
        let stop = (hi / step).floor();
        if start > stop {
            return Vec::new();
        }
        let steps = (stop - start) as usize;
        (0..=steps)
            .map(|i| (start + i as f64) * step)
            .collect()
    }

    /// Number of fractional digits needed to print ticks at `count` density.
    #[must_use]
    pub fn tick_precision(self, count: usize) -> usize {
        let (lo, hi) = self.domain;
        let step = tick_step(lo.min(hi), lo.max(hi), count);
        if !step.is_finite() || step <= 0.0 {
            return 0;
        }
        let digits = -(step.log10().floor());
        if digits > 0.0 { digits as usize } else { 0 }
    }
}

/// Tick step rounded to 1, 2 or 5 times a power of ten.
#[must_use]
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return f64::NAN;
    }
    let raw = span / count as f64;
    let mut step = 10f64.powf(raw.log10().floor());
    let error = count as f64 / span * step;
    if error <= 0.15 {
        step *= 10.0;
    } else if error <= 0.35 {
        step *= 5.0;
    } else if error <= 0.75 {
        step *= 2.0;
    }
    step
}
