use tracing::debug;

use crate::core::{DataRecord, LinearScale, Side};

/// Extent of the accessed values with the lower bound pinned at or below zero.
///
/// NaN values are skipped. An empty (or all-NaN) input yields `(NaN, NaN)`,
/// which the root-position guard later absorbs.
#[must_use]
pub fn derive_domain<F>(records: &[DataRecord], value_of: F) -> (f64, f64)
where
    F: Fn(&DataRecord) -> f64,
{
    let mut extent: Option<(f64, f64)> = None;
    for record in records {
        let value = value_of(record);
        if value.is_nan() {
            continue;
        }
        extent = Some(match extent {
            None => (value, value),
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
        });
    }

    match extent {
        Some((lo, hi)) if lo > 0.0 => (0.0, hi),
        Some(extent) => extent,
        None => (f64::NAN, f64::NAN),
    }
}

/// Builds the pane scale; a `Right` side reverses the range.
#[must_use]
pub fn build_scale(domain: (f64, f64), axis_width: f64, side: Side) -> LinearScale {
    let range = match side {
        Side::Left => (0.0, axis_width),
        Side::Right => (axis_width, 0.0),
    };
    LinearScale::new(domain, range)
}

/// Pixel position of value zero, falling back to `scale(1)`.
///
/// Only `-inf` and NaN trigger the fallback; `+inf` is passed through.
#[must_use]
pub fn root_position(scale: LinearScale) -> f64 {
    let root = scale.apply(0.0);
    if root == f64::NEG_INFINITY || root.is_nan() {
        scale.apply(1.0)
    } else {
        root
    }
}

/// Owns the quantitative scale of one pane across redraws.
#[derive(Debug, Clone, Default)]
pub struct ScaleEngine {
    scale: Option<LinearScale>,
    fixed: bool,
}

impl ScaleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an externally supplied scale, reused while elasticity is off.
    #[must_use]
    pub fn with_fixed_scale(scale: LinearScale) -> Self {
        Self {
            scale: Some(scale),
            fixed: true,
        }
    }

    #[must_use]
    pub fn scale(&self) -> Option<LinearScale> {
        self.scale
    }

    /// Whether the current scale was supplied from outside.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn set_fixed_scale(&mut self, scale: LinearScale) {
        self.scale = Some(scale);
        self.fixed = true;
    }

    /// Forgets a scale derived from data; a fixed scale is kept.
    pub fn clear_derived(&mut self) {
        if !self.fixed {
            self.scale = None;
        }
    }

    /// Returns the scale for this redraw, rebuilding it when none exists yet
    /// or when `elastic` is set.
    ///
    /// A derived scale whose domain came out NaN (no data yet) is never
    /// frozen; it is rebuilt on the next redraw.
    pub fn resolve<F>(
        &mut self,
        records: &[DataRecord],
        value_of: F,
        axis_width: f64,
        side: Side,
        elastic: bool,
    ) -> LinearScale
    where
        F: Fn(&DataRecord) -> f64,
    {
        match self.scale {
            Some(scale) if !elastic && (self.fixed || has_finite_domain(scale)) => scale,
            _ => {
                let domain = derive_domain(records, value_of);
                let scale = build_scale(domain, axis_width, side);
                debug!(
                    domain_lo = domain.0,
                    domain_hi = domain.1,
                    axis_width,
                    ?side,
                    "rebuilt row scale"
                );
                self.scale = Some(scale);
                self.fixed = false;
                scale
            }
        }
    }
}

fn has_finite_domain(scale: LinearScale) -> bool {
    let (lo, hi) = scale.domain();
    lo.is_finite() && hi.is_finite()
}
