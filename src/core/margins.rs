use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Floor applied to a side whose contributions sum to zero.
pub const MIN_SIDE_PADDING_PX: f64 = 10.0;
/// Flat buffer added to every side.
pub const MARGIN_BUFFER_PX: f64 = 10.0;

/// Independently owned padding contributions feeding the margins.
///
/// Each field is written by exactly one producer (axis caption, tick labels,
/// legends) and read when margins are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddingContributions {
    pub x_axis_label: f64,
    pub x_tick_label: f64,
    pub y_axis_label: f64,
    pub y_tick_label: f64,
    pub right_y_axis_label: f64,
    pub right_y_tick_label: f64,
    pub legend_top: f64,
    pub legend_bottom: f64,
    pub legend_left: f64,
    pub legend_right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Plot width left after horizontal margins, never negative.
    #[must_use]
    pub fn effective_width(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.width) - self.left - self.right).max(0.0)
    }

    /// Plot height left after vertical margins, never negative.
    #[must_use]
    pub fn effective_height(self, viewport: Viewport) -> f64 {
        (f64::from(viewport.height) - self.top - self.bottom).max(0.0)
    }
}

/// Turns padding contributions into final margins.
pub trait MarginStrategy: Send + Sync {
    fn margins(&self, paddings: &PaddingContributions) -> Margins;
}

/// Default margin rule: each side is `(sum || 10) + 10`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginModel;

impl MarginStrategy for MarginModel {
    fn margins(&self, paddings: &PaddingContributions) -> Margins {
        compute_margins(paddings)
    }
}

#[must_use]
pub fn compute_margins(paddings: &PaddingContributions) -> Margins {
    let top = paddings.legend_top;
    let bottom = paddings.x_axis_label + paddings.x_tick_label + paddings.legend_bottom;
    let left = paddings.y_axis_label + paddings.y_tick_label + paddings.legend_left;
    let right =
        paddings.right_y_axis_label + paddings.right_y_tick_label + paddings.legend_right;

    Margins {
        top: floor_side(top) + MARGIN_BUFFER_PX,
        right: floor_side(right) + MARGIN_BUFFER_PX,
        bottom: floor_side(bottom) + MARGIN_BUFFER_PX,
        left: floor_side(left) + MARGIN_BUFFER_PX,
    }
}

fn floor_side(sum: f64) -> f64 {
    // a zero (or NaN) sum falls back to the floor, any other value is kept
    if sum == 0.0 || sum.is_nan() {
        MIN_SIDE_PADDING_PX
    } else {
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::{PaddingContributions, compute_margins};
    use crate::core::Viewport;

    #[test]
    fn empty_contributions_yield_twenty_px_sides() {
        let margins = compute_margins(&PaddingContributions::default());
        assert_eq!(margins.top, 20.0);
        assert_eq!(margins.right, 20.0);
        assert_eq!(margins.bottom, 20.0);
        assert_eq!(margins.left, 20.0);
    }

    #[test]
    fn bottom_sums_axis_and_legend_contributions() {
        let paddings = PaddingContributions {
            x_axis_label: 34.0,
            legend_bottom: 6.0,
            ..PaddingContributions::default()
        };
        let margins = compute_margins(&paddings);
        assert_eq!(margins.bottom, 50.0);
        assert_eq!(margins.top, 20.0);
    }

    #[test]
    fn oversized_margins_clamp_effective_size_to_zero() {
        let paddings = PaddingContributions {
            y_axis_label: 300.0,
            right_y_axis_label: 300.0,
            legend_top: 500.0,
            ..PaddingContributions::default()
        };
        let margins = compute_margins(&paddings);
        let viewport = Viewport::new(200, 100);
        assert_eq!(margins.effective_width(viewport), 0.0);
        assert_eq!(margins.effective_height(viewport), 0.0);
    }
}
