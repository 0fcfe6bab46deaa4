use serde::{Deserialize, Serialize};

use crate::core::Pane;

/// Clickable band of one rendered row, in absolute pixels.
///
/// The band spans the whole pane width so rows with tiny (or zero-width)
/// bars stay clickable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowBand {
    pub pane: Option<Pane>,
    pub index: usize,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl RowBand {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Row addressed by a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowHit {
    pub pane: Option<Pane>,
    pub index: usize,
}

/// First band under the pointer.
#[must_use]
pub fn hit_test(bands: &[RowBand], x: f64, y: f64) -> Option<RowHit> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    bands
        .iter()
        .find(|band| band.contains(x, y))
        .map(|band| RowHit {
            pane: band.pane,
            index: band.index,
        })
}
