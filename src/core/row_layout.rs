use serde::{Deserialize, Serialize};

use crate::core::primitives::truthy;
use crate::core::scale_engine::root_position;
use crate::core::{DataRecord, LinearScale, Side};

/// Inputs shared by every row of one pane for one redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayoutParams {
    pub effective_height: f64,
    pub axis_width: f64,
    pub gap: f64,
    pub fixed_bar_height: Option<f64>,
    pub side: Side,
}

/// Target geometry of one row, in pane-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowGeometry {
    pub index: usize,
    /// Row container translation.
    pub offset_x: f64,
    pub offset_y: f64,
    pub height: f64,
    /// Bar translation inside the row container.
    pub bar_origin: f64,
    pub bar_width: f64,
}

/// Pure layout plan for one pane.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub scale: LinearScale,
    pub root: f64,
    pub row_height: Option<f64>,
    pub rows: Vec<RowGeometry>,
}

/// Height of each row, or `None` when there is nothing to lay out.
///
/// A truthy `fixed_bar_height` wins; otherwise the plot height minus the
/// `n + 1` gaps is shared evenly. The result may be negative when the gaps
/// alone exceed the plot height; the frame builder clamps it.
#[must_use]
pub fn row_height(
    row_count: usize,
    effective_height: f64,
    gap: f64,
    fixed_bar_height: Option<f64>,
) -> Option<f64> {
    if row_count == 0 {
        return None;
    }
    if let Some(fixed) = truthy(fixed_bar_height) {
        return Some(fixed);
    }
    let n = row_count as f64;
    Some((effective_height - (n + 1.0) * gap) / n)
}

/// Translation of row `index`: stacked top-down, shifted by the axis width
/// when the pane is mirrored.
#[must_use]
pub fn row_transform(index: usize, height: f64, gap: f64, side: Side, axis_width: f64) -> (f64, f64) {
    let i = index as f64;
    let y = (i + 1.0) * gap + i * height;
    let x = if side.is_mirrored() { axis_width } else { 0.0 };
    (x, y)
}

#[must_use]
pub fn bar_width(value: f64, scale: LinearScale, root: f64) -> f64 {
    (root - scale.apply(value)).abs()
}

/// Left edge of the bar inside its row container.
#[must_use]
pub fn bar_origin(value: f64, scale: LinearScale, root: f64, side: Side, axis_width: f64) -> f64 {
    let x = scale.apply(value);
    let local = if x > root { root } else { x };
    if side.is_mirrored() {
        local - axis_width
    } else {
        local
    }
}

/// Computes every row's target geometry without touching any scene state.
#[must_use]
pub fn layout_rows<F>(
    records: &[DataRecord],
    value_of: F,
    scale: LinearScale,
    params: RowLayoutParams,
) -> PaneLayout
where
    F: Fn(&DataRecord) -> f64,
{
    let root = root_position(scale);
    let height = row_height(
        records.len(),
        params.effective_height,
        params.gap,
        params.fixed_bar_height,
    );

    let rows = match height {
        None => Vec::new(),
        Some(height) => records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let value = value_of(record);
                let (offset_x, offset_y) =
                    row_transform(index, height, params.gap, params.side, params.axis_width);
                RowGeometry {
                    index,
                    offset_x,
                    offset_y,
                    height,
                    bar_origin: bar_origin(value, scale, root, params.side, params.axis_width),
                    bar_width: bar_width(value, scale, root),
                }
            })
            .collect(),
    };

    PaneLayout {
        scale,
        root,
        row_height: height,
        rows,
    }
}
