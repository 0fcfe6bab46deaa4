use serde::{Deserialize, Serialize};

use crate::core::{Margins, PaddingContributions, Pane, Side, Viewport, root_position};

use super::pipeline::RowPane;
use super::scene::{AxisNode, Row};

/// Serializable view of one pane after the last redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub pane: Option<Pane>,
    pub side: Side,
    /// `None` until a scale exists or when the domain is degenerate.
    pub domain: Option<(f64, f64)>,
    pub range: Option<(f64, f64)>,
    pub root: Option<f64>,
    pub offset_x: f64,
    pub label_offset_y: f64,
    pub axis: Option<AxisNode>,
    pub rows: Vec<Row>,
}

impl PaneSnapshot {
    pub(crate) fn capture(pane: Option<Pane>, row_pane: &RowPane) -> Self {
        let scale = row_pane.scale();
        let finite_pair = |(a, b): (f64, f64)| (a.is_finite() && b.is_finite()).then_some((a, b));
        Self {
            pane,
            side: row_pane.side(),
            domain: scale.and_then(|scale| finite_pair(scale.domain())),
            range: scale.and_then(|scale| finite_pair(scale.range())),
            root: scale
                .map(root_position)
                .filter(|root| root.is_finite()),
            offset_x: row_pane.scene().offset_x.target(),
            label_offset_y: row_pane.label_offset_y(),
            axis: row_pane.scene().axis.clone(),
            rows: row_pane.rows(),
        }
    }
}

/// Serializable diagnostics snapshot of a whole chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub margins: Margins,
    pub paddings: PaddingContributions,
    pub effective_width: f64,
    pub effective_height: f64,
    pub axis_width: f64,
    pub caption: Option<String>,
    pub panes: Vec<PaneSnapshot>,
}
