use serde::{Deserialize, Serialize};

use crate::core::{LabelPlacement, RowSelection};
use crate::render::Color;

use super::transition::AnimatedValue;

pub const ROW_CLASS: &str = "row";
pub const TITLE_ROW_CLASS: &str = "titlerow";

#[must_use]
pub fn indexed_class(base: &str, index: usize) -> String {
    format!("{base} _{index}")
}

/// Text node owned by a row; reused across redraws for the same index.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub class_name: String,
    pub text: String,
    pub placement: LabelPlacement,
    /// Horizontal translation applied on top of `placement.x`.
    pub offset_x: AnimatedValue,
}

impl LabelNode {
    #[must_use]
    pub fn created(class_name: String, placement: LabelPlacement) -> Self {
        Self {
            class_name,
            text: String::new(),
            placement,
            offset_x: AnimatedValue::settled(0.0),
        }
    }
}

/// Retained scene node of one rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowNode {
    pub index: usize,
    pub class_name: String,
    pub key: String,
    pub value: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub height: f64,
    pub bar_origin: AnimatedValue,
    pub bar_width: AnimatedValue,
    pub fill: Color,
    pub selection: RowSelection,
    /// Tooltip text.
    pub title: Option<String>,
    pub value_label: Option<LabelNode>,
    pub title_label: Option<LabelNode>,
}

impl RowNode {
    /// Fresh row: zero-width bar at the container origin.
    #[must_use]
    pub fn created(index: usize) -> Self {
        Self {
            index,
            class_name: indexed_class(ROW_CLASS, index),
            key: String::new(),
            value: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            height: 0.0,
            bar_origin: AnimatedValue::settled(0.0),
            bar_width: AnimatedValue::settled(0.0),
            fill: Color::rgb(0.0, 0.0, 0.0),
            selection: RowSelection::Neutral,
            title: None,
            value_label: None,
            title_label: None,
        }
    }

    /// Public row view at the transition targets, in pane coordinates.
    #[must_use]
    pub fn to_row(&self) -> Row {
        Row {
            index: self.index,
            key: self.key.clone(),
            value: self.value,
            x: self.offset_x + self.bar_origin.target(),
            y: self.offset_y,
            width: self.bar_width.target(),
            height: self.height,
            selected: self.selection.is_selected(),
            selection: self.selection,
        }
    }
}

/// Rendered row as reported to hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: usize,
    pub key: String,
    pub value: f64,
    /// Bar left edge in pane coordinates.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
    pub selection: RowSelection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Bottom axis of one pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisNode {
    pub offset_y: f64,
    pub range: (f64, f64),
    pub ticks: Vec<AxisTick>,
}

/// Vertical gridline in pane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub x: f64,
    pub y1: f64,
    pub y2: f64,
}

/// Everything drawn inside one pane container.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneScene {
    pub offset_x: AnimatedValue,
    pub axis: Option<AxisNode>,
    pub grid_lines: Vec<GridLine>,
    pub rows: Vec<RowNode>,
}

impl PaneScene {
    #[must_use]
    pub fn new(offset_x: f64) -> Self {
        Self {
            offset_x: AnimatedValue::settled(offset_x),
            axis: None,
            grid_lines: Vec::new(),
            rows: Vec::new(),
        }
    }
}
