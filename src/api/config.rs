use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Nominal value-label y offset reported before the first redraw.
pub const DEFAULT_LABEL_OFFSET_Y: f64 = 15.0;

/// Immutable per-pass configuration of a row chart.
///
/// The chart keeps one instance for a whole redraw; replace it between
/// redraws through `update_config`. The type is serializable so hosts can
/// persist chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowChartConfig {
    pub viewport: Viewport,
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Overrides the computed row height when set to a non-zero value.
    #[serde(default)]
    pub fixed_bar_height: Option<f64>,
    #[serde(default)]
    pub elastic_x: bool,
    #[serde(default = "default_label_offset_x")]
    pub label_offset_x: f64,
    /// Explicit value-label y offset; `None` centers labels on the row.
    #[serde(default)]
    pub label_offset_y: Option<f64>,
    #[serde(default = "default_title_label_offset_x")]
    pub title_label_offset_x: f64,
    #[serde(default = "default_true")]
    pub render_label: bool,
    #[serde(default)]
    pub render_title_label: bool,
    /// Attach tooltip title text to each row.
    #[serde(default = "default_true")]
    pub render_title: bool,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default = "default_font_size_px")]
    pub x_axis_label_font_size_px: f64,
    #[serde(default)]
    pub use_right_y_axis: bool,
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    #[serde(default = "default_axis_tick_count")]
    pub axis_tick_count: usize,
    /// Explicit tick values; replaces the scale's generated ticks when set.
    #[serde(default)]
    pub axis_tick_values: Option<Vec<f64>>,
    #[serde(default = "default_font_size_px")]
    pub label_font_size_px: f64,
    #[serde(default = "default_axis_color")]
    pub axis_color: Color,
    #[serde(default = "default_grid_line_color")]
    pub grid_line_color: Color,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_deselected_color")]
    pub deselected_color: Color,
}

impl RowChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gap: default_gap(),
            fixed_bar_height: None,
            elastic_x: false,
            label_offset_x: default_label_offset_x(),
            label_offset_y: None,
            title_label_offset_x: default_title_label_offset_x(),
            render_label: true,
            render_title_label: false,
            render_title: true,
            x_axis_label: None,
            x_axis_label_font_size_px: default_font_size_px(),
            use_right_y_axis: false,
            transition_duration_ms: default_transition_duration_ms(),
            axis_tick_count: default_axis_tick_count(),
            axis_tick_values: None,
            label_font_size_px: default_font_size_px(),
            axis_color: default_axis_color(),
            grid_line_color: default_grid_line_color(),
            label_color: default_label_color(),
            deselected_color: default_deselected_color(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_fixed_bar_height(mut self, height: Option<f64>) -> Self {
        self.fixed_bar_height = height;
        self
    }

    #[must_use]
    pub fn with_elastic_x(mut self, elastic: bool) -> Self {
        self.elastic_x = elastic;
        self
    }

    #[must_use]
    pub fn with_label_offset_x(mut self, offset: f64) -> Self {
        self.label_offset_x = offset;
        self
    }

    #[must_use]
    pub fn with_label_offset_y(mut self, offset: Option<f64>) -> Self {
        self.label_offset_y = offset;
        self
    }

    #[must_use]
    pub fn with_title_label_offset_x(mut self, offset: f64) -> Self {
        self.title_label_offset_x = offset;
        self
    }

    #[must_use]
    pub fn with_render_label(mut self, enabled: bool) -> Self {
        self.render_label = enabled;
        self
    }

    #[must_use]
    pub fn with_render_title_label(mut self, enabled: bool) -> Self {
        self.render_title_label = enabled;
        self
    }

    #[must_use]
    pub fn with_render_title(mut self, enabled: bool) -> Self {
        self.render_title = enabled;
        self
    }

    #[must_use]
    pub fn with_x_axis_label(mut self, label: Option<String>) -> Self {
        self.x_axis_label = label;
        self
    }

    #[must_use]
    pub fn with_use_right_y_axis(mut self, enabled: bool) -> Self {
        self.use_right_y_axis = enabled;
        self
    }

    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: f64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_axis_tick_count(mut self, count: usize) -> Self {
        self.axis_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_axis_tick_values(mut self, values: Option<Vec<f64>>) -> Self {
        self.axis_tick_values = values;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        ensure_non_negative("gap", self.gap)?;
        if let Some(height) = self.fixed_bar_height {
            ensure_non_negative("fixed bar height", height)?;
        }
        ensure_finite("label offset x", self.label_offset_x)?;
        if let Some(offset) = self.label_offset_y {
            ensure_finite("label offset y", offset)?;
        }
        ensure_finite("title label offset x", self.title_label_offset_x)?;
        ensure_non_negative("transition duration", self.transition_duration_ms)?;
        ensure_positive("axis label font size", self.x_axis_label_font_size_px)?;
        ensure_positive("label font size", self.label_font_size_px)?;
        for value in self.axis_tick_values.iter().flatten() {
            ensure_finite("axis tick value", *value)?;
        }
        for color in [
            self.axis_color,
            self.grid_line_color,
            self.label_color,
            self.deselected_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }
}

fn ensure_finite(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!("{name} must be finite")))
    }
}

fn ensure_non_negative(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

fn ensure_positive(name: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )))
    }
}

fn default_gap() -> f64 {
    5.0
}

fn default_label_offset_x() -> f64 {
    10.0
}

fn default_title_label_offset_x() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_font_size_px() -> f64 {
    12.0
}

fn default_transition_duration_ms() -> f64 {
    750.0
}

fn default_axis_tick_count() -> usize {
    10
}

fn default_axis_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_grid_line_color() -> Color {
    Color::rgba(0.0, 0.0, 0.0, 0.15)
}

fn default_label_color() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

fn default_deselected_color() -> Color {
    Color::from_rgb8(0xcc, 0xcc, 0xcc)
}
