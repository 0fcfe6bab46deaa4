use std::fmt;

use tracing::warn;

use crate::core::{DataRecord, MarginModel, MarginStrategy, Margins, PaddingContributions};
use crate::error::ChartResult;
use crate::extensions::{CapStrategy, ColorStrategy, NoCap, OrdinalPalette};

use super::accessors::{ClickHandler, RowAccessors};
use super::caption::{CaptionInput, CaptionNode, render_caption};
use super::config::RowChartConfig;

/// Capability strategies injected when a chart is constructed.
pub struct ChartStrategies {
    pub colors: Box<dyn ColorStrategy>,
    pub cap: Box<dyn CapStrategy>,
    pub margins: Box<dyn MarginStrategy>,
}

impl ChartStrategies {
    #[must_use]
    pub fn with_colors(mut self, colors: impl ColorStrategy + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    #[must_use]
    pub fn with_cap(mut self, cap: impl CapStrategy + 'static) -> Self {
        self.cap = Box::new(cap);
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: impl MarginStrategy + 'static) -> Self {
        self.margins = Box::new(margins);
        self
    }
}

impl Default for ChartStrategies {
    fn default() -> Self {
        Self {
            colors: Box::new(OrdinalPalette::default()),
            cap: Box::new(NoCap),
            margins: Box::new(MarginModel),
        }
    }
}

impl fmt::Debug for ChartStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartStrategies").finish_non_exhaustive()
    }
}

/// State shared by the single and paired row charts.
pub(crate) struct ChartState {
    pub config: RowChartConfig,
    pub strategies: ChartStrategies,
    pub accessors: RowAccessors,
    pub records: Vec<DataRecord>,
    pub paddings: PaddingContributions,
    pub margins: Margins,
    pub axis_width: f64,
    pub caption: Option<CaptionNode>,
    pub clock_ms: f64,
    pub on_click: Option<ClickHandler>,
}

impl ChartState {
    pub fn new(config: RowChartConfig, strategies: ChartStrategies) -> ChartResult<Self> {
        config.validate()?;
        let paddings = PaddingContributions::default();
        let margins = strategies.margins.margins(&paddings);
        Ok(Self {
            config,
            strategies,
            accessors: RowAccessors::default(),
            records: Vec::new(),
            paddings,
            margins,
            axis_width: 0.0,
            caption: None,
            clock_ms: 0.0,
            on_click: None,
        })
    }

    /// Validates and installs a new configuration, returning the previous one.
    pub fn update_config<F>(&mut self, update: F) -> ChartResult<RowChartConfig>
    where
        F: FnOnce(RowChartConfig) -> RowChartConfig,
    {
        let next = update(self.config.clone());
        next.validate()?;
        Ok(std::mem::replace(&mut self.config, next))
    }

    pub fn resolve_margins(&mut self) -> Margins {
        self.margins = self.strategies.margins.margins(&self.paddings);
        self.margins
    }

    #[must_use]
    pub fn effective_width(&self) -> f64 {
        self.margins.effective_width(self.config.viewport)
    }

    #[must_use]
    pub fn effective_height(&self) -> f64 {
        self.margins.effective_height(self.config.viewport)
    }

    /// Data-source output after the cap strategy.
    #[must_use]
    pub fn capped_records(&self) -> Vec<DataRecord> {
        let value_of = &self.accessors.value;
        self.strategies
            .cap
            .apply(self.records.clone(), &|record: &DataRecord| value_of(record))
    }

    pub fn render_caption(&mut self, plot_width: f64) {
        let input = CaptionInput {
            text: self.config.x_axis_label.as_deref(),
            font_size_px: self.config.x_axis_label_font_size_px,
            plot_width,
            chart_height: f64::from(self.config.viewport.height),
        };
        render_caption(&mut self.caption, input, &mut self.paddings);
    }

    pub fn advance_time(&mut self, elapsed_ms: f64) {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.clock_ms += elapsed_ms;
        } else {
            warn!(elapsed_ms, "ignoring invalid clock advance");
        }
    }

    pub fn set_clock_ms(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.clock_ms = now_ms;
        } else {
            warn!(now_ms, "ignoring non-finite clock value");
        }
    }

    /// Hands a clicked record to the external filter toggle.
    pub fn dispatch_click(&mut self, record: &DataRecord) {
        if let Some(handler) = self.on_click.as_mut() {
            handler(record);
        }
    }
}
