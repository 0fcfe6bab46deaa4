use std::sync::Arc;

use tracing::debug;

use crate::core::{DataRecord, FilterSet, JoinPlan, LinearScale, Margins, Side};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{RowHit, hit_test};
use crate::render::{RenderFrame, Renderer};

use super::accessors::RowAccessors;
use super::chart_state::{ChartState, ChartStrategies};
use super::config::RowChartConfig;
use super::frame_builder::{FrameInput, build_frame, row_bands};
use super::pipeline::{PaneDrawContext, RowPane};
use super::scene::{PaneScene, Row};
use super::snapshot::{ChartSnapshot, PaneSnapshot};

/// Single-pane horizontal bar chart.
///
/// Each redraw renders the axis, rebuilds gridlines and joins the current
/// records against the rows already on screen by position. Geometry changes
/// are animated against the chart clock, which the host drives with
/// [`RowChart::advance_time`].
pub struct RowChart<R: Renderer> {
    renderer: R,
    state: ChartState,
    pane: RowPane,
}

impl<R: Renderer> RowChart<R> {
    pub fn new(renderer: R, config: RowChartConfig) -> ChartResult<Self> {
        Self::with_strategies(renderer, config, ChartStrategies::default())
    }

    pub fn with_strategies(
        renderer: R,
        config: RowChartConfig,
        strategies: ChartStrategies,
    ) -> ChartResult<Self> {
        let side = Side::from_right_axis(config.use_right_y_axis);
        let state = ChartState::new(config, strategies)?;
        Ok(Self {
            renderer,
            state,
            pane: RowPane::new(side, 0.0),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RowChartConfig {
        &self.state.config
    }

    /// Replaces the configuration between redraws.
    ///
    /// A changed viewport or orientation drops a data-derived scale so the
    /// next redraw rebuilds it; an externally fixed scale is kept.
    pub fn update_config<F>(&mut self, update: F) -> ChartResult<()>
    where
        F: FnOnce(RowChartConfig) -> RowChartConfig,
    {
        let previous = self.state.update_config(update)?;
        let config = &self.state.config;
        if previous.viewport != config.viewport {
            self.pane.invalidate_derived_scale();
        }
        self.pane
            .set_side(Side::from_right_axis(config.use_right_y_axis));
        Ok(())
    }

    pub fn set_data(&mut self, records: Vec<DataRecord>) {
        self.state.records = records;
    }

    /// Raw records as supplied by the data source.
    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.state.records
    }

    /// Records as the pipeline sees them, after capping.
    #[must_use]
    pub fn data(&self) -> Vec<DataRecord> {
        self.state.capped_records()
    }

    pub fn set_value_accessor<F>(&mut self, accessor: F)
    where
        F: Fn(&DataRecord) -> f64 + Send + Sync + 'static,
    {
        self.state.accessors.value = Arc::new(accessor);
    }

    pub fn set_label_accessor<F>(&mut self, accessor: F)
    where
        F: Fn(&DataRecord) -> String + Send + Sync + 'static,
    {
        self.state.accessors.label = Arc::new(accessor);
    }

    pub fn set_title_accessor<F>(&mut self, accessor: F)
    where
        F: Fn(&DataRecord) -> String + Send + Sync + 'static,
    {
        self.state.accessors.title = Arc::new(accessor);
    }

    /// Replaces the axis tick-label formatting for subsequent redraws.
    pub fn set_tick_formatter<F>(&mut self, formatter: F)
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.state.accessors.tick_format = Some(Arc::new(formatter));
    }

    #[must_use]
    pub fn accessors(&self) -> &RowAccessors {
        &self.state.accessors
    }

    /// Installs the filter-toggle callback invoked on row clicks.
    pub fn set_on_click<F>(&mut self, handler: F)
    where
        F: FnMut(&DataRecord) + 'static,
    {
        self.state.on_click = Some(Box::new(handler));
    }

    /// Supplies a fixed scale, reused on every redraw while `elastic_x` is off.
    pub fn set_x_scale(&mut self, scale: LinearScale) {
        self.pane.set_fixed_scale(scale);
    }

    #[must_use]
    pub fn x_scale(&self) -> Option<LinearScale> {
        self.pane.scale()
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.pane.side()
    }

    /// Margins used by the last redraw.
    #[must_use]
    pub fn margins(&self) -> Margins {
        self.state.margins
    }

    #[must_use]
    pub fn effective_width(&self) -> f64 {
        self.state.effective_width()
    }

    #[must_use]
    pub fn effective_height(&self) -> f64 {
        self.state.effective_height()
    }

    #[must_use]
    pub fn axis_width(&self) -> f64 {
        self.state.effective_width()
    }

    /// Value-label y offset in effect (row-centered unless configured).
    #[must_use]
    pub fn label_offset_y(&self) -> f64 {
        self.state.config.label_offset_y.unwrap_or(self.pane.label_offset_y())
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.state.clock_ms
    }

    /// Moves the animation clock forward.
    pub fn advance_time(&mut self, elapsed_ms: f64) {
        self.state.advance_time(elapsed_ms);
    }

    /// Sets the animation clock to an absolute time.
    pub fn set_clock_ms(&mut self, now_ms: f64) {
        self.state.set_clock_ms(now_ms);
    }

    #[must_use]
    pub fn scene(&self) -> &PaneScene {
        self.pane.scene()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.pane.rows()
    }

    #[must_use]
    pub fn last_join(&self) -> Option<&JoinPlan> {
        self.pane.last_join()
    }

    /// Drops the existing scene and draws from scratch.
    pub fn render(&mut self, filters: &dyn FilterSet) -> ChartResult<JoinPlan> {
        self.pane.reset();
        self.state.caption = None;
        self.redraw(filters)
    }

    /// Incremental redraw against the current records and filter set.
    pub fn redraw(&mut self, filters: &dyn FilterSet) -> ChartResult<JoinPlan> {
        let plan = self.draw(filters);
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        Ok(plan)
    }

    fn draw(&mut self, filters: &dyn FilterSet) -> JoinPlan {
        let margins = self.state.resolve_margins();
        let effective_width = self.state.effective_width();
        let effective_height = self.state.effective_height();
        self.state.axis_width = effective_width;
        debug!(
            top = margins.top,
            bottom = margins.bottom,
            effective_width,
            effective_height,
            "row chart redraw"
        );

        let records = self.state.capped_records();
        self.state.render_caption(effective_width);

        let ctx = PaneDrawContext {
            config: &self.state.config,
            accessors: &self.state.accessors,
            filters,
            axis_width: effective_width,
            effective_height,
            now_ms: self.state.clock_ms,
        };
        self.pane
            .draw(&ctx, records, self.state.strategies.colors.as_mut())
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let panes = [self.pane.scene()];
        build_frame(&FrameInput {
            viewport: self.state.config.viewport,
            margins: self.state.margins,
            config: &self.state.config,
            panes: &panes,
            caption: self.state.caption.as_ref(),
            now_ms: self.state.clock_ms,
        })
    }

    /// Re-renders the current scene at the current clock without a redraw.
    pub fn render_frame(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    /// Forwards the record of row `index` to the click handler.
    pub fn click_row(&mut self, index: usize) -> ChartResult<()> {
        let records = self.pane.records();
        let record = records
            .get(index)
            .cloned()
            .ok_or(ChartError::RowIndexOutOfRange {
                index,
                len: records.len(),
            })?;
        self.state.dispatch_click(&record);
        Ok(())
    }

    /// Hit-tests a click at absolute pixel coordinates.
    pub fn pointer_click(&mut self, x: f64, y: f64) -> ChartResult<Option<RowHit>> {
        let bands = row_bands(
            self.state.margins,
            self.state.axis_width,
            &[(None, self.pane.scene())],
            self.state.clock_ms,
        );
        let Some(hit) = hit_test(&bands, x, y) else {
            return Ok(None);
        };
        self.click_row(hit.index)?;
        Ok(Some(hit))
    }

    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            viewport: self.state.config.viewport,
            margins: self.state.margins,
            paddings: self.state.paddings,
            effective_width: self.state.effective_width(),
            effective_height: self.state.effective_height(),
            axis_width: self.state.axis_width,
            caption: self.state.caption.as_ref().map(|caption| caption.text.clone()),
            panes: vec![PaneSnapshot::capture(None, &self.pane)],
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| ChartError::InvalidData(format!("failed to serialize snapshot: {err}")))
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
