use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    DataRecord, FilterSet, JoinPlan, LinearScale, Margins, Pane, PaneLayout, RowLayoutParams,
    layout_rows,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{RowHit, hit_test};
use crate::render::{RenderFrame, Renderer};

use super::accessors::{KeyFilter, ValueAccessor};
use super::chart_state::{ChartState, ChartStrategies};
use super::config::RowChartConfig;
use super::frame_builder::{FrameInput, build_frame, row_bands};
use super::pipeline::{PaneDrawContext, RowPane};
use super::scene::{PaneScene, Row};
use super::snapshot::{ChartSnapshot, PaneSnapshot};

pub const PAIRED_LEFT_CLASS: &str = "paired-row-left";
pub const PAIRED_RIGHT_CLASS: &str = "paired-row-right";

/// Join results of both panes for one redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedJoin {
    pub left: JoinPlan,
    pub right: JoinPlan,
}

/// Two row charts mirrored around a shared center axis.
///
/// Records are split by the left and right key filters; each pane derives
/// its own scale from its own subset, so the two sides never share a
/// domain. The left pane grows leftward from the center and the right pane
/// rightward.
pub struct PairedRowChart<R: Renderer> {
    renderer: R,
    state: ChartState,
    left: RowPane,
    right: RowPane,
    left_filter: Option<KeyFilter>,
    right_filter: Option<KeyFilter>,
}

impl<R: Renderer> PairedRowChart<R> {
    pub fn new(renderer: R, config: RowChartConfig) -> ChartResult<Self> {
        Self::with_strategies(renderer, config, ChartStrategies::default())
    }

    pub fn with_strategies(
        renderer: R,
        config: RowChartConfig,
        strategies: ChartStrategies,
    ) -> ChartResult<Self> {
        let state = ChartState::new(config, strategies)?;
        Ok(Self {
            renderer,
            state,
            left: RowPane::new(Pane::Left.side(), 0.0),
            right: RowPane::new(Pane::Right.side(), 0.0),
            left_filter: None,
            right_filter: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RowChartConfig {
        &self.state.config
    }

    /// Replaces the configuration between redraws.
    ///
    /// Pane orientation is fixed in paired mode, so `use_right_y_axis` has
    /// no effect here.
    pub fn update_config<F>(&mut self, update: F) -> ChartResult<()>
    where
        F: FnOnce(RowChartConfig) -> RowChartConfig,
    {
        let previous = self.state.update_config(update)?;
        if previous.viewport != self.state.config.viewport {
            self.left.invalidate_derived_scale();
            self.right.invalidate_derived_scale();
        }
        Ok(())
    }

    pub fn set_left_key_filter<F>(&mut self, filter: F)
    where
        F: Fn(&DataRecord) -> bool + Send + Sync + 'static,
    {
        self.left_filter = Some(Arc::new(filter));
    }

    pub fn set_right_key_filter<F>(&mut self, filter: F)
    where
        F: Fn(&DataRecord) -> bool + Send + Sync + 'static,
    {
        self.right_filter = Some(Arc::new(filter));
    }

    #[must_use]
    pub fn left_key_filter(&self) -> Option<&KeyFilter> {
        self.left_filter.as_ref()
    }

    #[must_use]
    pub fn right_key_filter(&self) -> Option<&KeyFilter> {
        self.right_filter.as_ref()
    }

    pub fn set_data(&mut self, records: Vec<DataRecord>) {
        self.state.records = records;
    }

    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.state.records
    }

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

    pub fn set_on_click<F>(&mut self, handler: F)
    where
        F: FnMut(&DataRecord) + 'static,
    {
        self.state.on_click = Some(Box::new(handler));
    }

    /// Supplies a fixed scale for one pane.
    pub fn set_x_scale(&mut self, pane: Pane, scale: LinearScale) {
        self.pane_mut(pane).set_fixed_scale(scale);
    }

    #[must_use]
    pub fn x_scale(&self, pane: Pane) -> Option<LinearScale> {
        self.pane(pane).scale()
    }

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

    /// Width of each pane: half the plot.
    #[must_use]
    pub fn axis_width(&self) -> f64 {
        self.state.effective_width() / 2.0
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.state.clock_ms
    }

    pub fn advance_time(&mut self, elapsed_ms: f64) {
        self.state.advance_time(elapsed_ms);
    }

    /// Sets the animation clock to an absolute time.
    pub fn set_clock_ms(&mut self, now_ms: f64) {
        self.state.set_clock_ms(now_ms);
    }

    #[must_use]
    pub fn scene(&self, pane: Pane) -> &PaneScene {
        self.pane(pane).scene()
    }

    #[must_use]
    pub fn rows(&self, pane: Pane) -> Vec<Row> {
        self.pane(pane).rows()
    }

    #[must_use]
    pub fn pane_class(pane: Pane) -> &'static str {
        match pane {
            Pane::Left => PAIRED_LEFT_CLASS,
            Pane::Right => PAIRED_RIGHT_CLASS,
        }
    }

    fn pane(&self, pane: Pane) -> &RowPane {
        match pane {
            Pane::Left => &self.left,
            Pane::Right => &self.right,
        }
    }

    fn pane_mut(&mut self, pane: Pane) -> &mut RowPane {
        match pane {
            Pane::Left => &mut self.left,
            Pane::Right => &mut self.right,
        }
    }

    /// Drops both panes' scenes and draws from scratch.
    ///
    /// The right pane container is placed at the center immediately instead
    /// of sliding there.
    pub fn render(&mut self, filters: &dyn FilterSet) -> ChartResult<PairedJoin> {
        self.require_key_filters()?;
        self.left.reset();
        self.right.reset();
        self.state.caption = None;

        self.state.resolve_margins();
        let center = self.axis_width();
        self.right.move_to(center, self.state.clock_ms, 0.0);
        self.redraw(filters)
    }

    /// Incremental redraw of both panes.
    ///
    /// Fails with [`ChartError::MissingKeyFilter`] before touching the scene
    /// when either key filter is unset.
    pub fn redraw(&mut self, filters: &dyn FilterSet) -> ChartResult<PairedJoin> {
        let (left_filter, right_filter) = self.require_key_filters()?;
        let join = self.draw(filters, &left_filter, &right_filter);
        let frame = self.build_render_frame();
        self.renderer.render(&frame)?;
        Ok(join)
    }

    fn require_key_filters(&self) -> ChartResult<(KeyFilter, KeyFilter)> {
        let left = self.left_filter.clone().ok_or_else(|| {
            warn!("paired row chart rendered without a left key filter");
            ChartError::MissingKeyFilter { pane: Pane::Left }
        })?;
        let right = self.right_filter.clone().ok_or_else(|| {
            warn!("paired row chart rendered without a right key filter");
            ChartError::MissingKeyFilter { pane: Pane::Right }
        })?;
        Ok((left, right))
    }

    fn draw(
        &mut self,
        filters: &dyn FilterSet,
        left_filter: &KeyFilter,
        right_filter: &KeyFilter,
    ) -> PairedJoin {
        self.state.resolve_margins();
        let effective_width = self.state.effective_width();
        let effective_height = self.state.effective_height();
        let axis_width = effective_width / 2.0;
        self.state.axis_width = axis_width;

        let records = self.state.capped_records();
        let left_records: Vec<DataRecord> =
            records.iter().filter(|record| left_filter(record)).cloned().collect();
        let right_records: Vec<DataRecord> =
            records.iter().filter(|record| right_filter(record)).cloned().collect();
        debug!(
            left = left_records.len(),
            right = right_records.len(),
            axis_width,
            "paired row chart redraw"
        );

        self.state.render_caption(effective_width);

        let ctx = PaneDrawContext {
            config: &self.state.config,
            accessors: &self.state.accessors,
            filters,
            axis_width,
            effective_height,
            now_ms: self.state.clock_ms,
        };

        let left_scale = self.left.resolve_scale(&ctx, &left_records);
        let right_scale = self.right.resolve_scale(&ctx, &right_records);
        let (left_layout, right_layout) = plan_pane_layouts(
            &ctx.accessors.value,
            (&left_records, left_scale, self.left.layout_params(&ctx)),
            (&right_records, right_scale, self.right.layout_params(&ctx)),
        );

        let colors = self.state.strategies.colors.as_mut();
        let left = self.left.apply(&ctx, left_records, left_layout, colors);

        self.right
            .move_to(axis_width, ctx.now_ms, ctx.config.transition_duration_ms);
        let right = self.right.apply(&ctx, right_records, right_layout, colors);

        PairedJoin { left, right }
    }

    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let panes = [self.left.scene(), self.right.scene()];
        build_frame(&FrameInput {
            viewport: self.state.config.viewport,
            margins: self.state.margins,
            config: &self.state.config,
            panes: &panes,
            caption: self.state.caption.as_ref(),
            now_ms: self.state.clock_ms,
        })
    }

    pub fn render_frame(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame();
        self.renderer.render(&frame)
    }

    pub fn click_row(&mut self, pane: Pane, index: usize) -> ChartResult<()> {
        let records = self.pane(pane).records();
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

    pub fn pointer_click(&mut self, x: f64, y: f64) -> ChartResult<Option<RowHit>> {
        let bands = row_bands(
            self.state.margins,
            self.state.axis_width,
            &[
                (Some(Pane::Left), self.left.scene()),
                (Some(Pane::Right), self.right.scene()),
            ],
            self.state.clock_ms,
        );
        let Some(hit) = hit_test(&bands, x, y) else {
            return Ok(None);
        };
        let pane = hit.pane.unwrap_or(Pane::Left);
        self.click_row(pane, hit.index)?;
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
            panes: vec![
                PaneSnapshot::capture(Some(Pane::Left), &self.left),
                PaneSnapshot::capture(Some(Pane::Right), &self.right),
            ],
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

type PaneLayoutInput<'a> = (&'a [DataRecord], LinearScale, RowLayoutParams);

#[cfg(not(feature = "parallel-layout"))]
fn plan_pane_layouts(
    value_of: &ValueAccessor,
    left: PaneLayoutInput<'_>,
    right: PaneLayoutInput<'_>,
) -> (PaneLayout, PaneLayout) {
    (
        layout_rows(left.0, |record| value_of(record), left.1, left.2),
        layout_rows(right.0, |record| value_of(record), right.1, right.2),
    )
}

#[cfg(feature = "parallel-layout")]
fn plan_pane_layouts(
    value_of: &ValueAccessor,
    left: PaneLayoutInput<'_>,
    right: PaneLayoutInput<'_>,
) -> (PaneLayout, PaneLayout) {
    rayon::join(
        || layout_rows(left.0, |record| value_of(record), left.1, left.2),
        || layout_rows(right.0, |record| value_of(record), right.1, right.2),
    )
}
