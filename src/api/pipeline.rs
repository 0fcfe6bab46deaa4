use tracing::{debug, trace};

use crate::core::labels::{resolve_label_offset_y, title_label_placement, value_label_placement};
use crate::core::{
    DataRecord, FilterSet, JoinPlan, LinearScale, PaneLayout, RowGeometry, RowLayoutParams,
    ScaleEngine, Side, classify, layout_rows, reconcile,
};
use crate::extensions::ColorStrategy;

use super::accessors::RowAccessors;
use super::config::{DEFAULT_LABEL_OFFSET_Y, RowChartConfig};
use super::scene::{
    AxisNode, AxisTick, GridLine, LabelNode, PaneScene, ROW_CLASS, Row, RowNode, TITLE_ROW_CLASS,
    indexed_class,
};

/// Read-only inputs of one pane redraw.
pub(crate) struct PaneDrawContext<'a> {
    pub config: &'a RowChartConfig,
    pub accessors: &'a RowAccessors,
    pub filters: &'a dyn FilterSet,
    pub axis_width: f64,
    pub effective_height: f64,
    pub now_ms: f64,
}

/// Render pipeline of one pane: axis, gridlines, then the positional join.
#[derive(Debug, Clone)]
pub struct RowPane {
    side: Side,
    scale_engine: ScaleEngine,
    scene: PaneScene,
    records: Vec<DataRecord>,
    label_offset_y: f64,
    last_join: Option<JoinPlan>,
}

impl RowPane {
    #[must_use]
    pub fn new(side: Side, offset_x: f64) -> Self {
        Self {
            side,
            scale_engine: ScaleEngine::new(),
            scene: PaneScene::new(offset_x),
            records: Vec::new(),
            label_offset_y: DEFAULT_LABEL_OFFSET_Y,
            last_join: None,
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Switches orientation; a derived scale is dropped so it is rebuilt
    /// with the new range direction.
    pub fn set_side(&mut self, side: Side) {
        if self.side != side {
            self.side = side;
            self.scale_engine.clear_derived();
        }
    }

    #[must_use]
    pub fn scale(&self) -> Option<LinearScale> {
        self.scale_engine.scale()
    }

    pub fn set_fixed_scale(&mut self, scale: LinearScale) {
        self.scale_engine.set_fixed_scale(scale);
    }

    pub fn invalidate_derived_scale(&mut self) {
        self.scale_engine.clear_derived();
    }

    #[must_use]
    pub fn scene(&self) -> &PaneScene {
        &self.scene
    }

    /// Records bound to the rendered rows, by index.
    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    #[must_use]
    pub fn label_offset_y(&self) -> f64 {
        self.label_offset_y
    }

    #[must_use]
    pub fn last_join(&self) -> Option<&JoinPlan> {
        self.last_join.as_ref()
    }

    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        self.scene.rows.iter().map(RowNode::to_row).collect()
    }

    /// Drops every node; the scale survives.
    pub fn reset(&mut self) {
        self.scene.axis = None;
        self.scene.grid_lines.clear();
        self.scene.rows.clear();
        self.records.clear();
        self.last_join = None;
    }

    pub(crate) fn move_to(&mut self, offset_x: f64, now_ms: f64, duration_ms: f64) {
        self.scene.offset_x.retarget(offset_x, now_ms, duration_ms);
    }

    pub(crate) fn resolve_scale(
        &mut self,
        ctx: &PaneDrawContext<'_>,
        records: &[DataRecord],
    ) -> LinearScale {
        let value_of = &ctx.accessors.value;
        self.scale_engine.resolve(
            records,
            |record| value_of(record),
            ctx.axis_width,
            self.side,
            ctx.config.elastic_x,
        )
    }

    pub(crate) fn layout_params(&self, ctx: &PaneDrawContext<'_>) -> RowLayoutParams {
        RowLayoutParams {
            effective_height: ctx.effective_height,
            axis_width: ctx.axis_width,
            gap: ctx.config.gap,
            fixed_bar_height: ctx.config.fixed_bar_height,
            side: self.side,
        }
    }

    /// Full pipeline for one pane.
    pub(crate) fn draw(
        &mut self,
        ctx: &PaneDrawContext<'_>,
        records: Vec<DataRecord>,
        colors: &mut dyn ColorStrategy,
    ) -> JoinPlan {
        let scale = self.resolve_scale(ctx, &records);
        let value_of = &ctx.accessors.value;
        let layout = layout_rows(
            &records,
            |record| value_of(record),
            scale,
            self.layout_params(ctx),
        );
        self.apply(ctx, records, layout, colors)
    }

    /// Applies a precomputed layout plan to the retained scene.
    pub(crate) fn apply(
        &mut self,
        ctx: &PaneDrawContext<'_>,
        records: Vec<DataRecord>,
        layout: PaneLayout,
        colors: &mut dyn ColorStrategy,
    ) -> JoinPlan {
        self.render_axis(ctx, layout.scale);
        self.render_grid_lines(ctx);

        let plan = reconcile(self.scene.rows.len(), records.len());
        debug!(
            side = ?self.side,
            create = plan.to_create.len(),
            update = plan.to_update.len(),
            remove = plan.to_remove.len(),
            "row join"
        );

        for index in plan.to_create.clone() {
            self.scene.rows.push(RowNode::created(index));
        }
        self.scene.rows.truncate(plan.present().end);

        if let Some(height) = layout.row_height {
            self.label_offset_y = resolve_label_offset_y(ctx.config.label_offset_y, height);
        }

        let side = self.side;
        let label_offset_y = self.label_offset_y;
        for (node, (record, geometry)) in self
            .scene
            .rows
            .iter_mut()
            .zip(records.iter().zip(layout.rows.iter()))
        {
            update_row(node, ctx, side, label_offset_y, record, *geometry, colors);
        }

        self.records = records;
        self.last_join = Some(plan.clone());
        plan
    }

    fn render_axis(&mut self, ctx: &PaneDrawContext<'_>, scale: LinearScale) {
        let count = ctx.config.axis_tick_count;
        let values = match &ctx.config.axis_tick_values {
            Some(values) => values.clone(),
            None => scale.ticks(count),
        };
        let precision = scale.tick_precision(count);
        let ticks: Vec<AxisTick> = values
            .into_iter()
            .map(|value| AxisTick {
                value,
                position: scale.apply(value),
                label: match &ctx.accessors.tick_format {
                    Some(format) => format(value),
                    None => format_tick(value, precision),
                },
            })
            .filter(|tick| tick.position.is_finite())
            .collect();
        trace!(side = ?self.side, ticks = ticks.len(), "axis rendered");

        self.scene.axis = Some(AxisNode {
            offset_y: ctx.effective_height,
            range: scale.range(),
            ticks,
        });
    }

    fn render_grid_lines(&mut self, ctx: &PaneDrawContext<'_>) {
        self.scene.grid_lines.clear();
        let Some(axis) = &self.scene.axis else {
            return;
        };
        self.scene.grid_lines.extend(axis.ticks.iter().map(|tick| GridLine {
            x: tick.position,
            y1: ctx.effective_height,
            y2: 0.0,
        }));
    }
}

fn update_row(
    node: &mut RowNode,
    ctx: &PaneDrawContext<'_>,
    side: Side,
    label_offset_y: f64,
    record: &DataRecord,
    geometry: RowGeometry,
    colors: &mut dyn ColorStrategy,
) {
    let config = ctx.config;
    let now = ctx.now_ms;
    let duration = config.transition_duration_ms;

    node.key = record.key.clone();
    node.value = (ctx.accessors.value)(record);
    node.offset_x = geometry.offset_x;
    node.offset_y = geometry.offset_y;
    node.height = geometry.height;
    node.fill = colors.color_for(record, geometry.index);
    node.selection = classify(&record.key, ctx.filters);
    node.bar_width.retarget(geometry.bar_width, now, duration);
    node.bar_origin.retarget(geometry.bar_origin, now, duration);
    node.title = config.render_title.then(|| (ctx.accessors.title)(record));

    if config.render_label {
        let placement = value_label_placement(side, config.label_offset_x, label_offset_y);
        let label = node.value_label.get_or_insert_with(|| {
            LabelNode::created(indexed_class(ROW_CLASS, geometry.index), placement)
        });
        label.placement = placement;
        label.text = (ctx.accessors.label)(record);
        let target = if placement.follows_bar {
            geometry.bar_origin
        } else {
            0.0
        };
        label.offset_x.retarget(target, now, duration);
    } else {
        node.value_label = None;
    }

    if config.render_title_label {
        let placement = title_label_placement(
            side,
            ctx.axis_width,
            config.title_label_offset_x,
            label_offset_y,
        );
        let label = node.title_label.get_or_insert_with(|| {
            LabelNode::created(indexed_class(TITLE_ROW_CLASS, geometry.index), placement)
        });
        label.placement = placement;
        label.text = (ctx.accessors.title)(record);
        let target = if placement.follows_bar {
            geometry.bar_origin
        } else {
            0.0
        };
        label.offset_x.retarget(target, now, duration);
    } else {
        node.title_label = None;
    }
}

fn format_tick(value: f64, precision: usize) -> String {
    // avoid printing "-0"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.precision$}")
}
