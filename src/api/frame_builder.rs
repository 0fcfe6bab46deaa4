use tracing::trace;

use crate::core::labels::CAPTION_LINE_HEIGHT_EM;
use crate::core::{Margins, Pane, RowSelection, TextAnchor, Viewport};
use crate::interaction::RowBand;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::caption::CaptionNode;
use super::config::RowChartConfig;
use super::scene::{LabelNode, PaneScene, RowNode};

const AXIS_STROKE_WIDTH_PX: f64 = 1.0;
const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_PADDING_PX: f64 = 3.0;
const TICK_LABEL_DY_EM: f64 = 0.71;

/// Scene sources sampled into one frame.
pub(crate) struct FrameInput<'a> {
    pub viewport: Viewport,
    pub margins: Margins,
    pub config: &'a RowChartConfig,
    pub panes: &'a [&'a PaneScene],
    pub caption: Option<&'a CaptionNode>,
    pub now_ms: f64,
}

impl From<TextAnchor> for TextHAlign {
    fn from(anchor: TextAnchor) -> Self {
        match anchor {
            TextAnchor::Start => Self::Left,
            TextAnchor::Middle => Self::Center,
            TextAnchor::End => Self::Right,
        }
    }
}

/// Samples the retained scene at `now_ms` into absolute-pixel primitives.
///
/// Negative or non-finite geometry never reaches the frame: sizes clamp to
/// zero and unplaceable primitives are skipped.
pub(crate) fn build_frame(input: &FrameInput<'_>) -> RenderFrame {
    let mut frame = RenderFrame::new(input.viewport);
    let top = input.margins.top;

    for pane in input.panes {
        let origin_x = input.margins.left + pane.offset_x.sample(input.now_ms);
        push_grid_lines(&mut frame, input, pane, origin_x, top);
        push_axis(&mut frame, input, pane, origin_x, top);
        for row in &pane.rows {
            push_row(&mut frame, input, row, origin_x, top);
        }
    }

    if let Some(caption) = input.caption {
        let line_height = caption.font_size_px * CAPTION_LINE_HEIGHT_EM;
        for (line_index, line) in caption.lines.iter().enumerate() {
            push_text(
                &mut frame,
                TextPrimitive::new(
                    line.clone(),
                    input.margins.left + caption.x,
                    top + caption.y + line_index as f64 * line_height,
                    caption.font_size_px,
                    input.config.axis_color,
                    TextHAlign::Center,
                ),
            );
        }
    }

    frame
}

/// Clickable row bands at `now_ms`, one per rendered row.
pub(crate) fn row_bands(
    margins: Margins,
    axis_width: f64,
    panes: &[(Option<Pane>, &PaneScene)],
    now_ms: f64,
) -> Vec<RowBand> {
    let mut bands = Vec::new();
    for (pane, scene) in panes {
        let left = margins.left + scene.offset_x.sample(now_ms);
        for row in &scene.rows {
            let row_top = margins.top + row.offset_y;
            bands.push(RowBand {
                pane: *pane,
                index: row.index,
                left,
                top: row_top,
                right: left + axis_width,
                bottom: row_top + row.height.max(0.0),
            });
        }
    }
    bands
}

fn push_grid_lines(
    frame: &mut RenderFrame,
    input: &FrameInput<'_>,
    pane: &PaneScene,
    origin_x: f64,
    top: f64,
) {
    for grid in &pane.grid_lines {
        push_line(
            frame,
            LinePrimitive::new(
                origin_x + grid.x,
                top + grid.y1,
                origin_x + grid.x,
                top + grid.y2,
                AXIS_STROKE_WIDTH_PX,
                input.config.grid_line_color,
            )
            .with_stroke_style(LineStrokeStyle::Dashed),
        );
    }
}

fn push_axis(
    frame: &mut RenderFrame,
    input: &FrameInput<'_>,
    pane: &PaneScene,
    origin_x: f64,
    top: f64,
) {
    let Some(axis) = &pane.axis else {
        return;
    };
    let axis_y = top + axis.offset_y;
    let color = input.config.axis_color;
    let (r0, r1) = axis.range;

    push_line(
        frame,
        LinePrimitive::new(
            origin_x + r0.min(r1),
            axis_y,
            origin_x + r0.max(r1),
            axis_y,
            AXIS_STROKE_WIDTH_PX,
            color,
        ),
    );

    let font_size = input.config.label_font_size_px;
    for tick in &axis.ticks {
        let x = origin_x + tick.position;
        push_line(
            frame,
            LinePrimitive::new(x, axis_y, x, axis_y + TICK_SIZE_PX, AXIS_STROKE_WIDTH_PX, color),
        );
        push_text(
            frame,
            TextPrimitive::new(
                tick.label.clone(),
                x,
                axis_y + TICK_SIZE_PX + TICK_LABEL_PADDING_PX + TICK_LABEL_DY_EM * font_size,
                font_size,
                color,
                TextHAlign::Center,
            ),
        );
    }
}

fn push_row(frame: &mut RenderFrame, input: &FrameInput<'_>, row: &RowNode, origin_x: f64, top: f64) {
    let row_x = origin_x + row.offset_x;
    let row_y = top + row.offset_y;
    let fill = match row.selection {
        RowSelection::Deselected => input.config.deselected_color,
        RowSelection::Neutral | RowSelection::Selected => row.fill,
    };

    let rect = RectPrimitive::new(
        row_x + row.bar_origin.sample(input.now_ms),
        row_y,
        row.bar_width.sample(input.now_ms).max(0.0),
        row.height.max(0.0),
        fill,
    );
    if rect.validate().is_ok() {
        frame.rects.push(rect);
    } else {
        trace!(index = row.index, "skipping unplaceable bar");
    }

    let font_size = input.config.label_font_size_px;
    for label in [&row.value_label, &row.title_label].into_iter().flatten() {
        push_label(frame, label, row_x, row_y, font_size, input.config.label_color, input.now_ms);
    }
}

fn push_label(
    frame: &mut RenderFrame,
    label: &LabelNode,
    row_x: f64,
    row_y: f64,
    font_size: f64,
    color: Color,
    now_ms: f64,
) {
    let placement = label.placement;
    push_text(
        frame,
        TextPrimitive::new(
            label.text.clone(),
            row_x + placement.x + label.offset_x.sample(now_ms),
            row_y + placement.y + placement.dy_em * font_size,
            font_size,
            color,
            placement.anchor.into(),
        ),
    );
}

fn push_line(frame: &mut RenderFrame, line: LinePrimitive) {
    if line.validate().is_ok() {
        frame.lines.push(line);
    }
}

fn push_text(frame: &mut RenderFrame, text: TextPrimitive) {
    if text.validate().is_ok() {
        frame.texts.push(text);
    }
}
