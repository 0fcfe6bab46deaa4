use smallvec::SmallVec;
use tracing::debug;

use crate::core::PaddingContributions;
use crate::core::labels::{caption_padding, caption_position, measure_wrapped_height, wrap_text};

pub const X_AXIS_LABEL_CLASS: &str = "x-axis-label";

/// The x-axis caption, rendered once per chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionNode {
    pub class_name: &'static str,
    pub text: String,
    pub lines: SmallVec<[String; 2]>,
    pub font_size_px: f64,
    pub height: f64,
    /// Middle-anchored position in plot coordinates.
    pub x: f64,
    pub y: f64,
}

/// Inputs of the caption stage.
pub(crate) struct CaptionInput<'a> {
    pub text: Option<&'a str>,
    pub font_size_px: f64,
    pub plot_width: f64,
    pub chart_height: f64,
}

/// Updates the caption node and feeds its measured height back into the
/// bottom padding.
///
/// Margins for the running pass were resolved before this call, so the new
/// padding only takes effect on the next redraw.
pub(crate) fn render_caption(
    node: &mut Option<CaptionNode>,
    input: CaptionInput<'_>,
    paddings: &mut PaddingContributions,
) {
    let Some(text) = input.text.filter(|text| !text.trim().is_empty()) else {
        if node.take().is_some() {
            paddings.x_axis_label = 0.0;
        }
        return;
    };

    let caption = node.get_or_insert_with(|| CaptionNode {
        class_name: X_AXIS_LABEL_CLASS,
        text: String::new(),
        lines: SmallVec::new(),
        font_size_px: input.font_size_px,
        height: 0.0,
        x: 0.0,
        y: 0.0,
    });
    if caption.text != text {
        caption.text = text.to_owned();
    }
    caption.font_size_px = input.font_size_px;
    caption.lines = wrap_text(&caption.text, input.plot_width, input.font_size_px);
    caption.height = measure_wrapped_height(caption.lines.len(), input.font_size_px);

    let padding = caption_padding(caption.height);
    if paddings.x_axis_label != padding {
        debug!(
            previous = paddings.x_axis_label,
            padding, "x axis caption padding changed"
        );
    }
    paddings.x_axis_label = padding;

    let (x, y) = caption_position(input.plot_width, input.chart_height, padding);
    caption.x = x;
    caption.y = y;
}

#[cfg(test)]
mod tests {
    use super::{CaptionInput, render_caption};
    use crate::core::PaddingContributions;

    #[test]
    fn caption_sets_padding_and_clears_it_when_removed() {
        let mut node = None;
        let mut paddings = PaddingContributions::default();
        render_caption(
            &mut node,
            CaptionInput {
                text: Some("Count"),
                font_size_px: 12.0,
                plot_width: 400.0,
                chart_height: 300.0,
            },
            &mut paddings,
        );
        let caption = node.as_ref().expect("caption node");
        assert_eq!(caption.lines.len(), 1);
        assert!((paddings.x_axis_label - (12.0 * 1.1 + 20.0)).abs() <= 1e-9);
        assert_eq!(caption.x, 200.0);

        render_caption(
            &mut node,
            CaptionInput {
                text: None,
                font_size_px: 12.0,
                plot_width: 400.0,
                chart_height: 300.0,
            },
            &mut paddings,
        );
        assert!(node.is_none());
        assert_eq!(paddings.x_axis_label, 0.0);
    }
}
