use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Side;

/// Vertical nudge applied to row labels, in `em`.
pub const LABEL_DY_EM: f64 = 0.35;
/// Gap kept above and below the axis caption.
pub const AXIS_LABEL_PADDING_PX: f64 = 10.0;
/// Line height of wrapped caption text, in `em`.
pub const CAPTION_LINE_HEIGHT_EM: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Where a label sits inside its row container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub x: f64,
    pub y: f64,
    pub dy_em: f64,
    pub anchor: TextAnchor,
    /// When set the label is translated with the bar origin; otherwise it
    /// stays at the row origin.
    pub follows_bar: bool,
}

/// Explicit offsets win; otherwise labels are centered on the row.
#[must_use]
pub fn resolve_label_offset_y(explicit: Option<f64>, row_height: f64) -> f64 {
    explicit.unwrap_or(row_height / 2.0)
}

#[must_use]
pub fn value_label_placement(side: Side, label_offset_x: f64, label_offset_y: f64) -> LabelPlacement {
    match side {
        Side::Left => LabelPlacement {
            x: label_offset_x,
            y: label_offset_y,
            dy_em: LABEL_DY_EM,
            anchor: TextAnchor::Start,
            follows_bar: true,
        },
        Side::Right => LabelPlacement {
            x: -label_offset_x,
            y: label_offset_y,
            dy_em: LABEL_DY_EM,
            anchor: TextAnchor::End,
            follows_bar: false,
        },
    }
}

/// Title labels hug the far edge of the axis and read back toward the bar.
#[must_use]
pub fn title_label_placement(
    side: Side,
    axis_width: f64,
    title_label_offset_x: f64,
    label_offset_y: f64,
) -> LabelPlacement {
    match side {
        Side::Left => LabelPlacement {
            x: axis_width - title_label_offset_x,
            y: label_offset_y,
            dy_em: 0.0,
            anchor: TextAnchor::End,
            follows_bar: true,
        },
        Side::Right => LabelPlacement {
            x: title_label_offset_x - axis_width,
            y: label_offset_y,
            dy_em: 0.0,
            anchor: TextAnchor::Start,
            follows_bar: false,
        },
    }
}

pub fn estimate_text_width_px(text: &str, font_size_px: f64) -> f64 {
    // deterministic, backend-independent glyph widths
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            'i' | 'l' | 'j' | '\'' | '!' | '|' => 0.28,
            'm' | 'w' | 'M' | 'W' => 0.86,
            _ => 0.58,
        }
    });
    units * font_size_px
}

/// Greedy word wrap against `max_width_px`. A word wider than the limit
/// keeps a line of its own.
#[must_use]
pub fn wrap_text(text: &str, max_width_px: f64, font_size_px: f64) -> SmallVec<[String; 2]> {
    let mut lines: SmallVec<[String; 2]> = SmallVec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if estimate_text_width_px(&candidate, font_size_px) > max_width_px {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Bounding-box height of wrapped caption lines.
#[must_use]
pub fn measure_wrapped_height(line_count: usize, font_size_px: f64) -> f64 {
    line_count as f64 * font_size_px * CAPTION_LINE_HEIGHT_EM
}

/// Bottom padding reserved for a caption of the given height.
#[must_use]
pub fn caption_padding(caption_height: f64) -> f64 {
    caption_height + 2.0 * AXIS_LABEL_PADDING_PX
}

/// Caption anchor (middle-anchored) in plot coordinates.
#[must_use]
pub fn caption_position(plot_width: f64, chart_height: f64, caption_padding: f64) -> (f64, f64) {
    (
        plot_width / 2.0,
        chart_height - caption_padding + AXIS_LABEL_PADDING_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::{
        TextAnchor, caption_padding, resolve_label_offset_y, title_label_placement,
        value_label_placement, wrap_text,
    };
    use crate::core::Side;

    #[test]
    fn value_label_mirrors_on_right_side() {
        let left = value_label_placement(Side::Left, 10.0, 15.0);
        let right = value_label_placement(Side::Right, 10.0, 15.0);
        assert_eq!((left.x, left.anchor), (10.0, TextAnchor::Start));
        assert_eq!((right.x, right.anchor), (-10.0, TextAnchor::End));
        assert!(left.follows_bar);
        assert!(!right.follows_bar);
    }

    #[test]
    fn title_label_hugs_axis_edge() {
        let left = title_label_placement(Side::Left, 300.0, 2.0, 12.0);
        let right = title_label_placement(Side::Right, 300.0, 2.0, 12.0);
        assert_eq!((left.x, left.anchor), (298.0, TextAnchor::End));
        assert_eq!((right.x, right.anchor), (-298.0, TextAnchor::Start));
    }

    #[test]
    fn offset_y_defaults_to_half_row() {
        assert_eq!(resolve_label_offset_y(None, 40.0), 20.0);
        assert_eq!(resolve_label_offset_y(Some(15.0), 40.0), 15.0);
    }

    #[test]
    fn wrap_breaks_long_captions() {
        let lines = wrap_text("number of records per category", 80.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "number of records per category");

        let single = wrap_text("count", 80.0, 12.0);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn padding_wraps_caption_height() {
        assert_eq!(caption_padding(14.0), 34.0);
    }
}
