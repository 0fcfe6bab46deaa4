use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

const GRID_DASH_PATTERN: [f64; 2] = [4.0, 3.0];
// pango lays text out from its top edge; frames carry the baseline
const BASELINE_RATIO: f64 = 0.8;

/// Primitive counts of the last frame drawn by [`CairoRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub bars_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers able to draw into a Cairo context owned by the host, such as a
/// toolkit draw callback.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, frame: &RenderFrame)
    -> ChartResult<()>;
}

/// Cairo/Pango backend drawing row charts onto an offscreen image surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    background: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    /// Surface sized to the chart viewport.
    pub fn new(viewport: Viewport) -> ChartResult<Self> {
        let invalid = ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        };
        if !viewport.is_valid() {
            return Err(invalid);
        }
        let (Ok(width), Ok(height)) = (i32::try_from(viewport.width), i32::try_from(viewport.height))
        else {
            return Err(invalid);
        };

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            background: Color::rgb(1.0, 1.0, 1.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.background = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn draw(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        set_color(context, self.background);
        context
            .paint()
            .map_err(|err| backend_error("failed to clear surface", err))?;

        // gridlines and axis first so bars and their labels sit on top
        let lines_drawn = stroke_lines(context, &frame.lines)?;
        let bars_drawn = fill_bars(context, &frame.rects)?;
        let texts_drawn = draw_texts(context, &frame.texts);

        self.last_stats = CairoRenderStats {
            lines_drawn,
            bars_drawn,
            texts_drawn,
        };
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| backend_error("failed to create cairo context", err))?;
        self.draw(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.draw(context, frame)
    }
}

fn stroke_lines(context: &Context, lines: &[LinePrimitive]) -> ChartResult<usize> {
    for line in lines {
        set_color(context, line.color);
        context.set_line_width(line.stroke_width);
        match line.stroke_style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed => context.set_dash(&GRID_DASH_PATTERN, 0.0),
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| backend_error("failed to stroke line", err))?;
    }
    context.set_dash(&[], 0.0);
    Ok(lines.len())
}

fn fill_bars(context: &Context, bars: &[RectPrimitive]) -> ChartResult<usize> {
    let mut drawn = 0;
    for bar in bars.iter().filter(|bar| bar.width > 0.0 && bar.height > 0.0) {
        set_color(context, bar.fill_color);
        context.rectangle(bar.x, bar.y, bar.width, bar.height);
        context
            .fill()
            .map_err(|err| backend_error("failed to fill bar", err))?;
        drawn += 1;
    }
    Ok(drawn)
}

fn draw_texts(context: &Context, texts: &[TextPrimitive]) -> usize {
    for text in texts {
        let layout = pangocairo::functions::create_layout(context);
        let font = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font));
        layout.set_text(&text.text);

        let (width, height) = layout.pixel_size();
        let width = f64::from(width);
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - width / 2.0,
            TextHAlign::Right => text.x - width,
        };

        set_color(context, text.color);
        context.move_to(x, text.y - f64::from(height) * BASELINE_RATIO);
        pangocairo::functions::show_layout(context, &layout);
    }
    texts.len()
}

fn set_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
