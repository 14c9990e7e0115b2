use std::f64::consts::TAU;
use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Supports offscreen image-surface rendering through `Renderer::render`
/// (exportable as PNG) and in-place rendering on an external Cairo context
/// through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Option<Color>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Some(Color::WHITE),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Background painted before each offscreen frame; `None` keeps the
    /// surface transparent, which suits overlay surfaces.
    pub fn set_clear_color(&mut self, color: Option<Color>) -> ChartResult<()> {
        if let Some(color) = color {
            color.validate()?;
        }
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to write png: {err}")))
    }

    fn clear(&self, context: &Context) -> ChartResult<()> {
        context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        context.set_operator(cairo::Operator::Source);
        match self.clear_color {
            Some(color) => apply_color(context, color),
            None => context.set_source_rgba(0.0, 0.0, 0.0, 0.0),
        }
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.clear(&context)?;
        self.last_stats = draw_frame(&context, frame)?;
        Ok(())
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.last_stats = draw_frame(context, frame)?;
        Ok(())
    }
}

fn draw_frame(context: &Context, frame: &RenderFrame) -> ChartResult<CairoRenderStats> {
    frame.validate()?;
    draw_in_group(context, frame.offset, frame.opacity, |context| {
        draw_primitives(context, frame)
    })
}

/// Runs `draw` inside a translated group composited at `opacity`.
///
/// The pushed group and the saved state are unwound on every path, so an
/// external context is left as it was handed in even when drawing fails.
fn draw_in_group<F>(
    context: &Context,
    offset: (f64, f64),
    opacity: f64,
    draw: F,
) -> ChartResult<CairoRenderStats>
where
    F: FnOnce(&Context) -> ChartResult<CairoRenderStats>,
{
    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(offset.0, offset.1);
    context.push_group();

    let stats = match draw(context) {
        Ok(stats) => stats,
        Err(err) => {
            let _ = context.pop_group();
            let _ = context.restore();
            return Err(err);
        }
    };

    let composited = context
        .pop_group_to_source()
        .map_err(|err| map_backend_error("failed to pop group", err))
        .and_then(|()| {
            context
                .paint_with_alpha(opacity)
                .map_err(|err| map_backend_error("failed to composite frame", err))
        });
    let restored = context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err));
    composited?;
    restored?;
    Ok(stats)
}

fn draw_primitives(context: &Context, frame: &RenderFrame) -> ChartResult<CairoRenderStats> {
    let mut stats = CairoRenderStats::default();

    for line in &frame.lines {
        apply_color(context, line.color);
        context.set_line_width(line.stroke_width);
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))?;
        stats.lines_drawn += 1;
    }

    for polyline in &frame.polylines {
        let mut points = polyline.points.iter();
        if let Some(&(x, y)) = points.next() {
            context.move_to(x, y);
        }
        for &(x, y) in points {
            context.line_to(x, y);
        }
        apply_color(context, polyline.color);
        context.set_line_width(polyline.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
        stats.polylines_drawn += 1;
    }

    for circle in &frame.circles {
        context.new_sub_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
        apply_color(context, circle.fill_color);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill circle", err))?;
        apply_color(context, circle.stroke_color);
        context.set_line_width(circle.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke circle", err))?;
        stats.circles_drawn += 1;
    }

    for text in &frame.texts {
        let layout = pangocairo::functions::create_layout(context);
        let font_description =
            FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let dx = match text.h_align {
            TextHAlign::Left => 0.0,
            TextHAlign::Center => -f64::from(text_width) / 2.0,
            TextHAlign::Right => -f64::from(text_width),
        };

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(text.x, text.y);
        context.rotate(text.rotation_deg.to_radians());
        apply_color(context, text.color);
        context.move_to(dx, -baseline);
        pangocairo::functions::show_layout(context, &layout);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        stats.texts_drawn += 1;
    }

    Ok(stats)
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use cairo::{Context, Format, ImageSurface};

    use super::{CairoRenderStats, draw_in_group};
    use crate::error::ChartError;

    fn context() -> Context {
        let surface = ImageSurface::create(Format::ARgb32, 64, 64).expect("surface");
        Context::new(&surface).expect("context")
    }

    #[test]
    fn failed_draw_unwinds_group_and_transform() {
        let context = context();
        let result = draw_in_group(&context, (10.0, 20.0), 0.5, |_| {
            Err(ChartError::InvalidData("stroke failed".to_owned()))
        });

        assert!(result.is_err());
        let matrix = context.matrix();
        assert_eq!((matrix.x0(), matrix.y0()), (0.0, 0.0));
        assert!(context.status().is_ok());
        context.save().expect("save after failure");
        context.restore().expect("context stays balanced");
    }

    #[test]
    fn successful_draw_leaves_context_untranslated() {
        let context = context();
        let stats = draw_in_group(&context, (10.0, 20.0), 1.0, |_| {
            Ok(CairoRenderStats {
                lines_drawn: 1,
                ..CairoRenderStats::default()
            })
        })
        .expect("draw");

        assert_eq!(stats.lines_drawn, 1);
        let matrix = context.matrix();
        assert_eq!((matrix.x0(), matrix.y0()), (0.0, 0.0));
    }
}
