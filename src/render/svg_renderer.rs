use std::fmt::{self, Write};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

/// Renderer that serializes each frame into a standalone SVG document.
///
/// The markup of the most recent frame is kept until the next render call.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    frames_rendered: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup of the last rendered frame, empty before the first render.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut document = String::with_capacity(256 + frame.circles.len() * 96);
        write_document(&mut document, frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.document = document;
        self.frames_rendered += 1;
        Ok(())
    }
}

fn write_document(svg: &mut String, frame: &RenderFrame) -> fmt::Result {
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        frame.viewport.width, frame.viewport.height, frame.viewport.width, frame.viewport.height
    )?;
    writeln!(
        svg,
        r#"<g transform="translate({:.2},{:.2})" opacity="{:.3}">"#,
        frame.offset.0, frame.offset.1, frame.opacity
    )?;

    for line in &frame.lines {
        writeln!(
            svg,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"{} stroke-width="{:.2}"/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            line.color.to_hex(),
            alpha_attr("stroke-opacity", line.color),
            line.stroke_width
        )?;
    }

    for polyline in &frame.polylines {
        let mut path = String::with_capacity(polyline.points.len() * 16);
        for (index, (x, y)) in polyline.points.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            write!(path, "{command}{x:.2},{y:.2}")?;
        }
        writeln!(
            svg,
            r#"  <path d="{}" fill="none" stroke="{}"{} stroke-width="{:.2}"/>"#,
            path,
            polyline.color.to_hex(),
            alpha_attr("stroke-opacity", polyline.color),
            polyline.stroke_width
        )?;
    }

    for circle in &frame.circles {
        writeln!(
            svg,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            circle.cx,
            circle.cy,
            circle.radius,
            circle.fill_color.to_hex(),
            circle.stroke_color.to_hex(),
            circle.stroke_width
        )?;
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        let transform = if text.rotation_deg == 0.0 {
            format!(r#"x="{:.2}" y="{:.2}""#, text.x, text.y)
        } else {
            format!(
                r#"transform="translate({:.2},{:.2}) rotate({:.2})""#,
                text.x, text.y, text.rotation_deg
            )
        };
        writeln!(
            svg,
            r#"  <text {} text-anchor="{}" font-family="sans-serif" font-size="{:.2}" fill="{}">{}</text>"#,
            transform,
            anchor,
            text.font_size_px,
            text.color.to_hex(),
            escape_xml(&text.text)
        )?;
    }

    writeln!(svg, "</g>")?;
    writeln!(svg, "</svg>")
}

fn alpha_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{:.3}""#, color.alpha)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(escape_xml("Trinidad & <Tobago>"), "Trinidad &amp; &lt;Tobago&gt;");
    }
}
