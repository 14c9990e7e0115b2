use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxesLimits, ChartLayout, DEFAULT_TICK_COUNT, LinearScale, format_tick};
use crate::dataset::{CountryRecord, RecordField};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, TextHAlign, TextPrimitive};

/// Padding added on both sides of the x domain.
pub const X_DOMAIN_PADDING: f64 = 0.5;
/// Padding added on both sides of the y domain.
pub const Y_DOMAIN_PADDING: f64 = 5.0;

const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_GAP_PX: f64 = 9.0;
const TICK_FONT_PX: f64 = 10.0;
const AXIS_STROKE_WIDTH: f64 = 1.0;

/// Value-to-pixel mappings for one chart.
///
/// The x scale grows left to right. The y domain is stored high-to-low so
/// larger values land nearer the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    x_field: RecordField,
    y_field: RecordField,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl AxisMapping {
    pub fn build(
        limits: AxesLimits,
        x_field: RecordField,
        y_field: RecordField,
        layout: ChartLayout,
    ) -> ChartResult<Self> {
        let layout = layout.validate()?;
        if !limits.x().is_finite() || !limits.y().is_finite() {
            return Err(ChartError::InvalidData(format!(
                "axis limits for `{}`/`{}` must be finite (is the series empty?)",
                x_field.column(),
                y_field.column()
            )));
        }

        let x_scale = LinearScale::new(
            (limits.x_min - X_DOMAIN_PADDING, limits.x_max + X_DOMAIN_PADDING),
            layout.x_range(),
        )?;
        let y_scale = LinearScale::new(
            (limits.y_max + Y_DOMAIN_PADDING, limits.y_min - Y_DOMAIN_PADDING),
            layout.y_range(),
        )?;
        debug!(
            x_field = x_field.column(),
            y_field = y_field.column(),
            x_domain = ?x_scale.domain(),
            y_domain = ?y_scale.domain(),
            "built axis mapping"
        );

        Ok(Self {
            x_field,
            y_field,
            x_scale,
            y_scale,
        })
    }

    #[must_use]
    pub fn x_field(&self) -> RecordField {
        self.x_field
    }

    #[must_use]
    pub fn y_field(&self) -> RecordField {
        self.y_field
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn map_x(&self, record: &CountryRecord) -> f64 {
        self.x_scale.map(self.x_field.value(record))
    }

    #[must_use]
    pub fn map_y(&self, record: &CountryRecord) -> f64 {
        self.y_scale.map(self.y_field.value(record))
    }

    #[must_use]
    pub fn map_point(&self, record: &CountryRecord) -> (f64, f64) {
        (self.map_x(record), self.map_y(record))
    }

    /// Bottom x axis and left y axis for `layout`.
    #[must_use]
    pub fn axis_scene(&self, layout: ChartLayout) -> AxisScene {
        let mut scene = AxisScene::default();
        push_bottom_axis(&mut scene, self.x_scale, layout.x_axis_offset());
        push_left_axis(&mut scene, self.y_scale, layout.y_axis_offset());
        scene
    }
}

/// Axis lines, ticks and tick labels of one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisScene {
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

fn axis_line(x1: f64, y1: f64, x2: f64, y2: f64) -> LinePrimitive {
    LinePrimitive::new(x1, y1, x2, y2, AXIS_STROKE_WIDTH, Color::BLACK)
}

fn push_bottom_axis(scene: &mut AxisScene, scale: LinearScale, baseline: f64) {
    let (start, end) = scale.range();
    scene.lines.push(axis_line(start, baseline, end, baseline));
    for edge in [start, end] {
        scene
            .lines
            .push(axis_line(edge, baseline, edge, baseline + TICK_SIZE_PX));
    }

    let step = scale.tick_step(DEFAULT_TICK_COUNT);
    for (value, x) in scale.tick_positions(DEFAULT_TICK_COUNT) {
        scene
            .lines
            .push(axis_line(x, baseline, x, baseline + TICK_SIZE_PX));
        scene.texts.push(TextPrimitive::new(
            format_tick(value, step),
            x,
            baseline + TICK_LABEL_GAP_PX + 0.71 * TICK_FONT_PX,
            TICK_FONT_PX,
            Color::BLACK,
            TextHAlign::Center,
        ));
    }
}

fn push_left_axis(scene: &mut AxisScene, scale: LinearScale, baseline: f64) {
    let (start, end) = scale.range();
    scene.lines.push(axis_line(baseline, start, baseline, end));
    for edge in [start, end] {
        scene
            .lines
            .push(axis_line(baseline - TICK_SIZE_PX, edge, baseline, edge));
    }

    let step = scale.tick_step(DEFAULT_TICK_COUNT);
    for (value, y) in scale.tick_positions(DEFAULT_TICK_COUNT) {
        scene
            .lines
            .push(axis_line(baseline - TICK_SIZE_PX, y, baseline, y));
        scene.texts.push(TextPrimitive::new(
            format_tick(value, step),
            baseline - TICK_LABEL_GAP_PX,
            y + 0.32 * TICK_FONT_PX,
            TICK_FONT_PX,
            Color::BLACK,
            TextHAlign::Right,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::AxisMapping;
    use crate::core::{AxesLimits, ChartLayout};
    use crate::dataset::RecordField;

    fn limits() -> AxesLimits {
        AxesLimits {
            x_min: 1.0,
            x_max: 8.0,
            y_min: 40.0,
            y_max: 85.0,
        }
    }

    #[test]
    fn padded_domains_span_the_plot_area() {
        let mapping = AxisMapping::build(
            limits(),
            RecordField::Fertility,
            RecordField::LifeExpectancy,
            ChartLayout::MAIN,
        )
        .expect("mapping");

        assert_eq!(mapping.x_scale().domain(), (0.5, 8.5));
        assert_eq!(mapping.x_scale().range(), (50.0, 1450.0));
        assert_eq!(mapping.y_scale().domain(), (90.0, 35.0));
        assert_eq!(mapping.y_scale().range(), (50.0, 750.0));
    }

    #[test]
    fn axis_scene_has_labelled_ticks_on_both_axes() {
        let mapping = AxisMapping::build(
            limits(),
            RecordField::Fertility,
            RecordField::LifeExpectancy,
            ChartLayout::MAIN,
        )
        .expect("mapping");
        let scene = mapping.axis_scene(ChartLayout::MAIN);

        assert!(scene.texts.iter().any(|text| text.text == "4"));
        assert!(scene.texts.iter().any(|text| text.text == "60"));
        assert!(
            scene
                .lines
                .iter()
                .any(|line| line.y1 == 750.0 && line.y2 == 750.0 && line.x1 == 50.0)
        );
    }
}
