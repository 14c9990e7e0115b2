use tracing::{debug, trace};

use crate::core::{AxesLimits, ChartLayout, Viewport, find_min_max};
use crate::dataset::{Dataset, RecordField};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PolylinePrimitive, RenderFrame, TextPrimitive};

use super::{AxisMapping, AxisScene, ChartCaptions, chart_labels};

pub const POPULATION_LINE_WIDTH: f64 = 1.5;

/// Population-over-time chart for one country.
///
/// The path follows the dataset's row order; rows are not sorted by year, so
/// unordered source data produces a zig-zag line.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDownScene {
    pub country: String,
    pub layout: ChartLayout,
    pub limits: AxesLimits,
    pub mapping: AxisMapping,
    pub path: Vec<(f64, f64)>,
    pub axes: AxisScene,
    pub labels: [TextPrimitive; 3],
}

impl DrillDownScene {
    #[must_use]
    pub fn polyline(&self) -> Option<PolylinePrimitive> {
        if self.path.is_empty() {
            return None;
        }
        Some(PolylinePrimitive {
            points: self.path.clone(),
            stroke_width: POPULATION_LINE_WIDTH,
            color: Color::STEEL_BLUE,
        })
    }

    /// Frame drawn into a surface of `viewport`, unpositioned and opaque.
    #[must_use]
    pub fn to_frame(&self, viewport: Viewport) -> RenderFrame {
        let mut frame = RenderFrame::new(viewport);
        frame.lines.extend(self.axes.lines.iter().copied());
        frame.texts.extend(self.axes.texts.iter().cloned());
        if let Some(polyline) = self.polyline() {
            frame.polylines.push(polyline);
        }
        frame.texts.extend(self.labels.iter().cloned());
        frame
    }
}

/// Builds the drill-down chart of `country` with a fresh year/population
/// mapping scoped to `layout`.
pub fn build_population_scene(
    country: &str,
    dataset: &Dataset,
    layout: ChartLayout,
) -> ChartResult<DrillDownScene> {
    if !dataset.contains_country(country) {
        return Err(ChartError::InvalidData(format!(
            "no rows for country `{country}`"
        )));
    }

    let rows: Vec<_> = dataset.country_rows(country).collect();
    let years: Vec<f64> = rows.iter().map(|row| row.year_value()).collect();
    let population: Vec<f64> = rows.iter().map(|row| row.population).collect();

    let limits = find_min_max(&years, &population);
    let mapping = AxisMapping::build(limits, RecordField::Year, RecordField::Population, layout)?;

    let mut path = Vec::with_capacity(rows.len());
    for row in &rows {
        let (x, y) = mapping.map_point(row);
        if x.is_finite() && y.is_finite() {
            path.push((x, y));
        } else {
            trace!(country, year = %row.year, "skipping undefined population point");
        }
    }
    debug!(country, rows = rows.len(), points = path.len(), "built population scene");

    Ok(DrillDownScene {
        country: country.to_owned(),
        layout,
        limits,
        mapping,
        path,
        axes: mapping.axis_scene(layout),
        labels: chart_labels(layout, &ChartCaptions::population_chart(country)),
    })
}
