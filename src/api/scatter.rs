use serde::{Deserialize, Serialize};

use crate::core::SqrtScale;
use crate::dataset::{Dataset, RecordField};
use crate::render::{CirclePrimitive, Color};

use super::AxisMapping;

/// Pixel radius bounds of the population size scale.
pub const MARK_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::WHITE,
            stroke_color: Color::MARK_STROKE,
            stroke_width: 2.0,
        }
    }
}

/// One circle bound to a dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterMark {
    pub row: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub visible: bool,
}

impl ScatterMark {
    /// Whether the mark has usable geometry. Rows with non-numeric values
    /// produce marks that are never drawn nor hit.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }

    /// Whether `(x, y)` falls inside the circle, outline included.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64, stroke_width: f64) -> bool {
        let reach = self.radius + stroke_width / 2.0;
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= reach * reach
    }
}

/// Marks for every row of a dataset, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterLayer {
    marks: Vec<ScatterMark>,
    radius_scale: SqrtScale,
    style: MarkStyle,
}

impl ScatterLayer {
    #[must_use]
    pub fn marks(&self) -> &[ScatterMark] {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut [ScatterMark] {
        &mut self.marks
    }

    #[must_use]
    pub fn radius_scale(&self) -> SqrtScale {
        self.radius_scale
    }

    #[must_use]
    pub fn style(&self) -> MarkStyle {
        self.style
    }

    pub fn visible_marks(&self) -> impl Iterator<Item = &ScatterMark> {
        self.marks.iter().filter(|mark| mark.visible)
    }

    /// Topmost visible mark under the pointer.
    ///
    /// Marks are painted in row order, so among overlapping marks the one
    /// with the highest row index wins.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.marks
            .iter()
            .enumerate()
            .rev()
            .find(|(_, mark)| {
                mark.visible && mark.is_drawable() && mark.contains(x, y, self.style.stroke_width)
            })
            .map(|(index, _)| index)
    }

    /// Circles for the visible, drawable marks.
    #[must_use]
    pub fn circles(&self) -> Vec<CirclePrimitive> {
        self.visible_marks()
            .filter(|mark| mark.is_drawable())
            .map(|mark| CirclePrimitive {
                cx: mark.cx,
                cy: mark.cy,
                radius: mark.radius,
                fill_color: self.style.fill_color,
                stroke_color: self.style.stroke_color,
                stroke_width: self.style.stroke_width,
            })
            .collect()
    }
}

/// Projects every row into a mark positioned by `mapping` and sized by a
/// square-root scale of population over the whole dataset.
///
/// All marks start visible; the year filter narrows them down.
#[must_use]
pub fn build_scatter(dataset: &Dataset, mapping: &AxisMapping, style: MarkStyle) -> ScatterLayer {
    let population = dataset.extent(RecordField::Population);
    let radius_scale = SqrtScale::new((population.min, population.max), MARK_RADIUS_RANGE);

    let project = |(row, record): (usize, &crate::dataset::CountryRecord)| {
        let (cx, cy) = mapping.map_point(record);
        ScatterMark {
            row,
            cx,
            cy,
            radius: radius_scale.map(record.population),
            visible: true,
        }
    };

    #[cfg(feature = "parallel-projection")]
    let marks: Vec<ScatterMark> = {
        use rayon::prelude::*;
        dataset
            .records()
            .par_iter()
            .enumerate()
            .map(project)
            .collect()
    };

    #[cfg(not(feature = "parallel-projection"))]
    let marks: Vec<ScatterMark> = dataset.records().iter().enumerate().map(project).collect();

    ScatterLayer {
        marks,
        radius_scale,
        style,
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkStyle, ScatterMark};

    #[test]
    fn containment_includes_the_outline() {
        let mark = ScatterMark {
            row: 0,
            cx: 100.0,
            cy: 100.0,
            radius: 10.0,
            visible: true,
        };
        let stroke = MarkStyle::default().stroke_width;
        assert!(mark.contains(110.5, 100.0, stroke));
        assert!(!mark.contains(111.5, 100.0, stroke));
    }

    #[test]
    fn nan_geometry_is_not_drawable() {
        let mark = ScatterMark {
            row: 0,
            cx: f64::NAN,
            cy: 1.0,
            radius: 3.0,
            visible: true,
        };
        assert!(!mark.is_drawable());
    }
}
