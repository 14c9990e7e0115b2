use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;
use crate::render::{Color, TextHAlign, TextPrimitive};

pub const TITLE_FONT_PT: f64 = 14.0;
pub const CAPTION_FONT_PT: f64 = 12.0;

// Hand-tuned shifts; only valid for the two fixed layouts.
const TITLE_SHIFT_PX: f64 = -150.0;
const X_CAPTION_SHIFT_PX: f64 = -100.0;
const Y_CAPTION_LEFT_PX: f64 = 15.0;
const Y_CAPTION_DROP_PX: f64 = 40.0;

/// Title and axis captions of one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartCaptions {
    pub title: String,
    pub x_caption: String,
    pub y_caption: String,
}

impl ChartCaptions {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        x_caption: impl Into<String>,
        y_caption: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            x_caption: x_caption.into(),
            y_caption: y_caption.into(),
        }
    }

    #[must_use]
    pub fn main_chart() -> Self {
        Self::new(
            "Countries by Fertility vs Life Expectancy (1980)",
            "Fertility Rates (Avg Children per Woman)",
            "Life Expectancy (years)",
        )
    }

    #[must_use]
    pub fn population_chart(country: &str) -> Self {
        Self::new(
            format!("Population Over Time For {country}"),
            "Year",
            "Population (in Millions)",
        )
    }
}

#[must_use]
pub fn points_to_px(points: f64) -> f64 {
    points * 96.0 / 72.0
}

/// Title, x caption and y caption, in that order.
#[must_use]
pub fn chart_labels(layout: ChartLayout, captions: &ChartCaptions) -> [TextPrimitive; 3] {
    let half_plot_width = (layout.width - 2.0 * layout.margin_all) / 2.0;

    let title = TextPrimitive::new(
        captions.title.clone(),
        half_plot_width + layout.margin_left / 2.0 + TITLE_SHIFT_PX,
        layout.margin_all / 2.0 + 10.0,
        points_to_px(TITLE_FONT_PT),
        Color::BLACK,
        TextHAlign::Left,
    );
    let x_caption = TextPrimitive::new(
        captions.x_caption.clone(),
        half_plot_width + layout.margin_left + X_CAPTION_SHIFT_PX,
        layout.height - 10.0,
        points_to_px(CAPTION_FONT_PT),
        Color::BLACK,
        TextHAlign::Left,
    );
    let y_caption = TextPrimitive::new(
        captions.y_caption.clone(),
        Y_CAPTION_LEFT_PX,
        layout.height / 2.0 + Y_CAPTION_DROP_PX,
        points_to_px(CAPTION_FONT_PT),
        Color::BLACK,
        TextHAlign::Left,
    )
    .rotated(-90.0);

    [title, x_caption, y_caption]
}
