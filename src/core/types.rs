use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel size of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Size of both the main and the overlay surface.
    pub const SURFACE: Self = Self::new(1500, 800);

    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Layout of one chart inside its surface.
///
/// `margin_all` pads every plot edge; `margin_left` only shifts the title and
/// x caption horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin_all: f64,
    pub margin_left: f64,
}

impl ChartLayout {
    /// Large fertility vs life expectancy chart.
    pub const MAIN: Self = Self {
        width: 1500.0,
        height: 800.0,
        margin_all: 50.0,
        margin_left: 50.0,
    };

    /// Population chart shown inside the hover tooltip.
    pub const DRILL_DOWN: Self = Self {
        width: 500.0,
        height: 500.0,
        margin_all: 70.0,
        margin_left: 160.0,
    };

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("margin_all", self.margin_all),
            ("margin_left", self.margin_left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }

        if self.width - 2.0 * self.margin_all <= 0.0 || self.height - 2.0 * self.margin_all <= 0.0
        {
            return Err(ChartError::InvalidData(
                "layout margins must leave a positive plot area".to_owned(),
            ));
        }

        Ok(self)
    }

    /// Horizontal pixel range of the plot area, left to right.
    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (self.margin_all, self.width - self.margin_all)
    }

    /// Vertical pixel range of the plot area, top to bottom.
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.margin_all, self.height - self.margin_all)
    }

    /// Y coordinate of the x-axis line.
    #[must_use]
    pub fn x_axis_offset(self) -> f64 {
        self.height - self.margin_all
    }

    /// X coordinate of the y-axis line.
    #[must_use]
    pub fn y_axis_offset(self) -> f64 {
        self.margin_all
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width.ceil() as u32, self.height.ceil() as u32)
    }
}
