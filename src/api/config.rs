use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::TooltipConfig;

use super::{ChartCaptions, MarkStyle};

/// Year shown when a session starts.
pub const DEFAULT_YEAR: &str = "1980";

/// Public session bootstrap configuration.
///
/// Serializable so host applications can persist chart setup as JSON. Every
/// field has a default matching the stock fertility/population charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSessionConfig {
    #[serde(default = "default_surface")]
    pub main_surface: Viewport,
    #[serde(default = "default_surface")]
    pub overlay_surface: Viewport,
    #[serde(default = "default_main_layout")]
    pub main_layout: ChartLayout,
    #[serde(default = "default_drill_down_layout")]
    pub drill_down_layout: ChartLayout,
    #[serde(default = "default_year")]
    pub default_year: String,
    #[serde(default = "ChartCaptions::main_chart")]
    pub main_captions: ChartCaptions,
    #[serde(default)]
    pub mark_style: MarkStyle,
    #[serde(default)]
    pub tooltip: TooltipConfig,
}

fn default_surface() -> Viewport {
    Viewport::SURFACE
}

fn default_main_layout() -> ChartLayout {
    ChartLayout::MAIN
}

fn default_drill_down_layout() -> ChartLayout {
    ChartLayout::DRILL_DOWN
}

fn default_year() -> String {
    DEFAULT_YEAR.to_owned()
}

impl Default for ChartSessionConfig {
    fn default() -> Self {
        Self {
            main_surface: default_surface(),
            overlay_surface: default_surface(),
            main_layout: default_main_layout(),
            drill_down_layout: default_drill_down_layout(),
            default_year: default_year(),
            main_captions: ChartCaptions::main_chart(),
            mark_style: MarkStyle::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartSessionConfig {
    /// Sets the year selected at startup.
    #[must_use]
    pub fn with_default_year(mut self, year: impl Into<String>) -> Self {
        self.default_year = year.into();
        self
    }

    #[must_use]
    pub fn with_main_layout(mut self, layout: ChartLayout) -> Self {
        self.main_layout = layout;
        self
    }

    #[must_use]
    pub fn with_drill_down_layout(mut self, layout: ChartLayout) -> Self {
        self.drill_down_layout = layout;
        self
    }

    #[must_use]
    pub fn with_main_captions(mut self, captions: ChartCaptions) -> Self {
        self.main_captions = captions;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for surface in [self.main_surface, self.overlay_surface] {
            if !surface.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: surface.width,
                    height: surface.height,
                });
            }
        }
        self.main_layout.validate()?;
        self.drill_down_layout.validate()?;

        let tooltip = self.tooltip;
        if !(0.0..=1.0).contains(&tooltip.shown_opacity) {
            return Err(ChartError::InvalidData(
                "tooltip opacity must be in [0, 1]".to_owned(),
            ));
        }
        if !tooltip.show_duration_ms.is_finite()
            || !tooltip.hide_duration_ms.is_finite()
            || tooltip.show_duration_ms < 0.0
            || tooltip.hide_duration_ms < 0.0
        {
            return Err(ChartError::InvalidData(
                "tooltip fade durations must be finite and >= 0".to_owned(),
            ));
        }
        if !tooltip.offset_x.is_finite() || !tooltip.offset_y.is_finite() {
            return Err(ChartError::InvalidData(
                "tooltip offsets must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse session config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize session config: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ChartSessionConfig;
    use crate::core::ChartLayout;

    #[test]
    fn empty_json_object_yields_defaults() {
        let config = ChartSessionConfig::from_json_str("{}").expect("defaults");
        assert_eq!(config, ChartSessionConfig::default());
        assert_eq!(config.default_year, "1980");
        assert_eq!(config.drill_down_layout, ChartLayout::DRILL_DOWN);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config =
            ChartSessionConfig::from_json_str(r#"{ "default_year": "2000" }"#).expect("config");
        assert_eq!(config.default_year, "2000");
        assert_eq!(config.main_layout, ChartLayout::MAIN);
    }
}
