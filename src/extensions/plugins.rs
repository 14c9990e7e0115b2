use serde::{Deserialize, Serialize};

use crate::interaction::TooltipState;

/// Read-only session state passed to plugin hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub selected_year: String,
    pub rows: usize,
    pub visible_marks: usize,
    pub hovered_mark: Option<usize>,
    pub tooltip: TooltipState,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    YearSelected { year: String, visible_marks: usize },
    MarkHovered { mark: usize, country: String },
    MarkLeft { mark: usize },
    Rendered,
}

/// Observer interface for host code reacting to chart interaction.
///
/// Plugins see events and context but cannot mutate the session.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: &PluginContext);
}
