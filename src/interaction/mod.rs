use serde::{Deserialize, Serialize};

/// Timing and placement of the floating drill-down tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Added to the pointer's page coordinates when the tooltip opens.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Opacity reached once the show fade completes.
    pub shown_opacity: f64,
    pub show_duration_ms: f64,
    pub hide_duration_ms: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: -28.0,
            shown_opacity: 0.9,
            show_duration_ms: 200.0,
            hide_duration_ms: 500.0,
        }
    }
}

/// Linear opacity fade advanced by explicit time steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeTransition {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub elapsed_ms: f64,
}

impl FadeTransition {
    #[must_use]
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    #[must_use]
    pub fn progress(self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn opacity(self) -> f64 {
        self.from + (self.to - self.from) * self.progress()
    }

    #[must_use]
    pub fn is_finished(self) -> bool {
        self.progress() >= 1.0
    }
}

/// Position and opacity of the tooltip overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
    pub fade: Option<FadeTransition>,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            opacity: 0.0,
            fade: None,
        }
    }
}

impl TooltipState {
    /// Starts a fade from the current opacity; any running fade is replaced.
    pub fn fade_to(&mut self, target: f64, duration_ms: f64) {
        let fade = FadeTransition::new(self.opacity, target, duration_ms);
        self.opacity = fade.opacity();
        self.fade = if fade.is_finished() { None } else { Some(fade) };
    }

    /// Advances the running fade and returns the resulting opacity.
    pub fn step(&mut self, delta_ms: f64) -> f64 {
        if let Some(fade) = self.fade.as_mut() {
            if delta_ms.is_finite() && delta_ms > 0.0 {
                fade.elapsed_ms += delta_ms;
            }
            self.opacity = fade.opacity();
            if fade.is_finished() {
                self.fade = None;
            }
        }
        self.opacity
    }

    #[must_use]
    pub fn is_animating(self) -> bool {
        self.fade.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    cursor: Option<(f64, f64)>,
    hovered_mark: Option<usize>,
    tooltip_config: TooltipConfig,
    tooltip: TooltipState,
}

impl InteractionState {
    #[must_use]
    pub fn new(tooltip_config: TooltipConfig) -> Self {
        Self {
            tooltip_config,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cursor(self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn hovered_mark(self) -> Option<usize> {
        self.hovered_mark
    }

    #[must_use]
    pub fn tooltip(self) -> TooltipState {
        self.tooltip
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
    }

    /// Pointer entered a mark: place the tooltip at the page position and
    /// start the show fade.
    pub fn on_mark_enter(&mut self, mark: usize, page_x: f64, page_y: f64) {
        self.hovered_mark = Some(mark);
        self.tooltip
            .fade_to(self.tooltip_config.shown_opacity, self.tooltip_config.show_duration_ms);
        self.tooltip.left = page_x + self.tooltip_config.offset_x;
        self.tooltip.top = page_y + self.tooltip_config.offset_y;
    }

    /// Pointer left the hovered mark: start the hide fade. The tooltip keeps
    /// its position and content.
    pub fn on_mark_leave(&mut self) {
        self.hovered_mark = None;
        self.tooltip
            .fade_to(0.0, self.tooltip_config.hide_duration_ms);
    }

    pub fn step_tooltip(&mut self, delta_ms: f64) -> f64 {
        self.tooltip.step(delta_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionState, TooltipConfig};

    #[test]
    fn show_fade_reaches_target_after_duration() {
        let mut state = InteractionState::new(TooltipConfig::default());
        state.on_mark_enter(3, 400.0, 300.0);
        assert_eq!(state.hovered_mark(), Some(3));
        assert_eq!(state.tooltip().left, 400.0);
        assert_eq!(state.tooltip().top, 272.0);
        assert_eq!(state.tooltip().opacity, 0.0);

        let halfway = state.step_tooltip(100.0);
        assert!((halfway - 0.45).abs() <= 1e-12);
        let done = state.step_tooltip(150.0);
        assert!((done - 0.9).abs() <= 1e-12);
        assert!(!state.tooltip().is_animating());
    }

    #[test]
    fn interrupted_fade_continues_from_current_opacity() {
        let mut state = InteractionState::new(TooltipConfig::default());
        state.on_mark_enter(0, 10.0, 10.0);
        state.step_tooltip(100.0);
        state.on_mark_leave();
        assert!((state.tooltip().opacity - 0.45).abs() <= 1e-12);
        state.step_tooltip(250.0);
        assert!((state.tooltip().opacity - 0.225).abs() <= 1e-12);
        state.step_tooltip(250.0);
        assert_eq!(state.tooltip().opacity, 0.0);
        assert_eq!(state.hovered_mark(), None);
    }
}
