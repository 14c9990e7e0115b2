use tracing::{debug, trace, warn};

use crate::core::{AxesLimits, find_min_max};
use crate::dataset::{Dataset, RecordField};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};
use crate::interaction::{InteractionState, TooltipState};
use crate::render::{RenderFrame, Renderer};

use super::{
    AxisMapping, ChartSessionConfig, DrillDownScene, DrillDownSnapshot, ScatterLayer, ScatterMark,
    SessionSnapshot, apply_year_filter, build_population_scene, build_scatter, chart_labels,
};

/// Session context for one loaded dataset and its two surfaces.
///
/// The session owns everything the charts need between events: the dataset,
/// the main-chart mapping and marks, the selected year, the interaction
/// state and the current drill-down scene. The main renderer draws the
/// scatter chart; the overlay renderer draws the floating tooltip.
pub struct ChartSession<R: Renderer> {
    main_renderer: R,
    overlay_renderer: R,
    config: ChartSessionConfig,
    dataset: Dataset,
    limits: AxesLimits,
    mapping: AxisMapping,
    scatter: ScatterLayer,
    selected_year: String,
    interaction: InteractionState,
    drill_down: Option<DrillDownScene>,
    plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<R: Renderer> ChartSession<R> {
    /// Builds the main chart and applies the configured default year.
    pub fn new(
        main_renderer: R,
        overlay_renderer: R,
        config: ChartSessionConfig,
        dataset: Dataset,
    ) -> ChartResult<Self> {
        config.validate()?;

        let fertility = dataset.column(RecordField::Fertility);
        let life_expectancy = dataset.column(RecordField::LifeExpectancy);
        let limits = find_min_max(&fertility, &life_expectancy);
        let mapping = AxisMapping::build(
            limits,
            RecordField::Fertility,
            RecordField::LifeExpectancy,
            config.main_layout,
        )?;
        let mut scatter = build_scatter(&dataset, &mapping, config.mark_style);
        let selected_year = config.default_year.clone();
        let visible = apply_year_filter(scatter.marks_mut(), &dataset, &selected_year);
        debug!(
            rows = dataset.len(),
            visible_marks = visible,
            year = %selected_year,
            "chart session ready"
        );

        Ok(Self {
            main_renderer,
            overlay_renderer,
            interaction: InteractionState::new(config.tooltip),
            config,
            dataset,
            limits,
            mapping,
            scatter,
            selected_year,
            drill_down: None,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartSessionConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn limits(&self) -> AxesLimits {
        self.limits
    }

    #[must_use]
    pub fn mapping(&self) -> &AxisMapping {
        &self.mapping
    }

    #[must_use]
    pub fn scatter(&self) -> &ScatterLayer {
        &self.scatter
    }

    #[must_use]
    pub fn marks(&self) -> &[ScatterMark] {
        self.scatter.marks()
    }

    #[must_use]
    pub fn selected_year(&self) -> &str {
        &self.selected_year
    }

    #[must_use]
    pub fn visible_mark_count(&self) -> usize {
        self.scatter.visible_marks().count()
    }

    /// Countries of the visible marks, in row order.
    pub fn visible_countries(&self) -> impl Iterator<Item = &str> {
        self.scatter
            .visible_marks()
            .filter_map(|mark| self.dataset.get(mark.row))
            .map(|record| record.country.as_str())
    }

    /// Last pointer position on the main surface, `None` once it left.
    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.interaction.cursor()
    }

    #[must_use]
    pub fn hovered_mark(&self) -> Option<usize> {
        self.interaction.hovered_mark()
    }

    #[must_use]
    pub fn tooltip(&self) -> TooltipState {
        self.interaction.tooltip()
    }

    #[must_use]
    pub fn drill_down(&self) -> Option<&DrillDownScene> {
        self.drill_down.as_ref()
    }

    /// Selects the year whose marks are shown. Returns the visible count.
    pub fn show_year(&mut self, year: &str) -> usize {
        year.clone_into(&mut self.selected_year);
        let visible = apply_year_filter(self.scatter.marks_mut(), &self.dataset, year);
        debug!(year, visible_marks = visible, "year selected");

        if let Some(mark) = self.interaction.hovered_mark() {
            if !self.scatter.marks()[mark].visible {
                self.leave_hovered_mark();
            }
        }

        self.emit_event(ChartEvent::YearSelected {
            year: year.to_owned(),
            visible_marks: visible,
        });
        visible
    }

    /// Hover handler for one mark.
    ///
    /// Rebuilds the drill-down chart for the mark's country, replacing the
    /// overlay content, and opens the tooltip at the page position. When the
    /// chart cannot be built the session is left unchanged and the mark is
    /// not hovered.
    pub fn hover_mark(&mut self, mark: usize, page_x: f64, page_y: f64) -> ChartResult<()> {
        let row = self
            .scatter
            .marks()
            .get(mark)
            .map(|mark| mark.row)
            .ok_or_else(|| ChartError::InvalidData(format!("mark index {mark} out of range")))?;
        let country = self
            .dataset
            .get(row)
            .map(|record| record.country.clone())
            .ok_or_else(|| ChartError::InvalidData(format!("row index {row} out of range")))?;

        let scene = build_population_scene(&country, &self.dataset, self.config.drill_down_layout)
            .inspect_err(|err| warn!(country = %country, error = %err, "drill-down failed"))?;

        self.drill_down = Some(scene);
        self.interaction.on_mark_enter(mark, page_x, page_y);
        trace!(mark, country = %country, page_x, page_y, "mark hovered");

        self.emit_event(ChartEvent::MarkHovered { mark, country });
        Ok(())
    }

    /// Un-hover handler: fades the tooltip out and keeps its content.
    pub fn unhover(&mut self) {
        self.leave_hovered_mark();
    }

    /// Routes a pointer position through hit testing.
    ///
    /// `(x, y)` are main-surface coordinates and `(page_x, page_y)` the
    /// position used to place the tooltip. Entering a new mark fires the
    /// hover handler; moving within the hovered mark does nothing.
    pub fn pointer_move_on_page(
        &mut self,
        x: f64,
        y: f64,
        page_x: f64,
        page_y: f64,
    ) -> ChartResult<Option<usize>> {
        self.interaction.on_pointer_move(x, y);
        let hit = self.scatter.hit_test(x, y);
        let current = self.interaction.hovered_mark();
        if hit == current {
            return Ok(hit);
        }

        if current.is_some() {
            self.leave_hovered_mark();
        }
        if let Some(mark) = hit {
            self.hover_mark(mark, page_x, page_y)?;
        }
        Ok(hit)
    }

    /// Same as [`ChartSession::pointer_move_on_page`] with the surface
    /// placed at the page origin.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<Option<usize>> {
        self.pointer_move_on_page(x, y, x, y)
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
        self.leave_hovered_mark();
    }

    /// Advances the tooltip fade by `delta_ms` and returns its opacity.
    pub fn step_tooltip(&mut self, delta_ms: f64) -> f64 {
        self.interaction.step_tooltip(delta_ms)
    }

    fn leave_hovered_mark(&mut self) {
        if let Some(mark) = self.interaction.hovered_mark() {
            self.interaction.on_mark_leave();
            trace!(mark, "mark left");
            self.emit_event(ChartEvent::MarkLeft { mark });
        }
    }

    /// Axes, visible marks and labels of the main chart.
    #[must_use]
    pub fn main_frame(&self) -> RenderFrame {
        let layout = self.config.main_layout;
        let axes = self.mapping.axis_scene(layout);

        let mut frame = RenderFrame::new(self.config.main_surface);
        frame.lines = axes.lines;
        frame.texts = axes.texts;
        frame.circles = self.scatter.circles();
        frame
            .texts
            .extend(chart_labels(layout, &self.config.main_captions));
        frame
    }

    /// Tooltip overlay positioned and faded per the interaction state.
    /// Empty until the first hover.
    #[must_use]
    pub fn overlay_frame(&self) -> RenderFrame {
        let tooltip = self.interaction.tooltip();
        let surface = self.config.overlay_surface;
        let frame = match &self.drill_down {
            Some(scene) => scene.to_frame(surface),
            None => RenderFrame::new(surface),
        };
        frame
            .with_offset(tooltip.left, tooltip.top)
            .with_opacity(tooltip.opacity.clamp(0.0, 1.0))
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let main = self.main_frame();
        let overlay = self.overlay_frame();
        self.main_renderer.render(&main)?;
        self.overlay_renderer.render(&overlay)?;
        trace!(
            circles = main.circles.len(),
            overlay_opacity = overlay.opacity,
            "rendered session"
        );
        self.emit_event(ChartEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn main_renderer(&self) -> &R {
        &self.main_renderer
    }

    #[must_use]
    pub fn overlay_renderer(&self) -> &R {
        &self.overlay_renderer
    }

    #[must_use]
    pub fn into_renderers(self) -> (R, R) {
        (self.main_renderer, self.overlay_renderer)
    }

    /// Registers an observer. Plugin ids must be unique.
    pub fn add_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        if self.plugins.iter().any(|existing| existing.id() == plugin.id()) {
            return Err(ChartError::InvalidData(format!(
                "plugin `{}` is already registered",
                plugin.id()
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Removes a plugin by id. Returns `true` when one was removed.
    pub fn remove_plugin(&mut self, id: &str) -> bool {
        let before = self.plugins.len();
        self.plugins.retain(|plugin| plugin.id() != id);
        self.plugins.len() != before
    }

    fn plugin_context(&self) -> PluginContext {
        PluginContext {
            selected_year: self.selected_year.clone(),
            rows: self.dataset.len(),
            visible_marks: self.visible_mark_count(),
            hovered_mark: self.interaction.hovered_mark(),
            tooltip: self.interaction.tooltip(),
        }
    }

    fn emit_event(&mut self, event: ChartEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(&event, &context);
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let hovered_mark = self.interaction.hovered_mark();
        let hovered_country = hovered_mark
            .and_then(|mark| self.scatter.marks().get(mark))
            .and_then(|mark| self.dataset.get(mark.row))
            .map(|record| record.country.clone());

        SessionSnapshot {
            main_surface: self.config.main_surface,
            rows: self.dataset.len(),
            selected_year: self.selected_year.clone(),
            visible_marks: self.visible_mark_count(),
            main_limits: self.limits,
            hovered_mark,
            hovered_country,
            tooltip: self.interaction.tooltip(),
            drill_down: self.drill_down.as_ref().map(|scene| DrillDownSnapshot {
                country: scene.country.clone(),
                limits: scene.limits,
                path: scene.path.clone(),
            }),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

#[cfg(feature = "cairo-backend")]
impl<R: Renderer + crate::render::CairoContextRenderer> ChartSession<R> {
    /// Draws the main chart and then the tooltip overlay into one external
    /// Cairo context, as used by GTK draw callbacks.
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()> {
        let main = self.main_frame();
        let overlay = self.overlay_frame();
        self.main_renderer.render_on_cairo_context(context, &main)?;
        self.overlay_renderer
            .render_on_cairo_context(context, &overlay)?;
        self.emit_event(ChartEvent::Rendered);
        Ok(())
    }
}
