use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::ChartSession;
use crate::render::{CairoContextRenderer, Renderer};

/// Hosts a [`ChartSession`] inside a GTK4 `DrawingArea`.
///
/// Pointer motion drives hover hit testing, leaving the area fades the
/// tooltip out, and a frame-clock tick advances running fades.
pub struct GtkChartAdapter<R: Renderer + CairoContextRenderer + 'static> {
    session: Rc<RefCell<ChartSession<R>>>,
    drawing_area: gtk::DrawingArea,
}

impl<R: Renderer + CairoContextRenderer + 'static> GtkChartAdapter<R> {
    #[must_use]
    pub fn new(session: ChartSession<R>) -> Self {
        let surface = session.config().main_surface;
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(i32::try_from(surface.width).unwrap_or(i32::MAX));
        drawing_area.set_content_height(i32::try_from(surface.height).unwrap_or(i32::MAX));

        let adapter = Self {
            session: Rc::new(RefCell::new(session)),
            drawing_area,
        };
        adapter.install_draw_func();
        adapter.install_pointer_controller();
        adapter.install_fade_ticker();
        adapter
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn session(&self) -> Rc<RefCell<ChartSession<R>>> {
        Rc::clone(&self.session)
    }

    /// Selects a year and schedules a redraw.
    pub fn show_year(&self, year: &str) {
        self.session.borrow_mut().show_year(year);
        self.drawing_area.queue_draw();
    }

    fn install_draw_func(&self) {
        let session = Rc::clone(&self.session);
        self.drawing_area
            .set_draw_func(move |_area, context, _width, _height| {
                context.set_source_rgb(1.0, 1.0, 1.0);
                if let Err(err) = context.paint() {
                    warn!(error = %err, "failed to clear drawing area");
                    return;
                }
                if let Err(err) = session.borrow_mut().render_on_cairo_context(context) {
                    warn!(error = %err, "chart render failed");
                }
            });
    }

    fn install_pointer_controller(&self) {
        let motion = gtk::EventControllerMotion::new();

        let session = Rc::clone(&self.session);
        let area = self.drawing_area.clone();
        motion.connect_motion(move |_controller, x, y| {
            if let Err(err) = session.borrow_mut().pointer_move(x, y) {
                warn!(error = %err, "hover handling failed");
            }
            area.queue_draw();
        });

        let session = Rc::clone(&self.session);
        let area = self.drawing_area.clone();
        motion.connect_leave(move |_controller| {
            session.borrow_mut().pointer_leave();
            area.queue_draw();
        });

        self.drawing_area.add_controller(motion);
    }

    fn install_fade_ticker(&self) {
        let session = Rc::clone(&self.session);
        let last_frame_us = Cell::new(None::<i64>);
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now_us = clock.frame_time();
            let delta_ms = last_frame_us
                .replace(Some(now_us))
                .map_or(0.0, |previous| (now_us - previous) as f64 / 1000.0);

            let mut session = session.borrow_mut();
            if session.tooltip().is_animating() {
                session.step_tooltip(delta_ms);
                area.queue_draw();
            }
            gtk::glib::ControlFlow::Continue
        });
    }
}
