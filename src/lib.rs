//! gapminder-chart: fertility vs life expectancy scatter chart.
//!
//! Rows are loaded once into a [`dataset::Dataset`], projected into
//! backend-agnostic scenes through linear and square-root scales, and drawn
//! by any [`render::Renderer`]. Hovering a mark composes a drill-down line
//! chart of the country's population over time.

pub mod api;
pub mod core;
pub mod dataset;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{ChartSession, ChartSessionConfig};
pub use error::{ChartError, ChartResult};
