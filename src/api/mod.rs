mod axis;
mod config;
mod drill_down;
mod labels;
mod scatter;
mod session;
mod snapshot;
mod year_filter;

pub use axis::{AxisMapping, AxisScene, X_DOMAIN_PADDING, Y_DOMAIN_PADDING};
pub use config::{ChartSessionConfig, DEFAULT_YEAR};
pub use drill_down::{DrillDownScene, POPULATION_LINE_WIDTH, build_population_scene};
pub use labels::{CAPTION_FONT_PT, ChartCaptions, TITLE_FONT_PT, chart_labels, points_to_px};
pub use scatter::{MARK_RADIUS_RANGE, MarkStyle, ScatterLayer, ScatterMark, build_scatter};
pub use session::ChartSession;
pub use snapshot::{
    DrillDownSnapshot, SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshot,
    SessionSnapshotJsonContractV1,
};
pub use year_filter::apply_year_filter;
