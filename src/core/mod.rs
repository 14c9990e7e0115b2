pub mod extent;
pub mod scale;
pub mod ticks;
pub mod types;

pub use extent::{AxesLimits, Extent, find_min_max};
pub use scale::{LinearScale, SqrtScale};
pub use ticks::{DEFAULT_TICK_COUNT, TickValues, format_tick, tick_step, tick_values};
pub use types::{ChartLayout, Viewport};
