mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
