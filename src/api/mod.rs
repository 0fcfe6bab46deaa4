//! Retained-scene charts: the single row chart and the paired row chart.

mod accessors;
mod caption;
mod chart_state;
mod config;
mod frame_builder;
mod paired_row_chart;
mod pipeline;
mod row_chart;
mod scene;
mod snapshot;
mod transition;

pub use accessors::{
    ClickHandler, KeyFilter, RowAccessors, TextAccessor, TickFormatter, ValueAccessor,
};
pub use caption::{CaptionNode, X_AXIS_LABEL_CLASS};
pub use chart_state::ChartStrategies;
pub use config::{DEFAULT_LABEL_OFFSET_Y, RowChartConfig};
pub use paired_row_chart::{PAIRED_LEFT_CLASS, PAIRED_RIGHT_CLASS, PairedJoin, PairedRowChart};
pub use pipeline::RowPane;
pub use row_chart::RowChart;
pub use scene::{
    AxisNode, AxisTick, GridLine, LabelNode, PaneScene, ROW_CLASS, Row, RowNode, TITLE_ROW_CLASS,
    indexed_class,
};
pub use snapshot::{ChartSnapshot, PaneSnapshot};
pub use transition::{AnimatedValue, ease_cubic_in_out};
