//! row-chart-rs: incremental row-chart layout and render engine.
//!
//! A row chart draws one horizontal bar per record against a single linear
//! axis. The paired variant splits one record set into two independently
//! scaled panes mirrored around a shared center axis. Layout math lives in
//! [`core`], the retained scene and redraw pipeline in [`api`], and drawing
//! is delegated to a [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{PairedRowChart, RowChart, RowChartConfig};
pub use error::{ChartError, ChartResult};
