pub mod labels;
pub mod margins;
pub mod primitives;
pub mod reconcile;
pub mod row_layout;
pub mod scale;
pub mod scale_engine;
pub mod selection;
pub mod types;

pub use labels::{LabelPlacement, TextAnchor};
pub use margins::{MarginModel, MarginStrategy, Margins, PaddingContributions, compute_margins};
pub use reconcile::{JoinOp, JoinPlan, reconcile};
pub use row_layout::{
    PaneLayout, RowGeometry, RowLayoutParams, bar_origin, bar_width, layout_rows, row_height,
    row_transform,
};
pub use scale::LinearScale;
pub use scale_engine::{ScaleEngine, build_scale, derive_domain, root_position};
pub use selection::{FilterSet, NoFilter, RowSelection, classify, is_selected};
pub use types::{DataRecord, Pane, Side, Viewport};
