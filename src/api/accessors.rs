use std::fmt;
use std::sync::Arc;

use crate::core::DataRecord;

pub type ValueAccessor = Arc<dyn Fn(&DataRecord) -> f64 + Send + Sync>;
pub type TextAccessor = Arc<dyn Fn(&DataRecord) -> String + Send + Sync>;
/// Axis tick-label formatter.
pub type TickFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;
/// Predicate assigning a record to one pane of a paired chart.
pub type KeyFilter = Arc<dyn Fn(&DataRecord) -> bool + Send + Sync>;
/// External filter-toggle callback invoked on row clicks.
pub type ClickHandler = Box<dyn FnMut(&DataRecord)>;

/// Accessors read on every redraw.
#[derive(Clone)]
pub struct RowAccessors {
    pub value: ValueAccessor,
    /// Value-label text.
    pub label: TextAccessor,
    /// Tooltip and title-label text.
    pub title: TextAccessor,
    /// `None` keeps the precision-aware default formatting.
    pub tick_format: Option<TickFormatter>,
}

impl Default for RowAccessors {
    fn default() -> Self {
        Self {
            value: Arc::new(|record| record.value),
            label: Arc::new(|record| record.key.clone()),
            title: Arc::new(|record| format!("{}: {}", record.key, record.value)),
            tick_format: None,
        }
    }
}

impl fmt::Debug for RowAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAccessors").finish_non_exhaustive()
    }
}
