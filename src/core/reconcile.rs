use std::ops::Range;

use serde::{Deserialize, Serialize};

/// One reconciliation step for a row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinOp {
    Create(usize),
    Update(usize),
    Remove(usize),
}

/// Disjoint index groups produced by joining a new record sequence against
/// the rows already rendered.
///
/// Rows are matched by position only: index `i` of the new sequence always
/// lands on rendered row `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPlan {
    pub to_create: Range<usize>,
    pub to_update: Range<usize>,
    pub to_remove: Range<usize>,
}

impl JoinPlan {
    /// Indices that hold a row once the plan is applied.
    #[must_use]
    pub fn present(&self) -> Range<usize> {
        0..self.to_create.end.max(self.to_update.end)
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }

    /// Tagged operations in application order: creates, removes, updates.
    pub fn ops(&self) -> impl Iterator<Item = JoinOp> + '_ {
        self.to_create
            .clone()
            .map(JoinOp::Create)
            .chain(self.to_remove.clone().map(JoinOp::Remove))
            .chain(self.to_update.clone().map(JoinOp::Update))
    }
}

#[must_use]
pub fn reconcile(rendered: usize, incoming: usize) -> JoinPlan {
    let kept = rendered.min(incoming);
    JoinPlan {
        to_create: kept..incoming,
        to_update: 0..kept,
        to_remove: kept..rendered,
    }
}
