use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One grouped category as delivered by the data source.
///
/// Records carry no stable identity: the rendered row for a record is chosen
/// by its position in the current sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub key: String,
    pub value: f64,
}

impl DataRecord {
    #[must_use]
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn from_decimal(key: impl Into<String>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            key: key.into(),
            value: decimal_to_f64(value, "record value")?,
        })
    }
}

/// Edge of a pane that holds the zero of its axis.
///
/// `Left` bars grow rightward from the pane's left edge. `Right` bars grow
/// leftward from the right edge, and labels mirror accordingly. In paired
/// mode the left pane is `Right`-sided and the right pane `Left`-sided, so
/// both grow outward from the shared center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Right)
    }

    #[must_use]
    pub const fn from_right_axis(use_right_y_axis: bool) -> Self {
        if use_right_y_axis {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Position of a sub-chart inside a paired row chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    Left,
    Right,
}

impl Pane {
    /// Axis orientation used by this pane so its bars grow away from the center.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Self::Left => Side::Right,
            Self::Right => Side::Left,
        }
    }
}
