use thiserror::Error;

use crate::core::Pane;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("paired row chart requires a {pane:?} key filter before rendering")]
    MissingKeyFilter { pane: Pane },

    #[error("row index {index} out of range for {len} rendered rows")]
    RowIndexOutOfRange { index: usize, len: usize },
}
