//! Capability strategies injected into charts at construction.
//!
//! Coloring and capping are owned by the host; the row pipeline only calls
//! through these narrow interfaces.

pub mod capping;
pub mod coloring;

pub use capping::{CapStrategy, NoCap, OTHERS_LABEL, TopN};
pub use coloring::{CATEGORY10, ColorStrategy, OrdinalPalette, SingleColor};
