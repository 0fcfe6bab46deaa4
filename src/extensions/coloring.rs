use indexmap::IndexMap;

use crate::core::DataRecord;
use crate::render::Color;

/// The classic ten-hue categorical palette, as 8-bit RGB.
pub const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

/// Assigns a fill color to each rendered row.
pub trait ColorStrategy {
    fn color_for(&mut self, record: &DataRecord, index: usize) -> Color;
}

/// Ordinal palette keyed by record key.
///
/// Keys get palette slots in order of first appearance and keep them across
/// redraws, so a category does not change color when filtering reorders rows.
/// The assignment map holds one entry per distinct key ever colored; call
/// [`OrdinalPalette::reset`] when the data source switches to a new key space.
#[derive(Debug, Clone)]
pub struct OrdinalPalette {
    colors: Vec<Color>,
    assigned: IndexMap<String, usize>,
}

impl OrdinalPalette {
    #[must_use]
    pub fn new(colors: Vec<Color>) -> Self {
        Self {
            colors,
            assigned: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn assigned_len(&self) -> usize {
        self.assigned.len()
    }

    /// Forgets every key-to-slot assignment.
    pub fn reset(&mut self) {
        self.assigned.clear();
    }
}

impl Default for OrdinalPalette {
    fn default() -> Self {
        Self::new(
            CATEGORY10
                .iter()
                .map(|(r, g, b)| Color::from_rgb8(*r, *g, *b))
                .collect(),
        )
    }
}

impl ColorStrategy for OrdinalPalette {
    fn color_for(&mut self, record: &DataRecord, _index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::rgb(0.0, 0.0, 0.0);
        }
        let next = self.assigned.len();
        let slot = *self.assigned.entry(record.key.clone()).or_insert(next);
        self.colors[slot % self.colors.len()]
    }
}

/// Paints every row with the same color.
#[derive(Debug, Clone, Copy)]
pub struct SingleColor(pub Color);

impl ColorStrategy for SingleColor {
    fn color_for(&mut self, _record: &DataRecord, _index: usize) -> Color {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ColorStrategy, OrdinalPalette, SingleColor};
    use crate::core::DataRecord;
    use crate::render::Color;

    #[test]
    fn keys_keep_their_slot_across_calls() {
        let mut palette = OrdinalPalette::default();
        let a = DataRecord::new("a", 1.0);
        let b = DataRecord::new("b", 2.0);

        let first_a = palette.color_for(&a, 0);
        let first_b = palette.color_for(&b, 1);
        assert_ne!(first_a, first_b);

        assert_eq!(palette.color_for(&b, 0), first_b);
        assert_eq!(palette.color_for(&a, 1), first_a);
        assert_eq!(palette.assigned_len(), 2);
    }

    #[test]
    fn single_color_ignores_the_record() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let mut single = SingleColor(red);
        assert_eq!(single.color_for(&DataRecord::new("a", 1.0), 0), red);
        assert_eq!(single.color_for(&DataRecord::new("b", 2.0), 7), red);
    }

    #[test]
    fn reset_releases_assigned_slots() {
        let mut palette = OrdinalPalette::default();
        let first = palette.color_for(&DataRecord::new("a", 1.0), 0);
        palette.color_for(&DataRecord::new("b", 1.0), 1);
        assert_eq!(palette.assigned_len(), 2);

        palette.reset();
        assert_eq!(palette.assigned_len(), 0);
        assert_eq!(palette.color_for(&DataRecord::new("z", 1.0), 0), first);
    }
}
