use std::collections::BTreeMap;

use tracing::trace;

use crate::render::Color;

/// Default series palette, cycled when a dataset outgrows it.
pub const DEFAULT_PALETTE: [Color; 11] = [
    Color::from_rgb8(0x00, 0x49, 0xB4),
    Color::from_rgb8(0xC9, 0x0B, 0x11),
    Color::from_rgb8(0x43, 0x7C, 0x17),
    Color::from_rgb8(0xAF, 0xC7, 0xC7),
    Color::from_rgb8(0xE9, 0xAB, 0x17),
    Color::from_rgb8(0x7F, 0x52, 0x5D),
    Color::from_rgb8(0xF6, 0x35, 0x8A),
    Color::from_rgb8(0x52, 0xD0, 0x17),
    Color::from_rgb8(0xFF, 0xFC, 0x17),
    Color::from_rgb8(0xF7, 0x65, 0x41),
    Color::from_rgb8(0xF6, 0x22, 0x17),
];

/// Color used when a chart has no per-series assignment (single-series bars).
pub const DEFAULT_SERIES_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);

/// Color for the `index`-th entry of the cycled default palette.
#[must_use]
pub fn palette_color(index: usize) -> Color {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

/// Index-addressed color table with session-scoped overrides.
///
/// The table starts as the default palette and is extended on demand, so the
/// color of index `i` only depends on `i` and on overrides, never on the order
/// of lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssigner {
    table: Vec<Color>,
    overrides: BTreeMap<usize, Color>,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAssigner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: DEFAULT_PALETTE.to_vec(),
            overrides: BTreeMap::new(),
        }
    }

    /// Returns the color for series `index`, growing the table if needed.
    pub fn color_for(&mut self, index: usize) -> Color {
        self.ensure_len(index + 1);
        self.overrides
            .get(&index)
            .copied()
            .unwrap_or(self.table[index])
    }

    /// Read-only lookup that does not grow the table.
    #[must_use]
    pub fn peek(&self, index: usize) -> Color {
        self.overrides
            .get(&index)
            .copied()
            .or_else(|| self.table.get(index).copied())
            .unwrap_or_else(|| palette_color(index))
    }

    pub fn set_override(&mut self, index: usize, color: Color) {
        self.ensure_len(index + 1);
        trace!(index, color = %color, "set series color override");
        self.overrides.insert(index, color);
    }

    /// Drops a user override, returning the previous value.
    pub fn clear_override(&mut self, index: usize) -> Option<Color> {
        self.overrides.remove(&index)
    }

    #[must_use]
    pub fn override_for(&self, index: usize) -> Option<Color> {
        self.overrides.get(&index).copied()
    }

    /// Effective colors for every index currently in the table.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        (0..self.table.len()).map(|index| self.peek(index)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn ensure_len(&mut self, len: usize) {
        while self.table.len() < len {
            let next = palette_color(self.table.len());
            self.table.push(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_tokens_match_hex_values() {
        let tokens: Vec<String> = DEFAULT_PALETTE.iter().map(|color| color.to_hex()).collect();
        assert_eq!(tokens[0], "#0049B4");
        assert_eq!(tokens[10], "#F62217");
    }

    #[test]
    fn table_grows_cyclically() {
        let mut colors = ColorAssigner::new();
        assert_eq!(colors.color_for(11), DEFAULT_PALETTE[0]);
        assert_eq!(colors.color_for(13), DEFAULT_PALETTE[2]);
        assert_eq!(colors.len(), 14);
    }

    #[test]
    fn override_survives_growth_and_can_be_cleared() {
        let mut colors = ColorAssigner::new();
        let custom = Color::rgb(0.1, 0.2, 0.3);
        colors.set_override(2, custom);
        let _ = colors.color_for(30);
        assert_eq!(colors.color_for(2), custom);
        assert_eq!(colors.clear_override(2), Some(custom));
        assert_eq!(colors.color_for(2), DEFAULT_PALETTE[2]);
    }
}
