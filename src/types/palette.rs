//! Ordered palettes used to constrain grid colours.

use serde::{Deserialize, Serialize};

use super::Colour;

/// Smallest palette an edit may leave behind.
pub const MIN_PALETTE_LEN: usize = 2;

/// An ordered list of colours.
///
/// Order is significant: when two entries are equally close to a sampled
/// colour, the earlier one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colours: Vec<Colour>,
}

/// Builtin palettes: (name, colours).
const PRESETS: &[(&str, &[&str])] = &[
    (
        "earth",
        &[
            "#f4ecd8", "#d9b382", "#a0522d", "#6b3e26", "#3b2a1a", "#7a8450", "#c2a878",
            "#1f1a17",
        ],
    ),
    ("mono", &["#ffffff", "#c0c0c0", "#808080", "#404040", "#000000"]),
    (
        "primary",
        &["#ffffff", "#000000", "#d62828", "#f7c600", "#1d4ed8", "#2a9d3f"],
    ),
    (
        "pastel",
        &["#fbf8f3", "#f7c5cc", "#f9dfb0", "#c8e6c9", "#b3d4f5", "#d7c4ec"],
    ),
    (
        "kilim",
        &[
            "#f2e8d5", "#b22222", "#7b1e1e", "#e0a526", "#2f4f6f", "#1b1b1b", "#4f7942",
        ],
    ),
];

impl Palette {
    /// Create a palette from colours, keeping their order.
    pub fn new(colours: Vec<Colour>) -> Self {
        Self { colours }
    }

    /// Parse a list of hex strings, skipping any that do not parse.
    pub fn from_hex_list<S: AsRef<str>>(entries: &[S]) -> Self {
        Self::new(
            entries
                .iter()
                .filter_map(|s| Colour::parse_hex(s.as_ref()))
                .collect(),
        )
    }

    /// Look up a builtin palette by name.
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|&(_, hexes)| Self::from_hex_list(hexes))
    }

    /// Names of all builtin palettes.
    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    /// The palette used when nothing else is configured.
    pub fn default_palette() -> Self {
        Self::preset("earth").unwrap_or_else(|| Self::new(vec![Colour::BLACK, Colour::WHITE]))
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }

    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Append a colour.
    pub fn push(&mut self, colour: Colour) {
        self.colours.push(colour);
    }

    /// Remove the colour at `index`.
    ///
    /// Rejected (returns `None`, palette unchanged) when the index is out of
    /// range or the palette would drop below [`MIN_PALETTE_LEN`].
    pub fn remove(&mut self, index: usize) -> Option<Colour> {
        if self.colours.len() <= MIN_PALETTE_LEN || index >= self.colours.len() {
            return None;
        }
        Some(self.colours.remove(index))
    }

    /// Replace the colour at `index`. Returns false if out of range.
    pub fn set(&mut self, index: usize, colour: Colour) -> bool {
        match self.colours.get_mut(index) {
            Some(slot) => {
                *slot = colour;
                true
            }
            None => false,
        }
    }

    /// Drop repeated colours, keeping the first occurrence of each.
    pub fn dedup(self) -> Self {
        let mut seen = std::collections::HashSet::new();
        Self::new(
            self.colours
                .into_iter()
                .filter(|c| seen.insert(c.hex()))
                .collect(),
        )
    }

    /// Hex strings in palette order.
    pub fn to_hex_list(&self) -> Vec<String> {
        self.colours.iter().map(|c| c.hex()).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_palette()
    }
}

impl FromIterator<Colour> for Palette {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_list_skips_invalid() {
        let palette = Palette::from_hex_list(&["#ff0000", "nope", "00FF00", "#123"]);
        assert_eq!(
            palette.colours(),
            &[Colour::rgb(255, 0, 0), Colour::rgb(0, 255, 0)]
        );
    }

    #[test]
    fn test_presets_parse_fully() {
        for (name, hexes) in PRESETS {
            let palette = Palette::preset(name).unwrap();
            assert_eq!(palette.len(), hexes.len(), "preset {} has a bad entry", name);
            assert!(palette.len() >= MIN_PALETTE_LEN);
        }
        assert!(Palette::preset("MONO").is_some());
        assert!(Palette::preset("missing").is_none());
    }

    #[test]
    fn test_remove_rejected_below_minimum() {
        let mut palette = Palette::new(vec![Colour::BLACK, Colour::WHITE]);
        assert_eq!(palette.remove(0), None);
        assert_eq!(palette.len(), 2);

        palette.push(Colour::rgb(1, 2, 3));
        assert_eq!(palette.remove(0), Some(Colour::BLACK));
        assert_eq!(palette.colours(), &[Colour::WHITE, Colour::rgb(1, 2, 3)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut palette = Palette::preset("mono").unwrap();
        let before = palette.clone();
        assert_eq!(palette.remove(99), None);
        assert_eq!(palette, before);
    }

    #[test]
    fn test_set() {
        let mut palette = Palette::new(vec![Colour::BLACK, Colour::WHITE]);
        assert!(palette.set(1, Colour::rgb(9, 9, 9)));
        assert!(!palette.set(2, Colour::rgb(9, 9, 9)));
        assert_eq!(palette.get(1), Some(Colour::rgb(9, 9, 9)));
    }

    #[test]
    fn test_dedup_keeps_first_order() {
        let palette = Palette::new(vec![
            Colour::WHITE,
            Colour::BLACK,
            Colour::WHITE,
            Colour::rgb(1, 1, 1),
            Colour::BLACK,
        ])
        .dedup();
        assert_eq!(
            palette.colours(),
            &[Colour::WHITE, Colour::BLACK, Colour::rgb(1, 1, 1)]
        );
    }

    #[test]
    fn test_serde_is_hex_list() {
        let palette = Palette::new(vec![Colour::BLACK, Colour::WHITE]);
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, r##"["#000000","#ffffff"]"##);
    }
}
