use derive_more::{Deref, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Fewest distinct colors that keep every cyclic arrangement free of
/// equal neighbours. Two colors cannot color an odd-length cycle.
pub const MIN_DISTINCT_COLORS: usize = 3;

/// An opaque sRGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgb<u8>);

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Components scaled to `0.0..=1.0`, ready for a drawing context.
    pub fn to_unit(&self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.0.into_components() == other.0.into_components()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.into_components().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Error, Debug)]
#[error("Invalid color {value:?}: {source}")]
pub struct ColorParseError {
    value: String,
    #[source]
    source: FromHexError,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|source| ColorParseError {
                value: s.to_string(),
                source,
            })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Palette needs at least {MIN_DISTINCT_COLORS} distinct colors, got {0}")]
    TooFewColors(usize),
}

/// A fixed, validated set of colors the wheel slices are painted from.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct Palette(Vec<Color>);

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        let distinct = colors.iter().collect::<HashSet<_>>().len();
        if distinct < MIN_DISTINCT_COLORS {
            return Err(PaletteError::TooFewColors(distinct));
        }
        Ok(Self(colors))
    }

    /// Red, blue, yellow, orange, purple, green.
    pub fn primary() -> Self {
        Self(vec![
            Color::rgb(0xff, 0x00, 0x00),
            Color::rgb(0x00, 0x00, 0xff),
            Color::rgb(0xff, 0xff, 0x00),
            Color::rgb(0xff, 0xa5, 0x00),
            Color::rgb(0x80, 0x00, 0x80),
            Color::rgb(0x00, 0x80, 0x00),
        ])
    }

    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(vec![
            Color::rgb(0xff, 0xf4, 0x4d),
            Color::rgb(0xdd, 0xe4, 0x5a),
            Color::rgb(0x63, 0xb7, 0xe6),
            Color::rgb(0x55, 0x88, 0xc7),
            Color::rgb(0x94, 0x74, 0xb5),
            Color::rgb(0xed, 0x1b, 0x24),
            Color::rgb(0xf1, 0x59, 0x2a),
            Color::rgb(0x3a, 0xb5, 0x4a),
            Color::rgb(0x28, 0x38, 0x90),
        ])
    }
}

/// Builds `count` colors from `palette` so that no two neighbours on the
/// wheel match, including the last slice against the first.
///
/// The sequence grows from both ends: a candidate equal to the current head
/// or tail is skipped for the next palette color, even lengths take the new
/// color at the tail and odd lengths at the head. Every accepted color
/// therefore differs from both of its eventual neighbours.
pub fn generate_colors(palette: &Palette, count: usize) -> Vec<Color> {
    let mut sequence = VecDeque::new();
    let mut cursor = 0;

    while sequence.len() < count {
        let candidate = palette[cursor % palette.len()];
        cursor += 1;

        if sequence.front() == Some(&candidate) || sequence.back() == Some(&candidate) {
            continue;
        }

        if sequence.len() % 2 == 0 {
            sequence.push_back(candidate);
        } else {
            sequence.push_front(candidate);
        }
    }

    sequence.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_cyclic_neighbours(colors: &[Color]) {
        if colors.len() < 2 {
            return;
        }
        for (i, color) in colors.iter().enumerate() {
            let next = &colors[(i + 1) % colors.len()];
            assert_ne!(color, next, "neighbours of position {i} match in {colors:?}");
        }
    }

    #[test]
    fn test_sequences_have_requested_length_and_distinct_neighbours() {
        for palette in [Palette::default(), Palette::primary()] {
            for count in 0..=64 {
                let colors = generate_colors(&palette, count);
                assert_eq!(colors.len(), count);
                assert_no_cyclic_neighbours(&colors);
            }
        }
    }

    #[test]
    fn test_degenerate_counts() {
        let palette = Palette::default();
        assert!(generate_colors(&palette, 0).is_empty());

        let single = generate_colors(&palette, 1);
        assert_eq!(single.len(), 1);
        assert!(palette.contains(&single[0]));
    }

    #[test]
    fn test_five_over_primary_palette() {
        let colors = generate_colors(&Palette::primary(), 5);
        assert_eq!(colors.len(), 5);
        assert_ne!(colors.first(), colors.last());
        assert_no_cyclic_neighbours(&colors);
    }

    #[test]
    fn test_long_sequences_cycle_the_palette() {
        let palette = Palette::primary();
        let colors = generate_colors(&palette, 20);
        for color in palette.colors() {
            assert!(colors.contains(color), "{color} never used");
        }
    }

    #[test]
    fn test_palette_needs_three_distinct_colors() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let green = Color::rgb(0, 255, 0);

        assert_eq!(
            Palette::new(vec![red, blue, red, blue]),
            Err(PaletteError::TooFewColors(2))
        );
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::TooFewColors(0)));

        let palette = Palette::new(vec![red, red, blue, green]).unwrap();
        for count in 0..=16 {
            assert_no_cyclic_neighbours(&generate_colors(&palette, count));
        }
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color: Color = "#63B7E6".parse().unwrap();
        assert_eq!(color, Color::rgb(0x63, 0xb7, 0xe6));
        assert_eq!(color.to_string(), "#63b7e6");
        assert!("not-a-color".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_deserialization() {
        let colors: Vec<Color> = serde_json::from_str(r##"["#fff44d", "283890"]"##).unwrap();
        assert_eq!(
            colors,
            vec![Color::rgb(0xff, 0xf4, 0x4d), Color::rgb(0x28, 0x38, 0x90)]
        );
        assert!(serde_json::from_str::<Color>("\"#12\"").is_err());
    }

    #[test]
    fn test_unit_components() {
        let (r, g, b) = Color::rgb(255, 0, 51).to_unit();
        assert_eq!((r, g), (1.0, 0.0));
        assert!((b - 0.2).abs() < 1e-9);
    }
}
