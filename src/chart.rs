use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb, named};

use crate::data::aggregate::{AggregationResult, GroupColumn};

/// Plot background of every chart.
pub const BACKGROUND: Color32 = Color32::from_rgb(0xcc, 0xff, 0xe6);

// ---------------------------------------------------------------------------
// Named colours used by the fixed palettes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    White,
    Blue,
    Black,
    Red,
    Brown,
    Green,
    Yellow,
}

impl NamedColor {
    pub fn color32(self) -> Color32 {
        let rgb: Srgb<u8> = match self {
            NamedColor::White => named::WHITE,
            NamedColor::Blue => named::BLUE,
            NamedColor::Black => named::BLACK,
            NamedColor::Red => named::RED,
            NamedColor::Brown => named::BROWN,
            NamedColor::Green => named::GREEN,
            NamedColor::Yellow => named::YELLOW,
        };
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

const VENUS_CYCLE_COLORS: [NamedColor; 4] = [
    NamedColor::White,
    NamedColor::Blue,
    NamedColor::Black,
    NamedColor::Red,
];

const ZODIAC_COLORS: [NamedColor; 4] = [
    NamedColor::Red,
    NamedColor::Brown,
    NamedColor::Green,
    NamedColor::Blue,
];

const ELEMENT_COLORS: [NamedColor; 4] = [
    NamedColor::Red,
    NamedColor::Brown,
    NamedColor::Yellow,
    NamedColor::Blue,
];

const MODALITY_COLORS: [NamedColor; 3] = [NamedColor::Red, NamedColor::Blue, NamedColor::White];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ChartConfig: category order + colour lookup
// ---------------------------------------------------------------------------

/// Fixed category order and colours of one grouping column.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    entries: Vec<(String, Color32)>,
}

impl ChartConfig {
    /// The palette of a grouping column. Palettes shorter than the category
    /// list repeat from the start.
    pub fn for_column(column: GroupColumn) -> Self {
        let cycle: &[NamedColor] = match column {
            GroupColumn::VenusInterval | GroupColumn::VenusColor => &VENUS_CYCLE_COLORS,
            GroupColumn::Sign(_) => &ZODIAC_COLORS,
            GroupColumn::Element(_) => &ELEMENT_COLORS,
            GroupColumn::Modality(_) => &MODALITY_COLORS,
        };
        let entries = column
            .category_order()
            .into_iter()
            .zip(cycle.iter().cycle())
            .map(|(category, named)| (category, named.color32()))
            .collect();
        ChartConfig { entries }
    }

    /// Categories in display order.
    pub fn category_order(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn color_for(&self, category: &str) -> Option<Color32> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| *color)
    }

    /// Colour every bucket of `result`. Categories without a fixed colour get
    /// distinct generated hues.
    pub fn colors(&self, result: &AggregationResult) -> Vec<Color32> {
        let unlisted = result
            .buckets
            .iter()
            .filter(|b| self.color_for(&b.category).is_none())
            .count();
        let mut generated = generate_palette(unlisted).into_iter();
        result
            .buckets
            .iter()
            .map(|b| {
                self.color_for(&b.category)
                    .or_else(|| generated.next())
                    .unwrap_or(Color32::GRAY)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::Bucket;
    use crate::data::model::CelestialBody;

    fn names(config: &ChartConfig) -> Vec<NamedColor> {
        let all = [
            NamedColor::White,
            NamedColor::Blue,
            NamedColor::Black,
            NamedColor::Red,
            NamedColor::Brown,
            NamedColor::Green,
            NamedColor::Yellow,
        ];
        config
            .category_order()
            .iter()
            .map(|c| {
                let color = config.color_for(c).expect("listed");
                *all.iter().find(|n| n.color32() == color).expect("named")
            })
            .collect()
    }

    #[test]
    fn venus_colors_cycle_five_times() {
        let config = ChartConfig::for_column(GroupColumn::VenusInterval);
        let expected: Vec<NamedColor> = VENUS_CYCLE_COLORS.repeat(5);
        assert_eq!(names(&config), expected);
        assert_eq!(config.category_order()[3], "Red_3");
        assert_eq!(config.color_for("Red_3"), Some(NamedColor::Red.color32()));
        assert_eq!(config.color_for("Blue_1"), Some(NamedColor::Blue.color32()));
    }

    #[test]
    fn zodiac_colors_cycle_three_times() {
        let config = ChartConfig::for_column(GroupColumn::Sign(CelestialBody::Moon));
        assert_eq!(names(&config), ZODIAC_COLORS.repeat(3));
        assert_eq!(config.category_order()[0], "ARIES");
        assert_eq!(config.category_order()[11], "PISCES");
    }

    #[test]
    fn element_and_modality_colors() {
        let element = ChartConfig::for_column(GroupColumn::Element(CelestialBody::Sun));
        assert_eq!(element.color_for("fire"), Some(NamedColor::Red.color32()));
        assert_eq!(element.color_for("earth"), Some(NamedColor::Brown.color32()));
        assert_eq!(element.color_for("air"), Some(NamedColor::Yellow.color32()));
        assert_eq!(element.color_for("water"), Some(NamedColor::Blue.color32()));

        let modality = ChartConfig::for_column(GroupColumn::Modality(CelestialBody::Sun));
        assert_eq!(modality.color_for("cardinal"), Some(NamedColor::Red.color32()));
        assert_eq!(modality.color_for("fix"), Some(NamedColor::Blue.color32()));
        assert_eq!(modality.color_for("mutable"), Some(NamedColor::White.color32()));
    }

    #[test]
    fn venus_color_pie_maps_each_color_to_itself() {
        let config = ChartConfig::for_column(GroupColumn::VenusColor);
        assert_eq!(config.color_for("Black"), Some(NamedColor::Black.color32()));
        assert_eq!(config.color_for("White"), Some(NamedColor::White.color32()));
    }

    #[test]
    fn unlisted_categories_get_generated_colors() {
        let config = ChartConfig::for_column(GroupColumn::VenusColor);
        let result = AggregationResult {
            buckets: vec![
                Bucket { category: "Red".into(), count: 2 },
                Bucket { category: "Green".into(), count: 1 },
            ],
            unclassified: 0,
        };
        let colors = config.colors(&result);
        assert_eq!(colors[0], NamedColor::Red.color32());
        assert_eq!(colors[1], generate_palette(1)[0]);
    }

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| b != a));
        }
        assert!(generate_palette(0).is_empty());
    }
}
