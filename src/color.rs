use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Scenario;

// ---------------------------------------------------------------------------
// Scenario colors – fixed ordinal mapping
// ---------------------------------------------------------------------------

/// The conventional SSP colors: blue / green / orange / red.
pub fn scenario_color(scenario: Scenario) -> Color32 {
    match scenario {
        Scenario::Ssp126 => Color32::from_rgb(0x1f, 0x77, 0xb4),
        Scenario::Ssp245 => Color32::from_rgb(0x2c, 0xa0, 0x2c),
        Scenario::Ssp370 => Color32::from_rgb(0xff, 0x7f, 0x0e),
        Scenario::Ssp585 => Color32::from_rgb(0xd6, 0x27, 0x28),
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.6);
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
// Country palette: country name → Color32 for swatches and tooltips
// ---------------------------------------------------------------------------

/// Maps every country in the dataset to a distinct colour, used for the
/// side-panel swatches and the hover tooltip lines.
#[derive(Debug, Clone)]
pub struct CountryPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountryPalette {
    /// Build a palette for the given (sorted, unique) country list.
    pub fn new(countries: &[String]) -> Self {
        let palette = generate_palette(countries.len());
        let mapping: BTreeMap<String, Color32> = countries
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CountryPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a country.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct_and_sized() {
        let p = generate_palette(8);
        assert_eq!(p.len(), 8);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_country_falls_back_to_default() {
        let pal = CountryPalette::new(&["Norway".to_string()]);
        assert_eq!(pal.color_for("Atlantis"), Color32::GRAY);
        assert_ne!(pal.color_for("Norway"), Color32::GRAY);
    }
}
