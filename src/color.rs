use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::outcome_label;

/// Bar/pie colour of the "No Reciben" category.
pub const SALMON: Color32 = Color32::from_rgb(250, 128, 114);
/// Bar/pie colour of the "Reciben" category.
pub const SEAGREEN: Color32 = Color32::from_rgb(46, 139, 87);
/// Histogram bar colour.
pub const SKYBLUE: Color32 = Color32::from_rgb(135, 206, 235);

/// Colours of the two benefit categories, in label order.
pub const BENEFIT_COLORS: [Color32; 2] = [SALMON, SEAGREEN];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` soft, visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            // Start at teal so the two-category case reads like a Set2 pair.
            let hue = 160.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.62);
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
// Outcome value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct outcome values in view to distinct colours (scatter hue).
#[derive(Debug, Clone, Default)]
pub struct OutcomeColors {
    mapping: BTreeMap<i64, Color32>,
}

impl OutcomeColors {
    /// Build a map for the given outcome values (duplicates are ignored).
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        let mut mapping: BTreeMap<i64, Color32> =
            values.into_iter().map(|v| (v, Color32::GRAY)).collect();
        let palette = generate_palette(mapping.len());
        for (slot, c) in mapping.values_mut().zip(palette) {
            *slot = c;
        }
        OutcomeColors { mapping }
    }

    pub fn color_for(&self, value: i64) -> Color32 {
        self.mapping.get(&value).copied().unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour), sorted by outcome value.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(&v, &c)| (outcome_label(v), c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn outcome_colours_follow_sorted_values() {
        let colors = OutcomeColors::new([1, 0, 1]);
        let legend = colors.legend_entries();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].0, "No Reciben");
        assert_eq!(legend[1].0, "Reciben");
        assert_eq!(colors.color_for(0), legend[0].1);
        assert_eq!(colors.color_for(7), Color32::GRAY);
    }
}
