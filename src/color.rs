use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use student_scores::{CategoryKey, CategoryValue, Dataset};

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
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the values of one category key to distinct colours.
///
/// Built from the whole dataset so a value keeps its colour whatever the
/// active score range.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub key: CategoryKey,
    mapping: BTreeMap<CategoryValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(dataset: &Dataset, key: CategoryKey) -> Self {
        let values: BTreeSet<CategoryValue> = dataset.iter().map(|r| key.value_of(r)).collect();
        let palette = generate_palette(values.len());
        let mapping = values.into_iter().zip(palette).collect();

        ColorMap {
            key,
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category value.
    pub fn color_for(&self, value: &CategoryValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
