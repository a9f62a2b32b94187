use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Bar colour of the summed histogram.
pub const SUMMED_COLOR: Color32 = Color32::from_rgb(0xd6, 0x27, 0x28);

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
            // hues stay inside [30, 330) to keep clear of the summed red
            let hue = 30.0 + (i as f32 / n as f32) * 300.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
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
// Dataset colours: file name → Color32
// ---------------------------------------------------------------------------

/// Assigns each dataset a distinct bar colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self {
            mapping: BTreeMap::new(),
            default_color: Color32::from_rgb(0x1f, 0x77, 0xb4),
        }
    }
}

impl ColorMap {
    /// Build a colour map from dataset names (in display order).
    pub fn new<'a>(names: impl ExactSizeIterator<Item = &'a str>) -> Self {
        let palette = generate_palette(names.len());
        let mapping = names
            .zip(palette)
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        ColorMap {
            mapping,
            ..Self::default()
        }
    }

    /// Look up the colour for a dataset.
    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping
            .get(name)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for (i, a) in p.iter().enumerate() {
            assert!(p[i + 1..].iter().all(|b| b != a));
            assert_ne!(*a, SUMMED_COLOR);
        }
    }

    #[test]
    fn unknown_dataset_uses_default() {
        let names = ["a.txt", "b.txt"];
        let map = ColorMap::new(names.iter().copied());
        assert_ne!(map.color_for("a.txt"), map.color_for("b.txt"));
        assert_eq!(map.color_for("zzz"), ColorMap::default().color_for("zzz"));
    }
}
