use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

use crate::data::marker::CategoricalMarker;

// ---------------------------------------------------------------------------
// Fixed palettes
// ---------------------------------------------------------------------------

/// Qualitative colour-blind safe palette used for categorical markers.
pub const SAFE_PALETTE: [Color32; 11] = [
    Color32::from_rgb(136, 204, 238),
    Color32::from_rgb(204, 102, 119),
    Color32::from_rgb(221, 204, 119),
    Color32::from_rgb(17, 119, 51),
    Color32::from_rgb(51, 34, 136),
    Color32::from_rgb(170, 68, 153),
    Color32::from_rgb(68, 170, 153),
    Color32::from_rgb(153, 153, 51),
    Color32::from_rgb(136, 34, 85),
    Color32::from_rgb(102, 17, 0),
    Color32::from_rgb(136, 136, 136),
];

/// Viridis colour stops, dark to light.
const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

/// Colour for categorical code `code`, cycling through [`SAFE_PALETTE`].
pub fn qualitative(code: usize) -> Color32 {
    SAFE_PALETTE[code % SAFE_PALETTE.len()]
}

// ---------------------------------------------------------------------------
// Continuous gradient
// ---------------------------------------------------------------------------

/// Piecewise-linear colour gradient, interpolated in linear RGB.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: Vec<LinSrgb>,
}

impl Gradient {
    pub fn viridis() -> Self {
        let stops = VIRIDIS
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        Gradient { stops }
    }

    /// Colour at position `t`, clamped to `[0, 1]`. NaN maps to the start.
    pub fn color_at(&self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) as f32 };
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let idx = (pos.floor() as usize).min(self.stops.len() - 2);
        let local = pos - idx as f32;

        let lin = self.stops[idx].mix(self.stops[idx + 1], local);
        let rgb: Srgb<f32> = Srgb::from_linear(lin);
        let rgb: Srgb<u8> = rgb.into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }
}

// ---------------------------------------------------------------------------
// Color mapping: categorical level → Color32
// ---------------------------------------------------------------------------

/// Maps the levels of a categorical marker to palette colours.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    pub column: String,
    /// `(label, colour)` sorted by label.
    entries: Vec<(String, Color32)>,
    /// Indexed by categorical code.
    by_code: Vec<Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for a categorical marker from its codes.
    pub fn new(marker: &CategoricalMarker) -> Self {
        let by_code: Vec<Color32> = (0..marker.n_levels()).map(qualitative).collect();
        let entries = marker
            .levels()
            .into_iter()
            .map(|(code, label)| (label.to_string(), by_code[code]))
            .collect();

        ColorMap {
            column: marker.column.clone(),
            entries,
            by_code,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a categorical code; missing values are grey.
    pub fn color_for(&self, code: Option<usize>) -> Color32 {
        code.and_then(|c| self.by_code.get(c).copied())
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) in lexical order.
    pub fn legend_entries(&self) -> &[(String, Color32)] {
        &self.entries
    }
}
