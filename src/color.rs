use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Fixed series colours
// ---------------------------------------------------------------------------

pub const PRICE_HIST: Color32 = Color32::from_rgb(0x00, 0x78, 0xAA);
pub const ROOMS_SCATTER: Color32 = Color32::from_rgb(0x00, 0xC8, 0x53);
pub const TAX_SCATTER: Color32 = Color32::from_rgb(0xF5, 0x7F, 0x17);
pub const PTRATIO_LINE: Color32 = Color32::from_rgb(0x8E, 0x44, 0xAD);
pub const PRICE_BOX: Color32 = Color32::from_rgb(0x00, 0xBF, 0xA6);
pub const ROOMS_BOX: Color32 = Color32::from_rgb(0xE9, 0x1E, 0x63);
pub const LSTAT_SCATTER: Color32 = Color32::from_rgb(0x2E, 0x86, 0xC1);
pub const CRIME_SCATTER: Color32 = Color32::from_rgb(0xE7, 0x4C, 0x3C);
pub const PAIR_SCATTER: Color32 = Color32::from_rgb(0x1F, 0x77, 0xB4);

/// Set the alpha of a colour, `alpha` in `[0, 1]`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let [r, g, b, _] = color.to_array();
    Color32::from_rgba_unmultiplied(r, g, b, (alpha.clamp(0.0, 1.0) * 255.0) as u8)
}

// ---------------------------------------------------------------------------
// Continuous colour ramps
// ---------------------------------------------------------------------------

/// Yellow → green → blue, used by the correlation heatmap.
const YL_GN_BU: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xd9),
    (0xed, 0xf8, 0xb1),
    (0xc7, 0xe9, 0xb4),
    (0x7f, 0xcd, 0xbb),
    (0x41, 0xb6, 0xc4),
    (0x1d, 0x91, 0xc0),
    (0x22, 0x5e, 0xa8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1d, 0x58),
];

const VIRIDIS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x47, 0x2d, 0x7b),
    (0x3b, 0x52, 0x8b),
    (0x2c, 0x72, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x28, 0xae, 0x80),
    (0x5e, 0xc9, 0x62),
    (0xad, 0xdc, 0x30),
    (0xfd, 0xe7, 0x25),
];

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Sample a piecewise-linear ramp at `t` in `[0, 1]`, mixing in linear RGB.
fn sample(stops: &[(u8, u8, u8)], t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (stops.len() - 1) as f32;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - idx as f32;

    let mixed = linear(stops[idx]).mix(linear(stops[idx + 1]), frac);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Heatmap colour for a correlation in `[-1, 1]`.
pub fn heat_color(correlation: f64) -> Color32 {
    sample(&YL_GN_BU, ((correlation + 1.0) / 2.0) as f32)
}

/// Text colour that stays readable on top of `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// `n` colours evenly spaced along the viridis ramp.
pub fn viridis_palette(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![sample(&VIRIDIS, 0.5)],
        _ => (0..n)
            .map(|i| sample(&VIRIDIS, i as f32 / (n - 1) as f32))
            .collect(),
    }
}
