use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// Representative color of one grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorSample {
    /// `(row, col)` of the cell.
    pub position: (u32, u32),
    pub rgb: [u8; 3],
    /// Lower-case `#rrggbb`.
    pub hex: String,
    /// Hue in degrees `[0, 360)`, saturation and lightness in percent.
    pub hsl: [u16; 3],
}

impl ColorSample {
    pub fn new(row: u32, col: u32, rgb: [u8; 3]) -> Self {
        Self {
            position: (row, col),
            rgb,
            hex: rgb_to_hex(rgb),
            hsl: rgb_to_hsl(rgb),
        }
    }
}

pub fn rgb_to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parses `#rrggbb` or `rrggbb`, either case.
pub fn parse_hex(s: &str) -> Result<[u8; 3]> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(AnalysisError::InvalidConfig(format!(
            "hex color must be 6 characters: {s:?}"
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|e| AnalysisError::InvalidConfig(format!("invalid hex {s:?}: {e}")))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Standard RGB -> HLS on channels normalized to `[0, 1]`, each component
/// truncated to an integer.
///
/// The float operations follow Python's `colorsys.rgb_to_hls` step for step;
/// reordering them moves boundary values by one after truncation.
pub fn rgb_to_hsl([r, g, b]: [u8; 3]) -> [u16; 3] {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let l = sum / 2.0;
    if min == max {
        return [0, 0, (l * 100.0) as u16];
    }

    let s = if l <= 0.5 {
        range / sum
    } else {
        range / (2.0 - max - min)
    };
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (h / 6.0).rem_euclid(1.0);

    let mut hue = (h * 360.0) as u16;
    // rem_euclid can round up to exactly 1.0
    if hue >= 360 {
        hue = 0;
    }
    [hue, (s * 100.0) as u16, (l * 100.0) as u16]
}
