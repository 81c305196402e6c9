// SPDX-License-Identifier: PMPL-1.0-or-later
//! Relative luminance and contrast ratio per WCAG 2.x
//!
//! - Luminance: <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
//! - Contrast ratio: `(L_lighter + 0.05) / (L_darker + 0.05)`, range 1.0..=21.0

use crate::color::Color;

/// sRGB linearization knee (WCAG 2.0 wording of the sRGB transfer function)
pub const LINEAR_THRESHOLD: f64 = 0.03928;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

/// Lowest possible contrast ratio (identical colors)
pub const MIN_RATIO: f64 = 1.0;
/// Highest possible contrast ratio (black against white)
pub const MAX_RATIO: f64 = 21.0;

fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= LINEAR_THRESHOLD {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color, in [0, 1]
pub fn relative_luminance(color: Color) -> f64 {
    RED_WEIGHT * linearize(color.r)
        + GREEN_WEIGHT * linearize(color.g)
        + BLUE_WEIGHT * linearize(color.b)
}

/// Contrast ratio between two colors.
/// Symmetric in its arguments; always within [`MIN_RATIO`, `MAX_RATIO`].
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    ((lighter + 0.05) / (darker + 0.05)).clamp(MIN_RATIO, MAX_RATIO)
}
