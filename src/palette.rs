// SPDX-License-Identifier: PMPL-1.0-or-later
//! Palette and theme generation
//!
//! Scales are generated in HSL with a fixed lightness ramp, so output is
//! deterministic for a given hue and saturation. Every generated theme can be
//! self-checked against AA with [`validate_theme`].

use crate::analyzers::contrast::contrast_issue;
use crate::color::Color;
use crate::error::{ContrastError, Result};
use crate::issues::ComplianceReport;
use crate::rules::{check_contrast, WcagLevel};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Lightness of each generated step, lightest first
const LIGHTNESS_STEPS: [f64; 9] = [0.95, 0.85, 0.75, 0.65, 0.55, 0.45, 0.35, 0.25, 0.15];

/// Tailwind-style keys; `"500"` lands on the lightness-0.45 step
const SCALE_KEYS: [&str; 9] = ["50", "100", "200", "300", "400", "500", "600", "700", "800"];

/// Ratio both mid-tone pairs must clear for an AAA theme grade
const AAA_RATIO: f64 = 7.0;

const NEUTRAL_RAMP: [(&str, Color); 12] = [
    ("0", Color::rgb(0xff, 0xff, 0xff)),
    ("50", Color::rgb(0xfa, 0xfa, 0xfa)),
    ("100", Color::rgb(0xf5, 0xf5, 0xf5)),
    ("200", Color::rgb(0xe5, 0xe5, 0xe5)),
    ("300", Color::rgb(0xd4, 0xd4, 0xd4)),
    ("400", Color::rgb(0xa3, 0xa3, 0xa3)),
    ("500", Color::rgb(0x73, 0x73, 0x73)),
    ("600", Color::rgb(0x52, 0x52, 0x52)),
    ("700", Color::rgb(0x40, 0x40, 0x40)),
    ("800", Color::rgb(0x26, 0x26, 0x26)),
    ("900", Color::rgb(0x17, 0x17, 0x17)),
    ("950", Color::rgb(0x0a, 0x0a, 0x0a)),
];

/// Semantic groups and their hues; all share one saturation
const SEMANTIC_HUES: [(&str, f64); 4] = [("success", 120.0), ("warning", 45.0), ("error", 0.0), ("info", 200.0)];
const SEMANTIC_SATURATION: f64 = 0.7;

/// Secondary scale saturation relative to the primary
const SECONDARY_SATURATION_FACTOR: f64 = 0.8;

/// A named brand profile that seeds theme generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Personality {
    pub name: &'static str,
    pub hue: f64,
    pub saturation: f64,
    pub description: &'static str,
}

pub const PERSONALITIES: [Personality; 5] = [
    Personality {
        name: "innovative",
        hue: 220.0,
        saturation: 0.75,
        description: "forward-thinking, creative, modern",
    },
    Personality {
        name: "reliable",
        hue: 200.0,
        saturation: 0.65,
        description: "trustworthy, professional, consistent",
    },
    Personality {
        name: "bold",
        hue: 0.0,
        saturation: 0.8,
        description: "confident, impactful, energetic",
    },
    Personality {
        name: "minimal",
        hue: 180.0,
        saturation: 0.5,
        description: "clean, focused, elegant",
    },
    Personality {
        name: "creative",
        hue: 280.0,
        saturation: 0.7,
        description: "artistic, imaginative, unique",
    },
];

/// Look up a personality by name (case-insensitive)
pub fn personality(name: &str) -> Result<&'static Personality> {
    PERSONALITIES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ContrastError::UnknownPersonality {
            name: name.to_string(),
            available: PERSONALITIES.iter().map(|p| p.name).collect::<Vec<_>>().join(", "),
        })
}

/// Ordered shade-key to color mapping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorScale {
    steps: Vec<(String, Color)>,
}

impl ColorScale {
    pub fn get(&self, key: &str) -> Option<Color> {
        self.steps.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.steps.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `{"100": "#rrggbb", ...}`
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .steps
            .iter()
            .map(|(k, c)| (k.clone(), Value::String(c.to_hex())))
            .collect();
        Value::Object(map)
    }
}

impl<'a> FromIterator<(&'a str, Color)> for ColorScale {
    fn from_iter<I: IntoIterator<Item = (&'a str, Color)>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().map(|(k, c)| (k.to_string(), c)).collect(),
        }
    }
}

/// Hue on the opposite side of the color wheel
pub fn complementary_hue(hue: f64) -> f64 {
    (hue + 180.0).rem_euclid(360.0)
}

/// 9-step scale keyed 50..800, from lightness 0.95 down to 0.15
pub fn generate_scale(hue: f64, saturation: f64) -> ColorScale {
    SCALE_KEYS
        .iter()
        .zip(LIGHTNESS_STEPS)
        .map(|(key, l)| (*key, Color::from_hsl(hue, saturation, l)))
        .collect()
}

/// Fixed grey ramp keyed 0, 50, 100..900, 950
pub fn neutral_scale() -> ColorScale {
    NEUTRAL_RAMP.iter().copied().collect()
}

/// Generated color theme
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub personality: Personality,
    pub primary: ColorScale,
    pub secondary: ColorScale,
    pub neutral: ColorScale,
    /// Semantic groups in success, warning, error, info order
    pub semantic: Vec<(String, ColorScale)>,
}

impl Theme {
    pub fn description(&self) -> String {
        format!(
            "Professional theme with a {} personality",
            self.personality.description
        )
    }

    fn scale(&self, name: &str) -> Option<&ColorScale> {
        match name {
            "primary" => Some(&self.primary),
            "secondary" => Some(&self.secondary),
            "neutral" => Some(&self.neutral),
            _ => None,
        }
    }

    /// Token document with the same shape the token analyzers read
    pub fn to_token_document(&self) -> Value {
        let semantic: Map<String, Value> = self
            .semantic
            .iter()
            .map(|(name, scale)| (name.clone(), scale.to_json()))
            .collect();

        json!({
            "name": self.name,
            "personality": self.personality.name,
            "description": self.description(),
            "colors": {
                "primary": self.primary.to_json(),
                "secondary": self.secondary.to_json(),
                "neutral": self.neutral.to_json(),
                "semantic": semantic,
            }
        })
    }
}

/// Build a theme from a personality profile
///
/// The name defaults to `"<Profile> Theme"`.
pub fn generate_theme(profile: &Personality, name: Option<&str>) -> Theme {
    let name = match name {
        Some(name) => name.to_string(),
        None => format!("{} Theme", capitalize(profile.name)),
    };

    let secondary_hue = complementary_hue(profile.hue);
    debug!(
        personality = profile.name,
        hue = profile.hue,
        secondary_hue,
        "Generating theme"
    );

    Theme {
        name,
        personality: *profile,
        primary: generate_scale(profile.hue, profile.saturation),
        secondary: generate_scale(secondary_hue, profile.saturation * SECONDARY_SATURATION_FACTOR),
        neutral: neutral_scale(),
        semantic: SEMANTIC_HUES
            .iter()
            .map(|(group, hue)| (group.to_string(), generate_scale(*hue, SEMANTIC_SATURATION)))
            .collect(),
    }
}

/// Check the theme's representative pairs at AA, appending a SERIOUS issue per failure.
///
/// Returns the theme grade: AAA when every pair passes and the mid-tone clears
/// 7:1 on both white and near-black, AA otherwise.
pub fn validate_theme(theme: &Theme, report: &mut ComplianceReport) -> WcagLevel {
    let pairs = [
        ("primary", "500", "neutral", "0"),
        ("primary", "500", "neutral", "950"),
        ("neutral", "900", "neutral", "0"),
        ("neutral", "0", "neutral", "950"),
    ];

    let mut failures = 0;
    let mut mid_tone_aaa = true;

    for (idx, (fg_scale, fg_key, bg_scale, bg_key)) in pairs.into_iter().enumerate() {
        let (Some(fg), Some(bg)) = (
            theme.scale(fg_scale).and_then(|s| s.get(fg_key)),
            theme.scale(bg_scale).and_then(|s| s.get(bg_key)),
        ) else {
            continue;
        };

        let result = check_contrast(fg, bg, WcagLevel::AA, false);
        if idx < 2 && result.ratio < AAA_RATIO {
            mid_tone_aaa = false;
        }
        if !result.passes {
            failures += 1;
            let fg_path = format!("colors.{}.{}", fg_scale, fg_key);
            let bg_path = format!("colors.{}.{}", bg_scale, bg_key);
            report.add_issue(
                contrast_issue(
                    &format!("{} ({})", fg_path, fg),
                    &format!("{} ({})", bg_path, bg),
                    &result,
                )
                .with_location(format!("{}#{}", theme.name, fg_path)),
            );
        }
    }

    let grade = if failures == 0 && mid_tone_aaa {
        WcagLevel::AAA
    } else {
        WcagLevel::AA
    };
    debug!(theme = %theme.name, failures, grade = %grade, "Theme self-check");
    grade
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
