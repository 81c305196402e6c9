// SPDX-License-Identifier: PMPL-1.0-or-later
//! Token structure analyzer - consistency rules for design-token documents
//!
//! Checks that a token document has the color categories, shades, typography,
//! spacing, breakpoints, radii and z-index layers a design system is expected
//! to declare, and that keys follow a consistent naming scheme. Shape errors
//! inside `colors` are left to the contrast analyzer, which owns the color walk.

use crate::analyzers::contrast::SEMANTIC_KEY;
use crate::analyzers::{join_path, Analyzer, AuditContext};
use crate::color::parse_hex;
use crate::config::Config;
use crate::contrast::contrast_ratio;
use crate::issues::{ComplianceReport, Issue, Severity};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const REQUIRED_CATEGORIES: &[&str] = &["primary", "secondary", "neutral"];
const REQUIRED_SHADES: &[&str] = &["100", "200", "300", "400", "500", "600", "700", "800"];
/// A scale must reach at least one of these ends
const SCALE_ENDS: &[&str] = &["50", "900"];
const REQUIRED_SEMANTIC: &[&str] = &["success", "warning", "error", "info"];
const REQUIRED_FONT_FAMILIES: &[&str] = &["sans", "serif", "mono"];
const REQUIRED_FONT_SIZES: &[&str] = &["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl"];
const REQUIRED_BREAKPOINTS: &[(&str, u32)] =
    &[("sm", 640), ("md", 768), ("lg", 1024), ("xl", 1280), ("2xl", 1536)];

/// 8-point grid, in px
const SPACING_GRID: &[u32] = &[0, 4, 8, 12, 16, 20, 24, 32, 40, 48, 64, 80, 96, 128, 160, 192, 256];

/// Border radius scale, in px
const RADIUS_SCALE: &[u32] = &[0, 2, 4, 6, 8, 12, 16, 24, 32];

/// Conventional z-index layers
const Z_INDEX_LAYERS: &[(&str, i64)] = &[
    ("hide", -1),
    ("auto", 0),
    ("base", 10),
    ("dock", 20),
    ("dropdown", 30),
    ("sticky", 40),
    ("banner", 50),
    ("overlay", 60),
    ("modal", 70),
    ("popover", 80),
    ("skiplink", 90),
    ("toast", 100),
    ("tooltip", 110),
];

/// Minimum contrast between the primary mid-tone and its dark variant
const PRIMARY_SHADE_RATIO: f64 = 3.0;

/// Structure analyzer for token documents
pub struct TokenStructureAnalyzer;

impl Analyzer for TokenStructureAnalyzer {
    fn name(&self) -> &str {
        "Token Structure Analyzer"
    }

    fn description(&self) -> &str {
        "Checks design tokens for required categories, scales and naming conventions"
    }

    fn analyze(&self, document: &Value, ctx: &AuditContext<'_>, report: &mut ComplianceReport) {
        let checker = StructureChecker { ctx, report };
        checker.run(document);
    }

    fn enabled(&self, config: &Config) -> bool {
        config.structure_checks
    }
}

struct StructureChecker<'a, 'r> {
    ctx: &'a AuditContext<'a>,
    report: &'r mut ComplianceReport,
}

impl StructureChecker<'_, '_> {
    fn run(mut self, document: &Value) {
        if let Some(Value::Object(colors)) = document.get("colors") {
            self.check_colors(colors);
        }
        if let Some(typography) = document.get("typography") {
            self.check_typography(typography);
        }
        if let Some(spacing) = document.get("spacing") {
            self.check_spacing(spacing);
        }
        if let Some(breakpoints) = document.get("breakpoints") {
            self.check_breakpoints(breakpoints);
        }
        if let Some(radius) = document.get("borderRadius") {
            self.check_border_radius(radius);
        }
        if let Some(z_index) = document.get("zIndex") {
            self.check_z_index(z_index);
        }
        if let Value::Object(root) = document {
            self.check_naming(root, "");
        }
    }

    /// Issue at `path`, with the line of `anchor` (the nearest declared key)
    fn issue(&self, rule_id: &str, severity: Severity, title: &str, path: &str, anchor: &str) -> Issue {
        Issue::new(rule_id, severity, title)
            .with_wcag_level(self.ctx.config.level)
            .with_location(self.ctx.location(path))
            .with_line(self.ctx.line_of_path(anchor))
    }

    fn unsupported(&mut self, path: &str, expected: &str, recommendation: &str) {
        self.report.add_issue(
            self.issue(
                "unsupported_structure",
                Severity::Serious,
                "Unsupported token structure",
                path,
                path,
            )
            .with_description(format!("`{}` must be {}", path, expected))
            .with_recommendation(recommendation),
        );
    }

    fn check_colors(&mut self, colors: &Map<String, Value>) {
        for category in REQUIRED_CATEGORIES {
            if !colors.contains_key(*category) {
                let path = format!("colors.{}", category);
                self.report.add_issue(
                    self.issue(
                        "color_category_missing",
                        Severity::Serious,
                        "Missing required color category",
                        &path,
                        "colors",
                    )
                    .with_description(format!("Missing required color category: {}", category))
                    .with_recommendation(format!("Add a {} color scale with shades 50-800 or 100-900", category)),
                );
            }
        }

        for (name, value) in colors {
            let path = join_path("colors", name);
            if name == SEMANTIC_KEY {
                if let Value::Object(groups) = value {
                    self.check_semantic(groups, &path);
                }
                continue;
            }
            if let Value::Object(scale) = value {
                if REQUIRED_CATEGORIES.contains(&name.as_str()) {
                    self.check_shades(scale, &path);
                }
                if name == "primary" {
                    self.check_primary_contrast(scale, &path);
                }
                self.check_shorthand(scale, &path);
            }
        }
    }

    fn check_shades(&mut self, scale: &Map<String, Value>, path: &str) {
        let mut missing: Vec<&str> = REQUIRED_SHADES
            .iter()
            .copied()
            .filter(|shade| !scale.contains_key(*shade))
            .collect();
        if !SCALE_ENDS.iter().any(|end| scale.contains_key(*end)) {
            missing.push("900");
        }

        if !missing.is_empty() {
            let list = missing.join(", ");
            self.report.add_issue(
                self.issue("color_shades_missing", Severity::Moderate, "Incomplete color scale", path, path)
                    .with_description(format!("Missing color shades: {}", list))
                    .with_recommendation(format!("Add missing shades: {}", list)),
            );
        }
    }

    /// The 500 and 700 shades must stay distinguishable as large text
    fn check_primary_contrast(&mut self, scale: &Map<String, Value>, path: &str) {
        let shade = |key: &str| scale.get(key).and_then(Value::as_str).and_then(|s| parse_hex(s).ok());
        let (Some(mid), Some(dark)) = (shade("500"), shade("700")) else { return };

        let ratio = contrast_ratio(mid, dark);
        if ratio < PRIMARY_SHADE_RATIO {
            self.report.add_issue(
                self.issue(
                    "primary_shade_contrast",
                    Severity::Moderate,
                    "Primary shades too close",
                    path,
                    path,
                )
                .with_description(format!(
                    "Contrast ratio {:.2}:1 between {}.500 ({}) and {}.700 ({}) is below {}:1",
                    ratio, path, mid, path, dark, PRIMARY_SHADE_RATIO
                ))
                .with_recommendation("Adjust primary shades for at least 3:1 contrast (large text minimum)"),
            );
        }
    }

    fn check_shorthand(&mut self, scale: &Map<String, Value>, path: &str) {
        for (shade, value) in scale {
            let Value::String(raw) = value else { continue };
            let Ok(color) = parse_hex(raw) else { continue };
            if raw.trim().trim_start_matches('#').len() == 3 {
                let shade_path = join_path(path, shade);
                self.report.add_issue(
                    self.issue(
                        "shorthand_hex_color",
                        Severity::Minor,
                        "Shorthand hex color",
                        &shade_path,
                        &shade_path,
                    )
                    .with_description(format!("{} uses 3-digit shorthand {}", shade_path, raw))
                    .with_recommendation(format!("Write it as {}", color)),
                );
            }
        }
    }

    fn check_semantic(&mut self, groups: &Map<String, Value>, path: &str) {
        for name in REQUIRED_SEMANTIC {
            if !groups.contains_key(*name) {
                self.report.add_issue(
                    self.issue(
                        "semantic_color_missing",
                        Severity::Moderate,
                        "Missing semantic color",
                        &join_path(path, name),
                        path,
                    )
                    .with_description(format!("Missing semantic color: {}", name))
                    .with_recommendation(format!("Add a {} color scale for consistent UI states", name)),
                );
            }
        }

        for (name, scale) in groups {
            if let Value::Object(scale) = scale {
                self.check_shorthand(scale, &join_path(path, name));
            }
        }
    }

    fn check_typography(&mut self, typography: &Value) {
        match typography.get("font_family") {
            None => {
                self.report.add_issue(
                    self.issue(
                        "typography_font_family_missing",
                        Severity::Serious,
                        "Missing font family definitions",
                        "typography.font_family",
                        "typography",
                    )
                    .with_recommendation("Define font families for sans, serif, and mono fonts"),
                );
            }
            Some(families) => {
                for family in REQUIRED_FONT_FAMILIES {
                    let path = format!("typography.font_family.{}", family);
                    match families.get(*family) {
                        None => {
                            self.report.add_issue(
                                self.issue(
                                    "font_family_missing",
                                    Severity::Serious,
                                    "Missing font family",
                                    &path,
                                    "typography.font_family",
                                )
                                .with_description(format!("Missing font family: {}", family))
                                .with_recommendation(format!("Add {} font stack with fallbacks", family)),
                            );
                        }
                        Some(stack) => {
                            let has_fallback = stack.as_array().map_or(false, |fonts| fonts.len() >= 2);
                            if !has_fallback {
                                self.report.add_issue(
                                    self.issue(
                                        "font_fallback_missing",
                                        Severity::Moderate,
                                        "Font family without fallback",
                                        &path,
                                        &path,
                                    )
                                    .with_description(format!(
                                        "Font family '{}' should have multiple fonts for fallback",
                                        family
                                    ))
                                    .with_recommendation(
                                        "Include fallback fonts (e.g., ['Inter', 'system-ui', 'sans-serif'])",
                                    ),
                                );
                            }
                        }
                    }
                }
            }
        }

        match typography.get("scale") {
            None => {
                self.report.add_issue(
                    self.issue(
                        "typography_scale_missing",
                        Severity::Serious,
                        "Missing font size scale",
                        "typography.scale",
                        "typography",
                    )
                    .with_recommendation("Define a modular scale for font sizes (xs to 7xl)"),
                );
            }
            Some(scale) => {
                for size in REQUIRED_FONT_SIZES {
                    if scale.get(*size).is_none() {
                        self.report.add_issue(
                            self.issue(
                                "font_size_missing",
                                Severity::Moderate,
                                "Missing font size",
                                &format!("typography.scale.{}", size),
                                "typography.scale",
                            )
                            .with_description(format!("Missing font size: {}", size))
                            .with_recommendation(format!("Add {} font size to maintain a consistent scale", size)),
                        );
                    }
                }
            }
        }
    }

    fn check_spacing(&mut self, spacing: &Value) {
        let Some(scale) = spacing.get("scale") else {
            self.report.add_issue(
                self.issue(
                    "spacing_scale_missing",
                    Severity::Serious,
                    "Missing spacing scale",
                    "spacing.scale",
                    "spacing",
                )
                .with_recommendation("Define an 8-point grid spacing scale"),
            );
            return;
        };

        let Some(values) = scale.as_array() else {
            self.unsupported(
                "spacing.scale",
                "an array",
                "Use an array of numbers following the 8-point grid",
            );
            return;
        };

        for (idx, value) in values.iter().enumerate() {
            if !on_scale(value, SPACING_GRID) {
                self.report.add_issue(
                    self.issue(
                        "spacing_off_grid",
                        Severity::Moderate,
                        "Spacing value off the 8-point grid",
                        &format!("spacing.scale[{}]", idx),
                        "spacing.scale",
                    )
                    .with_description(format!("Spacing value {}px doesn't follow the 8-point grid", value))
                    .with_recommendation(format!("Use standard spacing values: {}", list(SPACING_GRID))),
                );
            }
        }
    }

    fn check_breakpoints(&mut self, breakpoints: &Value) {
        let Some(map) = breakpoints.as_object() else {
            self.unsupported("breakpoints", "a key/value map", "Use an object with sm, md, lg, xl keys");
            return;
        };

        for (name, px) in REQUIRED_BREAKPOINTS {
            if !map.contains_key(*name) {
                self.report.add_issue(
                    self.issue(
                        "breakpoint_missing",
                        Severity::Moderate,
                        "Missing breakpoint",
                        &format!("breakpoints.{}", name),
                        "breakpoints",
                    )
                    .with_description(format!("Missing breakpoint: {}", name))
                    .with_recommendation(format!("Add {} breakpoint at {}px", name, px)),
                );
            }
        }
    }

    /// Named radii must be non-negative numbers; a bare list must stay on the scale
    fn check_border_radius(&mut self, radius: &Value) {
        match radius {
            Value::Object(map) => {
                for (name, value) in map {
                    let valid = value.as_f64().map_or(false, |v| v >= 0.0);
                    if !valid {
                        let path = join_path("borderRadius", name);
                        self.report.add_issue(
                            self.issue(
                                "border_radius_invalid",
                                Severity::Serious,
                                "Invalid border radius",
                                &path,
                                &path,
                            )
                            .with_description(format!("Invalid border radius value: {}", value))
                            .with_recommendation("Use positive number values for border radius"),
                        );
                    }
                }
            }
            Value::Array(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if !on_scale(value, RADIUS_SCALE) {
                        self.report.add_issue(
                            self.issue(
                                "border_radius_off_scale",
                                Severity::Moderate,
                                "Border radius off the standard scale",
                                &format!("borderRadius[{}]", idx),
                                "borderRadius",
                            )
                            .with_description(format!("Border radius {}px not in standard scale", value))
                            .with_recommendation(format!("Use standard values: {}", list(RADIUS_SCALE))),
                        );
                    }
                }
            }
            _ => self.unsupported(
                "borderRadius",
                "a key/value map or an array",
                "Use an object of named radii or an array of px values",
            ),
        }
    }

    fn check_z_index(&mut self, z_index: &Value) {
        let Some(map) = z_index.as_object() else {
            self.unsupported(
                "zIndex",
                "a key/value map",
                "Use an object with semantic keys (modal, dropdown, etc.)",
            );
            return;
        };

        for (name, value) in map {
            if value.is_i64() || value.is_u64() {
                continue;
            }
            let recommendation = match Z_INDEX_LAYERS.iter().find(|(layer, _)| *layer == name.as_str()) {
                Some((layer, z)) => format!("Use an integer z-index; {} is conventionally {}", layer, z),
                None => "Use integer values for z-index".to_string(),
            };
            let path = join_path("zIndex", name);
            self.report.add_issue(
                self.issue("z_index_invalid", Severity::Serious, "Invalid z-index", &path, &path)
                    .with_description(format!("Z-index value must be integer: {}", value))
                    .with_recommendation(recommendation),
            );
        }
    }

    fn check_naming(&mut self, map: &Map<String, Value>, parent: &str) {
        for (key, value) in map {
            let path = join_path(parent, key);
            if !is_conventional_key(key) {
                self.report.add_issue(
                    self.issue("token_naming", Severity::Minor, "Inconsistent token naming", &path, &path)
                        .with_description(format!("Inconsistent naming: {}", key))
                        .with_recommendation("Use camelCase or kebab-case keys"),
                );
            }
            if let Value::Object(nested) = value {
                self.check_naming(nested, &path);
            }
        }
    }
}

fn on_scale(value: &Value, scale: &[u32]) -> bool {
    value
        .as_f64()
        .map_or(false, |v| scale.iter().any(|step| f64::from(*step) == v))
}

fn list(scale: &[u32]) -> String {
    scale.iter().map(|step| step.to_string()).collect::<Vec<_>>().join(", ")
}

fn camel_case() -> &'static Regex {
    static CAMEL: OnceLock<Regex> = OnceLock::new();
    CAMEL.get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*([A-Z][a-z0-9]*)*$").expect("valid regex"))
}

/// camelCase, or alphanumeric once `_` and `-` are removed
fn is_conventional_key(key: &str) -> bool {
    if camel_case().is_match(key) {
        return true;
    }
    let stripped: String = key.chars().filter(|c| *c != '_' && *c != '-').collect();
    !stripped.is_empty() && stripped.chars().all(char::is_alphanumeric)
}
