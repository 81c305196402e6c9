// SPDX-License-Identifier: PMPL-1.0-or-later
//! Token contrast analyzer - WCAG 1.4.3 / 1.4.6 over a design-token document
//!
//! Walks `colors` (named scales of shade key -> hex) and `colors.semantic`
//! (groups of scales), resolves every declared shade, then checks the
//! configured foreground/background pairs against the target level.

use crate::analyzers::{join_path, Analyzer, AuditContext};
use crate::color::{parse_hex, Color};
use crate::config::Config;
use crate::issues::{ComplianceReport, Issue, Severity};
use crate::rules::{check_contrast, ContrastResult, WcagLevel};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Key of the semantic group collection under `colors`
pub const SEMANTIC_KEY: &str = "semantic";

/// Contrast analyzer for declared token pairs
pub struct TokenContrastAnalyzer;

impl Analyzer for TokenContrastAnalyzer {
    fn name(&self) -> &str {
        "Token Contrast Analyzer"
    }

    fn description(&self) -> &str {
        "Checks declared color token pairs meet WCAG contrast requirements (1.4.3/1.4.6)"
    }

    fn analyze(&self, document: &Value, ctx: &AuditContext<'_>, report: &mut ComplianceReport) {
        self.validate(document, ctx, report);
    }

    fn enabled(&self, _config: &Config) -> bool {
        true
    }
}

impl TokenContrastAnalyzer {
    /// Walk the document's colors and check every recognized pair
    pub fn validate(&self, document: &Value, ctx: &AuditContext<'_>, report: &mut ComplianceReport) {
        let level = ctx.config.level;

        let colors = match document.get("colors") {
            Some(colors) => colors,
            None => {
                report.add_issue(
                    Issue::new("colors_missing", Severity::Serious, "Missing colors in token document")
                        .with_description("Token document must include a `colors` section with color scales")
                        .with_wcag_level(level)
                        .with_location(ctx.location("colors"))
                        .with_recommendation("Add a `colors` object with primary, secondary and neutral scales"),
                );
                return;
            }
        };

        let colors = match colors.as_object() {
            Some(map) => map,
            None => {
                report.add_issue(unsupported_structure(ctx, "colors", level));
                return;
            }
        };

        let shades = resolve_shades(colors, ctx, report);
        debug!(resolved = shades.len(), "Resolved color tokens");

        for pair in &ctx.config.contrast_pairs {
            let large = pair.large_text.unwrap_or(ctx.config.large_text);
            check_pair(&shades, &pair.foreground, &pair.background, large, ctx, report);
        }

        if let Some(Value::Object(groups)) = colors.get(SEMANTIC_KEY) {
            for name in groups.keys() {
                let foreground = format!("{}.{}.{}", SEMANTIC_KEY, name, ctx.config.semantic_shade);
                check_pair(
                    &shades,
                    &foreground,
                    &ctx.config.semantic_background,
                    ctx.config.large_text,
                    ctx,
                    report,
                );
            }
        }
    }
}

/// Parse every shade under `colors`, reporting malformed entries.
/// Keys of the returned map are paths relative to `colors`.
fn resolve_shades(
    colors: &Map<String, Value>,
    ctx: &AuditContext<'_>,
    report: &mut ComplianceReport,
) -> BTreeMap<String, Color> {
    let mut shades = BTreeMap::new();
    let level = ctx.config.level;

    for (name, value) in colors {
        if name == SEMANTIC_KEY {
            let groups = match value.as_object() {
                Some(groups) => groups,
                None => {
                    report.add_issue(unsupported_structure(ctx, "colors.semantic", level));
                    continue;
                }
            };
            for (group, scale) in groups {
                resolve_scale(&join_path(SEMANTIC_KEY, group), scale, ctx, report, &mut shades);
            }
        } else {
            resolve_scale(name, value, ctx, report, &mut shades);
        }
    }

    shades
}

fn resolve_scale(
    scale_path: &str,
    scale: &Value,
    ctx: &AuditContext<'_>,
    report: &mut ComplianceReport,
    shades: &mut BTreeMap<String, Color>,
) {
    let level = ctx.config.level;
    let token_path = join_path("colors", scale_path);

    let scale = match scale.as_object() {
        Some(scale) => scale,
        None => {
            report.add_issue(unsupported_structure(ctx, &token_path, level));
            return;
        }
    };

    for (shade, value) in scale {
        let parsed = match value {
            Value::String(s) => parse_hex(s).ok(),
            _ => None,
        };

        match parsed {
            Some(color) => {
                shades.insert(join_path(scale_path, shade), color);
            }
            None => {
                let raw = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let shade_path = join_path(&token_path, shade);
                report.add_issue(
                    invalid_color_issue(&raw, &ctx.location(&shade_path), level)
                        .with_line(ctx.line_of_path(&shade_path)),
                );
            }
        }
    }
}

fn check_pair(
    shades: &BTreeMap<String, Color>,
    foreground: &str,
    background: &str,
    large_text: bool,
    ctx: &AuditContext<'_>,
    report: &mut ComplianceReport,
) {
    let (fg, bg) = match (shades.get(foreground), shades.get(background)) {
        (Some(fg), Some(bg)) => (*fg, *bg),
        _ => {
            debug!(foreground, background, "Pair not declared, skipping");
            return;
        }
    };

    let result = check_contrast(fg, bg, ctx.config.level, large_text);
    debug!(
        foreground,
        background,
        ratio = result.ratio,
        required = result.required_ratio,
        passes = result.passes,
        "Checked pair"
    );

    if !result.passes {
        let fg_path = join_path("colors", foreground);
        let fg_label = format!("{} ({})", fg_path, fg);
        let bg_label = format!("colors.{} ({})", background, bg);
        report.add_issue(
            contrast_issue(&fg_label, &bg_label, &result)
                .with_location(ctx.location(&fg_path))
                .with_line(ctx.line_of_path(&fg_path)),
        );
    }
}

fn unsupported_structure(ctx: &AuditContext<'_>, token_path: &str, level: WcagLevel) -> Issue {
    Issue::new("unsupported_structure", Severity::Serious, "Unsupported token structure")
        .with_description(format!("`{}` must be a key/value map", token_path))
        .with_wcag_level(level)
        .with_location(ctx.location(token_path))
        .with_line(ctx.line_of_path(token_path))
        .with_recommendation("Use an object keyed by shade (100, 200, ..., 900) with hex color values")
}

/// Issue for a failed contrast check between two labelled colors
pub fn contrast_issue(fg_label: &str, bg_label: &str, result: &ContrastResult) -> Issue {
    Issue::new("insufficient_contrast", Severity::Serious, "Insufficient color contrast")
        .with_description(format!(
            "Contrast ratio {:.2}:1 of {} on {} is below required {}:1 for WCAG {} {} text",
            result.ratio,
            fg_label,
            bg_label,
            result.required_ratio,
            result.level,
            if result.is_large_text { "large" } else { "normal" },
        ))
        .with_wcag_level(result.level)
        .with_recommendation(format!(
            "Adjust colors to achieve at least {}:1 contrast ratio",
            result.required_ratio
        ))
}

/// Issue for a color value that does not parse; the raw input is preserved
pub fn invalid_color_issue(raw: &str, location: &str, level: WcagLevel) -> Issue {
    Issue::new("invalid_color_format", Severity::Critical, "Invalid color format")
        .with_description(format!("Could not parse color value {:?}: expected 3 or 6 hex digits", raw))
        .with_wcag_level(level)
        .with_location(location)
        .with_recommendation("Use a 6-digit hex color such as #3b82f6")
}
