// SPDX-License-Identifier: PMPL-1.0-or-later
//! WCAG contrast thresholds and compliance classification.
//!
//! Required ratios (1.4.3 Contrast Minimum / 1.4.6 Contrast Enhanced):
//!
//! | Level | Normal text | Large text |
//! |-------|-------------|------------|
//! | A     | 3.0         | 2.0        |
//! | AA    | 4.5         | 3.0        |
//! | AAA   | 7.0         | 4.5        |
//!
//! Large text is at least 18pt, or 14pt bold.

use crate::color::Color;
use crate::contrast::contrast_ratio;
use crate::issues::{Issue, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WCAG conformance level, ordered from weakest to strictest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    #[default]
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl WcagLevel {
    pub const ALL: [WcagLevel; 3] = [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA];

    /// Minimum contrast ratio for this level and text size
    pub fn required_ratio(self, is_large_text: bool) -> f64 {
        match (self, is_large_text) {
            (WcagLevel::A, false) => 3.0,
            (WcagLevel::A, true) => 2.0,
            (WcagLevel::AA, false) => 4.5,
            (WcagLevel::AA, true) => 3.0,
            (WcagLevel::AAA, false) => 7.0,
            (WcagLevel::AAA, true) => 4.5,
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

impl FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(WcagLevel::A),
            "AA" => Ok(WcagLevel::AA),
            "AAA" => Ok(WcagLevel::AAA),
            other => Err(format!("Unknown WCAG level: {}", other)),
        }
    }
}

/// Outcome of one contrast query. Transient evidence, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    pub ratio: f64,
    pub required_ratio: f64,
    pub passes: bool,
    pub level: WcagLevel,
    pub is_large_text: bool,
}

impl fmt::Display for ContrastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}:1 (required {}:1 for {} {} text) - {}",
            self.ratio,
            self.required_ratio,
            self.level,
            if self.is_large_text { "large" } else { "normal" },
            if self.passes { "PASS" } else { "FAIL" }
        )
    }
}

/// Check a foreground/background pair against a level.
/// A ratio exactly at the threshold passes.
pub fn check_contrast(fg: Color, bg: Color, level: WcagLevel, is_large_text: bool) -> ContrastResult {
    let ratio = contrast_ratio(fg, bg);
    let required_ratio = level.required_ratio(is_large_text);
    ContrastResult {
        ratio,
        required_ratio,
        passes: ratio >= required_ratio,
        level,
        is_large_text,
    }
}

/// Overall compliance grade of an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceLevel {
    AAA,
    AA,
    /// At most one critical issue
    PartialA,
    NonCompliant,
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceLevel::AAA => write!(f, "AAA"),
            ComplianceLevel::AA => write!(f, "AA"),
            ComplianceLevel::PartialA => write!(f, "A (partial)"),
            ComplianceLevel::NonCompliant => write!(f, "non-compliant"),
        }
    }
}

impl Serialize for ComplianceLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Grade a set of issues by their critical/serious counts.
///
/// This is a local policy carried over from the portfolio tooling, not a
/// WCAG conformance algorithm:
/// no critical and no serious issues is AAA, no critical issues is AA,
/// one critical issue is partial A, anything more is non-compliant.
pub fn determine_overall_compliance(issues: &[Issue]) -> ComplianceLevel {
    let critical = issues.iter().filter(|i| i.severity == Severity::Critical).count();
    let serious = issues.iter().filter(|i| i.severity == Severity::Serious).count();

    match (critical, serious) {
        (0, 0) => ComplianceLevel::AAA,
        (0, _) => ComplianceLevel::AA,
        (1, _) => ComplianceLevel::PartialA,
        _ => ComplianceLevel::NonCompliant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_hex;

    fn issue(severity: Severity) -> Issue {
        Issue::new("test_rule", severity, "Test issue")
    }

    #[test]
    fn test_default_level_is_aa() {
        assert_eq!(WcagLevel::default(), WcagLevel::AA);
    }

    #[test]
    fn test_threshold_table() {
        assert_eq!(WcagLevel::A.required_ratio(false), 3.0);
        assert_eq!(WcagLevel::A.required_ratio(true), 2.0);
        assert_eq!(WcagLevel::AA.required_ratio(false), 4.5);
        assert_eq!(WcagLevel::AA.required_ratio(true), 3.0);
        assert_eq!(WcagLevel::AAA.required_ratio(false), 7.0);
        assert_eq!(WcagLevel::AAA.required_ratio(true), 4.5);
    }

    #[test]
    fn test_level_ordering() {
        assert!(WcagLevel::A < WcagLevel::AA);
        assert!(WcagLevel::AA < WcagLevel::AAA);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("aa".parse::<WcagLevel>().unwrap(), WcagLevel::AA);
        assert_eq!("AAA".parse::<WcagLevel>().unwrap(), WcagLevel::AAA);
        assert!("B".parse::<WcagLevel>().is_err());
    }

    #[test]
    fn test_grey_on_white_just_passes_aa() {
        let result = check_contrast(
            parse_hex("#767676").unwrap(),
            Color::WHITE,
            WcagLevel::AA,
            false,
        );
        assert!((result.ratio - 4.54).abs() < 0.01);
        assert_eq!(result.required_ratio, 4.5);
        assert!(result.passes);
        assert!(!check_contrast(parse_hex("#777777").unwrap(), Color::WHITE, WcagLevel::AA, false).passes);
    }

    #[test]
    fn test_large_text_relaxes_threshold() {
        let fg = parse_hex("#3b82f6").unwrap();
        assert!(!check_contrast(fg, Color::WHITE, WcagLevel::AA, false).passes);
        assert!(check_contrast(fg, Color::WHITE, WcagLevel::AA, true).passes);
    }

    #[test]
    fn test_compliance_policy() {
        assert_eq!(determine_overall_compliance(&[]), ComplianceLevel::AAA);
        assert_eq!(
            determine_overall_compliance(&[issue(Severity::Moderate), issue(Severity::Minor)]),
            ComplianceLevel::AAA
        );
        assert_eq!(determine_overall_compliance(&[issue(Severity::Serious)]), ComplianceLevel::AA);
        assert_eq!(
            determine_overall_compliance(&[issue(Severity::Critical), issue(Severity::Serious)]),
            ComplianceLevel::PartialA
        );
        assert_eq!(
            determine_overall_compliance(&[issue(Severity::Critical), issue(Severity::Critical)]),
            ComplianceLevel::NonCompliant
        );
    }

    #[test]
    fn test_compliance_level_display() {
        assert_eq!(ComplianceLevel::PartialA.to_string(), "A (partial)");
        assert_eq!(ComplianceLevel::NonCompliant.to_string(), "non-compliant");
        assert_eq!(serde_json::to_value(ComplianceLevel::AA).unwrap(), "AA");
    }

    #[test]
    fn test_contrast_result_serializes_camel_case() {
        let result = check_contrast(Color::BLACK, Color::WHITE, WcagLevel::AAA, true);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["requiredRatio"], 4.5);
        assert_eq!(json["isLargeText"], true);
        assert_eq!(json["level"], "AAA");
    }
}
