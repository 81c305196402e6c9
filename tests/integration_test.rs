// SPDX-License-Identifier: PMPL-1.0-or-later
//! Integration tests for contrastbot

use contrastbot::analyzers::{audit_document, AuditContext};
use contrastbot::config::Config;
use contrastbot::palette;
use contrastbot::report::{generate_report, OutputFormat};
use contrastbot::{
    check_contrast, contrast_ratio, determine_overall_compliance, parse_hex, scanner, ComplianceLevel,
    Issue, Severity, WcagLevel,
};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_black_on_white_is_21() {
    let ratio = contrast_ratio(parse_hex("#000000").unwrap(), parse_hex("#ffffff").unwrap());
    assert!((ratio - 21.0).abs() < 1e-6, "got {}", ratio);
}

#[test]
fn test_identical_colors_are_1() {
    let grey = parse_hex("#777777").unwrap();
    assert_eq!(contrast_ratio(grey, grey), 1.0);
}

#[test]
fn test_767676_passes_aa_just_above_threshold() {
    let result = check_contrast(
        parse_hex("#767676").unwrap(),
        parse_hex("#ffffff").unwrap(),
        WcagLevel::AA,
        false,
    );
    assert!((result.ratio - 4.54).abs() < 0.01, "got {}", result.ratio);
    assert!(result.passes);
    assert_eq!(result.required_ratio, 4.5);
}

#[test]
fn test_low_contrast_fixture_yields_one_issue() {
    let config = Config {
        structure_checks: false,
        ..Config::default()
    };
    let report = scanner::audit_file(Path::new("tests/fixtures/low-contrast-tokens.json"), &config)
        .expect("audit should succeed");

    assert_eq!(report.len(), 1, "{:?}", report.issues());
    let issue = &report.issues()[0];
    assert_eq!(issue.rule_id, "insufficient_contrast");
    assert_eq!(issue.severity, Severity::Serious);
    assert_eq!(issue.line_number, Some(4));
    assert!(!report.blocks_release());
}

#[test]
fn test_two_critical_issues_are_non_compliant() {
    let issues = vec![
        Issue::new("invalid_color_format", Severity::Critical, "Invalid color format"),
        Issue::new("invalid_color_format", Severity::Critical, "Invalid color format"),
    ];
    assert_eq!(determine_overall_compliance(&issues), ComplianceLevel::NonCompliant);
    assert_eq!(ComplianceLevel::NonCompliant.to_string(), "non-compliant");
}

#[test]
fn test_accessible_fixture_is_clean() {
    let report = scanner::audit_file(Path::new("tests/fixtures/accessible-theme.json"), &Config::default())
        .expect("audit should succeed");

    assert!(
        report.is_empty(),
        "Accessible fixture should have no issues, got {:?}",
        report.issues().iter().map(|i| &i.rule_id).collect::<Vec<_>>()
    );
    assert_eq!(report.score(), 100.0);
    assert_eq!(report.compliance_level(), ComplianceLevel::AAA);
}

#[test]
fn test_accessible_fixture_at_aaa() {
    let config = Config {
        level: WcagLevel::AAA,
        ..Config::default()
    };
    let report = scanner::audit_file(Path::new("tests/fixtures/accessible-theme.json"), &config)
        .expect("audit should succeed");

    // #3072e0 clears AA on white but not AAA
    let contrast = report.by_rule("insufficient_contrast");
    assert!(!contrast.is_empty());
    assert!(contrast.iter().all(|i| i.wcag_level == WcagLevel::AAA));
}

#[test]
fn test_malformed_fixture_keeps_going() {
    let report = scanner::audit_file(Path::new("tests/fixtures/malformed-theme.json"), &Config::default())
        .expect("audit should succeed");

    let invalid = report.by_rule("invalid_color_format");
    assert_eq!(invalid.len(), 2);
    assert!(invalid.iter().all(|i| i.severity == Severity::Critical));
    assert!(invalid.iter().any(|i| i.description.contains("#12345g")));
    assert!(invalid.iter().any(|i| i.line_number == Some(8)));

    assert_eq!(report.by_rule("unsupported_structure").len(), 1);
    assert_eq!(report.by_rule("color_shades_missing").len(), 2);
    assert!(report.by_rule("insufficient_contrast").is_empty());

    assert_eq!(report.compliance_level(), ComplianceLevel::NonCompliant);
    assert!(report.blocks_release());
}

#[test]
fn test_missing_colors_section() {
    let config = Config::default();
    let doc = serde_json::json!({ "typography": {} });
    let report = audit_document(&doc, &AuditContext::new(&config));

    let missing = report.by_rule("colors_missing");
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].severity, Severity::Serious);
    assert!(!report.by_rule("typography_font_family_missing").is_empty());
}

#[test]
fn test_scan_directory_with_fixtures() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("design");
    std::fs::create_dir_all(&nested).unwrap();
    for name in ["low-contrast-tokens.json", "accessible-theme.json", "malformed-theme.json"] {
        std::fs::copy(Path::new("tests/fixtures").join(name), nested.join(name)).unwrap();
    }

    let report = scanner::scan_directory(tmp.path(), &Config::default()).expect("scan should succeed");
    assert_eq!(report.by_rule("invalid_color_format").len(), 2);
    assert_eq!(report.by_rule("insufficient_contrast").len(), 1);
    assert!(report.blocks_release());
}

#[test]
fn test_report_formats() {
    let report = scanner::audit_file(Path::new("tests/fixtures/malformed-theme.json"), &Config::default())
        .expect("audit should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&generate_report(&report, OutputFormat::Json)).expect("valid JSON");
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, ["complianceLevel", "issues", "score", "summary"]);
    assert_eq!(json["complianceLevel"], "non-compliant");
    assert_eq!(json["summary"]["critical"], 2);
    assert_eq!(json["summary"]["minor"], 0);

    let text = generate_report(&report, OutputFormat::Text);
    assert!(text.contains("--- CRITICAL (2) ---"));
    assert!(text.contains("Compliance level: non-compliant"));

    let sarif: serde_json::Value =
        serde_json::from_str(&generate_report(&report, OutputFormat::Sarif)).expect("valid JSON");
    assert_eq!(sarif["runs"][0]["tool"]["driver"]["name"], "contrastbot");
    assert_eq!(
        sarif["runs"][0]["results"].as_array().unwrap().len(),
        report.len()
    );
}

#[test]
fn test_generated_theme_round_trips_through_audit() {
    let theme = palette::generate_theme(palette::personality("bold").unwrap(), None);
    let mut self_check = contrastbot::ComplianceReport::new();
    let grade = palette::validate_theme(&theme, &mut self_check);

    // primary 500 (#cf1717) is only 3.57:1 on neutral 950
    assert_eq!(self_check.len(), 1);
    assert!(self_check.issues()[0].description.contains("colors.neutral.950"));
    assert_eq!(grade, WcagLevel::AA);

    let config = Config::default();
    let audited = audit_document(&theme.to_token_document(), &AuditContext::new(&config));
    assert!(audited.by_rule("invalid_color_format").is_empty());
    assert!(!audited.by_rule("insufficient_contrast").is_empty());
}
