// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for compliance audits.
//!
//! Supports multiple output formats:
//! - Text: human-readable issues grouped by severity
//! - JSON: the serialized [`ComplianceReport`] (`score`, `complianceLevel`, `summary`, `issues`)
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::issues::{ComplianceReport, Issue, Severity};
use chrono::Utc;
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render a report in the requested format
pub fn generate_report(report: &ComplianceReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(report),
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Sarif => generate_sarif_report(report),
    }
}

fn generate_text_report(report: &ComplianceReport) -> String {
    let mut output = String::new();

    output.push_str("=== Contrastbot Compliance Report ===\n");
    output.push_str(&format!("Generated: {}\n\n", Utc::now().to_rfc3339()));

    output.push_str(&format!("Score: {:.1}/100\n", report.score()));
    output.push_str(&format!("Compliance level: {}\n", report.compliance_level()));

    let summary = report.summary();
    output.push_str(&format!(
        "Summary: {} critical, {} serious, {} moderate, {} minor\n\n",
        summary[&Severity::Critical],
        summary[&Severity::Serious],
        summary[&Severity::Moderate],
        summary[&Severity::Minor],
    ));

    if report.is_empty() {
        output.push_str("No issues found. All checks passed.\n");
        return output;
    }

    for severity in Severity::ALL {
        let issues = report.by_severity(severity);
        if issues.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, issues.len()));

        for issue in issues {
            output.push_str(&format!("[{}] {}\n", issue.rule_id, issue.title));
            if issue.description != issue.title {
                output.push_str(&format!("  {}\n", issue.description));
            }
            if issue.location.is_some() || issue.line_number.is_some() {
                output.push_str(&format!("  Location: {}\n", issue.location_string()));
            }
            output.push_str(&format!("  WCAG: Level {}\n", issue.wcag_level));
            if let Some(ref recommendation) = issue.recommendation {
                output.push_str(&format!("  Fix: {}\n", recommendation));
            }
            output.push('\n');
        }
    }

    if report.blocks_release() {
        output.push_str("RESULT: FAILED (critical issues found)\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

fn generate_json_report(report: &ComplianceReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize report: {}\"}}", e))
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation", skip_serializing_if = "Option::is_none")]
    physical_location: Option<SarifPhysicalLocation>,
    #[serde(rename = "logicalLocations", skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    #[serde(rename = "fullyQualifiedName")]
    fully_qualified_name: String,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::Serious => "error",
        Severity::Moderate => "warning",
        Severity::Minor => "note",
    }
}

/// Split `file#token.path` into its file and token parts
fn sarif_location(issue: &Issue) -> Option<SarifLocation> {
    let location = issue.location.as_deref()?;
    let (file, token_path) = match location.split_once('#') {
        Some((file, path)) => (Some(file), path),
        None => (None, location),
    };

    Some(SarifLocation {
        physical_location: file.map(|file| SarifPhysicalLocation {
            artifact_location: SarifArtifactLocation {
                uri: file.to_string(),
            },
            region: issue.line_number.map(|l| SarifRegion { start_line: l }),
        }),
        logical_locations: vec![SarifLogicalLocation {
            fully_qualified_name: token_path.to_string(),
        }],
    })
}

fn generate_sarif_report(report: &ComplianceReport) -> String {
    let results: Vec<SarifResult> = report
        .issues()
        .iter()
        .map(|issue| SarifResult {
            rule_id: issue.rule_id.clone(),
            level: sarif_level(issue.severity).to_string(),
            message: SarifMessage {
                text: issue.description.clone(),
            },
            locations: sarif_location(issue).into_iter().collect(),
        })
        .collect();

    let sarif = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "contrastbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&sarif)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e))
}
