// SPDX-License-Identifier: PMPL-1.0-or-later
//! Issue model: typed findings and the report that collects them.
//!
//! Every checker (token contrast, token structure, palette self-check,
//! ad hoc pair queries) reports through [`Issue`] values appended to a
//! [`ComplianceReport`]. Score and compliance grade are derived on demand
//! from the current issue list.

use crate::rules::{determine_overall_compliance, ComplianceLevel, WcagLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Issue severity, ordered most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Broken input or a blocking failure
    Critical,
    /// A WCAG requirement is not met
    Serious,
    /// Should be addressed
    Moderate,
    /// Cosmetic or best-practice
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ];

    /// Score weight; a critical issue weighs as much as the worst case
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 10,
            Severity::Serious => 5,
            Severity::Moderate => 2,
            Severity::Minor => 1,
        }
    }

    /// Whether this severity fails a CI run
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Critical)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Serious => write!(f, "SERIOUS"),
            Severity::Moderate => write!(f, "MODERATE"),
            Severity::Minor => write!(f, "MINOR"),
        }
    }
}

/// A single compliance finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Rule identifier (e.g., "insufficient_contrast")
    pub rule_id: String,
    /// Short human-readable title
    pub title: String,
    /// Detailed description
    pub description: String,
    pub severity: Severity,
    /// WCAG level the failing check targeted
    pub wcag_level: WcagLevel,
    /// File and/or token path
    pub location: Option<String>,
    /// Line number (1-indexed)
    pub line_number: Option<usize>,
    /// Suggested fix
    pub recommendation: Option<String>,
}

impl Issue {
    /// Create a new issue; the description starts out equal to the title
    pub fn new(rule_id: &str, severity: Severity, title: &str) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            title: title.to_string(),
            description: title.to_string(),
            severity,
            wcag_level: WcagLevel::AA,
            location: None,
            line_number: None,
            recommendation: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_wcag_level(mut self, level: WcagLevel) -> Self {
        self.wcag_level = level;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set line number, ignoring `None`
    pub fn with_line(mut self, line: Option<usize>) -> Self {
        if line.is_some() {
            self.line_number = line;
        }
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.location, self.line_number) {
            (Some(loc), Some(line)) => format!("{}:{}", loc, line),
            (Some(loc), None) => loc.clone(),
            (None, Some(line)) => format!("line {}", line),
            (None, None) => "<unknown>".to_string(),
        }
    }
}

/// Append-only collection of issues for one audit run
#[derive(Debug, Clone, Default)]
pub struct ComplianceReport {
    issues: Vec<Issue>,
}

impl ComplianceReport {
    /// Create empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue. Repeats of a rule at different locations are kept.
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Extend with issues from an iterator
    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// Move every issue of another report to the end of this one
    pub fn absorb(&mut self, other: ComplianceReport) {
        self.issues.extend(other.issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Score in [0, 100].
    ///
    /// `100 - weight_sum / (count * 10) * 100`, i.e. normalized against every
    /// issue being critical. Exactly 100 only when there are no issues.
    pub fn score(&self) -> f64 {
        if self.issues.is_empty() {
            return 100.0;
        }

        let total: u32 = self.issues.iter().map(|i| i.severity.weight()).sum();
        let max_possible = self.issues.len() as f64 * f64::from(Severity::Critical.weight());
        (100.0 - f64::from(total) / max_possible * 100.0).max(0.0)
    }

    /// Count per severity; all four severities are always present
    pub fn summary(&self) -> BTreeMap<Severity, usize> {
        let mut summary: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        for issue in &self.issues {
            *summary.entry(issue.severity).or_insert(0) += 1;
        }
        summary
    }

    pub fn compliance_level(&self) -> ComplianceLevel {
        determine_overall_compliance(&self.issues)
    }

    /// Get issues by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }

    /// Get issues by rule identifier
    pub fn by_rule(&self, rule_id: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.rule_id == rule_id).collect()
    }

    /// Check if a run with this report should fail
    pub fn blocks_release(&self) -> bool {
        self.issues.iter().any(|i| i.severity.blocks_release())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Serialized form: `{score, complianceLevel, summary, issues}`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportDocument<'a> {
    score: f64,
    compliance_level: ComplianceLevel,
    summary: BTreeMap<Severity, usize>,
    issues: &'a [Issue],
}

impl Serialize for ComplianceReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReportDocument {
            score: self.score(),
            compliance_level: self.compliance_level(),
            summary: self.summary(),
            issues: &self.issues,
        }
        .serialize(serializer)
    }
}

/// A report that several threads may append to.
///
/// Appends are serialized through a mutex; ordering between threads is
/// unspecified.
#[derive(Debug, Default)]
pub struct SharedReport {
    inner: Mutex<ComplianceReport>,
}

impl SharedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&self, issue: Issue) {
        self.lock().add_issue(issue);
    }

    /// Append a whole per-worker report in one critical section
    pub fn absorb(&self, report: ComplianceReport) {
        self.lock().absorb(report);
    }

    pub fn into_inner(self) -> ComplianceReport {
        self.inner.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ComplianceReport> {
        // Poisoned data is still a complete Vec
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
