// SPDX-License-Identifier: PMPL-1.0-or-later
//! Contrastbot - WCAG color contrast auditing for design tokens
//!
//! Contrastbot computes WCAG 2.x relative luminance and contrast ratios,
//! checks color pairs against the A/AA/AAA thresholds, and audits design-token
//! documents into a scored compliance report. Malformed input never aborts an
//! audit: every data problem is recorded as an issue.
//!
//! ## Modules
//!
//! - **color**: hex parsing/formatting and HSL conversion
//! - **contrast**: relative luminance and contrast ratio
//! - **rules**: WCAG thresholds, pair checks, overall compliance policy
//! - **issues**: issues, the compliance report and its score
//! - **palette**: scale and theme generation with an AA self-check
//! - **analyzers**: token contrast and token structure analyzers
//! - **scanner**: file and directory audits
//! - **report**: text, JSON and SARIF rendering

pub mod analyzers;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod issues;
pub mod palette;
pub mod report;
pub mod rules;
pub mod scanner;

pub use color::{parse_hex, to_hex, Color};
pub use config::Config;
pub use contrast::{contrast_ratio, relative_luminance};
pub use error::{ContrastError, Result};
pub use issues::{ComplianceReport, Issue, Severity};
pub use rules::{check_contrast, determine_overall_compliance, ComplianceLevel, ContrastResult, WcagLevel};
