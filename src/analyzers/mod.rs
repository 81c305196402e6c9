// SPDX-License-Identifier: PMPL-1.0-or-later
//! Design-token analyzers.
//!
//! Each analyzer walks a parsed token document and appends issues to a
//! [`ComplianceReport`]. Malformed input never aborts an analyzer: every data
//! problem becomes an issue and the walk carries on with the rest.

pub mod contrast;
pub mod structure;

use crate::config::Config;
use crate::issues::ComplianceReport;
use serde_json::Value;

/// Trait implemented by all analyzers
pub trait Analyzer: Send + Sync {
    /// Human-readable name of this analyzer
    fn name(&self) -> &str;

    /// Short description of what this analyzer checks
    fn description(&self) -> &str;

    /// Analyze one token document
    fn analyze(&self, document: &Value, ctx: &AuditContext<'_>, report: &mut ComplianceReport);

    /// Whether the configuration turns this analyzer on
    fn enabled(&self, config: &Config) -> bool;
}

/// Where a document came from, plus the settings to audit it with
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    pub config: &'a Config,
    /// File name or other label used as the location prefix
    pub source: Option<&'a str>,
    /// Raw document text, used to recover line numbers
    pub text: Option<&'a str>,
}

impl<'a> AuditContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            source: None,
            text: None,
        }
    }

    pub fn with_source(mut self, source: &'a str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    /// Location string for a token path, prefixed with the source when known
    pub fn location(&self, token_path: &str) -> String {
        match self.source {
            Some(source) => format!("{}#{}", source, token_path),
            None => token_path.to_string(),
        }
    }

    /// Line (1-indexed) of the key a dotted token path ends on.
    ///
    /// Each segment is searched as a JSON key after the previous one, so
    /// `colors.primary.500` resolves inside `primary` even when another scale
    /// declares the same shade or value earlier in the file. Array suffixes
    /// such as `scale[3]` resolve to the array's key.
    pub fn line_of_path(&self, token_path: &str) -> Option<usize> {
        let text = self.text?;
        let mut offset = 0;
        let mut key_start = None;

        for segment in token_path.split('.') {
            let key = segment.split('[').next().unwrap_or(segment);
            let found = offset + find_key(&text[offset..], key)?;
            key_start = Some(found);
            offset = found + key.len() + 2;
        }

        key_start.map(|start| text[..start].matches('\n').count() + 1)
    }
}

/// Byte offset of the first `"key"` followed by a colon
fn find_key(text: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{}\"", key);
    text.match_indices(&needle)
        .map(|(idx, _)| idx)
        .find(|idx| text[idx + needle.len()..].trim_start().starts_with(':'))
}

/// All analyzers, in reporting order
pub fn all_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(contrast::TokenContrastAnalyzer),
        Box::new(structure::TokenStructureAnalyzer),
    ]
}

/// Run every enabled analyzer on a document
pub fn audit_document(document: &Value, ctx: &AuditContext<'_>) -> ComplianceReport {
    let mut report = ComplianceReport::new();

    for analyzer in all_analyzers() {
        if !analyzer.enabled(ctx.config) {
            continue;
        }
        tracing::debug!(analyzer = analyzer.name(), "Running analyzer");
        analyzer.analyze(document, ctx, &mut report);
    }

    report
}

/// Join a parent token path and a key
pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}
