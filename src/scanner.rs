// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running token audits across a project.
//!
//! Walks directory trees, picks out design-token documents, and audits them
//! on scoped worker threads that merge into one shared report.

use crate::analyzers::{audit_document, AuditContext};
use crate::config::Config;
use crate::error::Result;
use crate::issues::{ComplianceReport, SharedReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Audit a single token document.
///
/// Unreadable files and invalid JSON are errors here; problems inside the
/// document are reported as issues.
pub fn audit_file(path: &Path, config: &Config) -> Result<ComplianceReport> {
    let text = std::fs::read_to_string(path)?;
    let document: serde_json::Value = serde_json::from_str(&text)?;
    let source = path.display().to_string();

    let ctx = AuditContext::new(config).with_source(&source).with_text(&text);
    let report = audit_document(&document, &ctx);
    debug!(file = %source, issues = report.len(), "Audited file");
    Ok(report)
}

/// Whether a path names a token document: a `.json` file whose name
/// contains one of the configured markers
pub fn is_token_file(path: &Path, config: &Config) -> bool {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return false;
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_lowercase();
    config
        .file_markers
        .iter()
        .any(|marker| name.contains(&marker.to_lowercase()))
}

/// Collect token documents under a directory, skipping hidden and excluded directories
pub fn find_token_files(dir: &Path, config: &Config) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_token_file(path, config))
        .collect();

    files.sort();
    files
}

/// Audit every token document under a directory into one report.
///
/// Files that cannot be read or parsed are logged and skipped. Issue order
/// within a file is preserved; order across files is not.
pub fn scan_directory(dir: &Path, config: &Config) -> Result<ComplianceReport> {
    info!("Scanning directory: {}", dir.display());

    let files = find_token_files(dir, config);
    if files.is_empty() {
        info!("No token documents found");
        return Ok(ComplianceReport::new());
    }

    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(files.len());
    let chunk_size = files.len().div_ceil(workers);
    let shared = SharedReport::new();

    std::thread::scope(|scope| {
        for chunk in files.chunks(chunk_size) {
            let shared = &shared;
            scope.spawn(move || {
                for path in chunk {
                    match audit_file(path, config) {
                        Ok(report) => shared.absorb(report),
                        Err(e) => warn!("Skipping {}: {}", path.display(), e),
                    }
                }
            });
        }
    });

    let report = shared.into_inner();
    info!("Scanned {} files, found {} issues", files.len(), report.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOW_CONTRAST: &str = r##"{
  "colors": {
    "primary": { "500": "#3b82f6" },
    "neutral": { "0": "#ffffff" }
  }
}"##;

    fn contrast_only() -> Config {
        Config {
            structure_checks: false,
            ..Config::default()
        }
    }

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_is_token_file() {
        let config = Config::default();
        assert!(is_token_file(Path::new("design-tokens.json"), &config));
        assert!(is_token_file(Path::new("src/Theme.JSON"), &config));
        assert!(!is_token_file(Path::new("package.json"), &config));
        assert!(!is_token_file(Path::new("tokens.toml"), &config));
    }

    #[test]
    fn test_audit_file_sets_location_and_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tokens.json");
        std::fs::write(&path, LOW_CONTRAST).unwrap();

        let report = audit_file(&path, &contrast_only()).unwrap();
        assert_eq!(report.len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(
            issue.location.as_deref(),
            Some(format!("{}#colors.primary.500", path.display()).as_str())
        );
        assert_eq!(issue.line_number, Some(3));
    }

    #[test]
    fn test_audit_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("theme.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            audit_file(&path, &Config::default()),
            Err(crate::error::ContrastError::Json(_))
        ));
        assert!(matches!(
            audit_file(&tmp.path().join("missing.json"), &Config::default()),
            Err(crate::error::ContrastError::Io(_))
        ));
    }

    #[test]
    fn test_scan_merges_and_skips() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("a")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::create_dir_all(root.join(".cache")).unwrap();

        std::fs::write(root.join("tokens.json"), LOW_CONTRAST).unwrap();
        std::fs::write(root.join("a/theme.json"), LOW_CONTRAST).unwrap();
        std::fs::write(root.join("a/broken-theme.json"), "[").unwrap();
        std::fs::write(root.join("a/package.json"), LOW_CONTRAST).unwrap();
        std::fs::write(root.join("node_modules/pkg/tokens.json"), LOW_CONTRAST).unwrap();
        std::fs::write(root.join(".cache/tokens.json"), LOW_CONTRAST).unwrap();

        let config = contrast_only();
        assert_eq!(find_token_files(root, &config).len(), 3);

        let report = scan_directory(root, &config).unwrap();
        assert_eq!(report.len(), 2);
        assert!(report.issues().iter().all(|i| i.rule_id == "insufficient_contrast"));
    }
}
