// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for contrastbot

use crate::error::{ContrastError, Result};
use crate::rules::WcagLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target WCAG level for token contrast checks
    #[serde(default)]
    pub level: WcagLevel,

    /// Evaluate pairs against the large-text thresholds
    #[serde(default)]
    pub large_text: bool,

    /// Run design-token structure rules in addition to contrast checks
    #[serde(default = "default_true")]
    pub structure_checks: bool,

    /// Foreground/background token pairs, paths relative to `colors`
    #[serde(default = "default_contrast_pairs")]
    pub contrast_pairs: Vec<ContrastPair>,

    /// Shade of each `colors.semantic` group checked for contrast
    #[serde(default = "default_semantic_shade")]
    pub semantic_shade: String,

    /// Background token path for semantic group checks
    #[serde(default = "default_semantic_background")]
    pub semantic_background: String,

    /// Directory names skipped while scanning
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// A `.json` file is a token document only if its name contains one of these
    #[serde(default = "default_file_markers")]
    pub file_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: WcagLevel::AA,
            large_text: false,
            structure_checks: true,
            contrast_pairs: default_contrast_pairs(),
            semantic_shade: default_semantic_shade(),
            semantic_background: default_semantic_background(),
            exclude: default_exclude(),
            file_markers: default_file_markers(),
        }
    }
}

/// A declared foreground/background candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContrastPair {
    /// Token path of the text color, e.g. `primary.500`
    pub foreground: String,
    /// Token path of the surface color, e.g. `neutral.0`
    pub background: String,
    /// Overrides `Config::large_text` for this pair
    #[serde(default)]
    pub large_text: Option<bool>,
}

impl ContrastPair {
    pub fn new(foreground: &str, background: &str) -> Self {
        Self {
            foreground: foreground.to_string(),
            background: background.to_string(),
            large_text: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_contrast_pairs() -> Vec<ContrastPair> {
    vec![
        ContrastPair::new("primary.500", "neutral.0"),
        ContrastPair::new("primary.600", "neutral.0"),
        ContrastPair::new("primary.500", "neutral.900"),
        ContrastPair::new("primary.800", "neutral.0"),
    ]
}

fn default_semantic_shade() -> String {
    "500".to_string()
}

fn default_semantic_background() -> String {
    "neutral.0".to_string()
}

fn default_exclude() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        ".git".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "coverage".to_string(),
    ]
}

fn default_file_markers() -> Vec<String> {
    vec!["token".to_string(), "theme".to_string()]
}

/// Load configuration from a TOML file; a missing file yields defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| ContrastError::Config(format!("{}: {}", path.display(), e)))?;

    if config.contrast_pairs.iter().any(|p| p.foreground.is_empty() || p.background.is_empty()) {
        return Err(ContrastError::Config(
            "contrast_pairs entries need both foreground and background".to_string(),
        ));
    }

    debug!(level = %config.level, pairs = config.contrast_pairs.len(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config(Path::new("/nonexistent/contrastbot.toml")).unwrap();
        assert_eq!(config.level, WcagLevel::AA);
        assert_eq!(config.contrast_pairs.len(), 4);
        assert!(config.structure_checks);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("contrastbot.toml");
        std::fs::write(
            &path,
            r#"
level = "AAA"

[[contrast_pairs]]
foreground = "brand.700"
background = "neutral.50"
large_text = true
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, WcagLevel::AAA);
        assert_eq!(config.contrast_pairs.len(), 1);
        assert_eq!(config.contrast_pairs[0].large_text, Some(true));
        assert_eq!(config.semantic_shade, "500");
        assert_eq!(config.file_markers, vec!["token", "theme"]);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "level = \"AAAA\"").unwrap();
        assert!(matches!(load_config(&path), Err(ContrastError::Config(_))));
    }

    #[test]
    fn test_empty_pair_path_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.toml");
        std::fs::write(
            &path,
            "[[contrast_pairs]]\nforeground = \"\"\nbackground = \"neutral.0\"\n",
        )
        .unwrap();
        assert!(matches!(load_config(&path), Err(ContrastError::Config(_))));
    }
}
