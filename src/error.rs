// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for contrastbot

use thiserror::Error;

/// Main error type for contrastbot
///
/// Data problems inside a token document never surface here: the analyzers
/// turn them into report issues. These variants are for the collaborator
/// layer (files, config) and for direct colour parsing.
#[derive(Error, Debug)]
pub enum ContrastError {
    #[error("Invalid color format: {input:?} (expected 3 or 6 hex digits)")]
    InvalidColorFormat { input: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown personality: {name} (available: {available})")]
    UnknownPersonality { name: String, available: String },
}

pub type Result<T> = std::result::Result<T, ContrastError>;
