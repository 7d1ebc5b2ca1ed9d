//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted by the chat-completions client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("model request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Reasons a generated plan was replaced by the fallback template.
///
/// These never fail generation; they are reported alongside the fallback plan.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("no API key configured")]
    MissingCredential,
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("model output is not a valid plan: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output contains no weeks")]
    EmptyPlan,
}

/// Errors emitted while resolving settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read secrets file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed secrets file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid base URL: {raw}")]
    InvalidBaseUrl { raw: String },
}

/// Errors emitted by `PlannerSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no plan generated yet")]
    NoPlan,
    #[error("week numbers start at 1")]
    InvalidWeek,
    #[error("plan has no {label}")]
    UnknownWeek { label: String },
    #[error("{label} has no task #{number}")]
    UnknownTask { label: String, number: usize },
}

/// Errors emitted while reading or writing plan documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
