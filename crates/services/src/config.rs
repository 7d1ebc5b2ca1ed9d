//! Credential and endpoint resolution for the plan model.
//!
//! Values come from a TOML secrets file first and the process environment second.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "PLANNER_AI_BASE_URL";
pub const MODEL_VAR: &str = "PLANNER_AI_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

/// Endpoint settings for the chat-completions client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Default, Deserialize)]
struct SecretsFile {
    #[serde(rename = "OPENAI_API_KEY")]
    api_key: Option<String>,
    #[serde(rename = "PLANNER_AI_BASE_URL")]
    base_url: Option<String>,
    #[serde(rename = "PLANNER_AI_MODEL")]
    model: Option<String>,
}

impl AiSettings {
    /// Load settings from `secrets_path` and the environment.
    ///
    /// A missing secrets file is not an error. Returns `Ok(None)` when no API key
    /// is configured anywhere.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed, or the
    /// base URL is invalid.
    pub fn load(secrets_path: &Path) -> Result<Option<Self>, ConfigError> {
        let secrets = match fs::read_to_string(secrets_path) {
            Ok(raw) => Some(raw),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(source) => {
                return Err(ConfigError::Read {
                    path: secrets_path.to_path_buf(),
                    source,
                });
            }
        };

        Self::resolve(secrets.as_deref(), |name| env::var(name).ok())
    }

    /// Resolve settings from raw secrets text and an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on malformed TOML or an invalid base URL.
    pub fn resolve(
        secrets: Option<&str>,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let file: SecretsFile = match secrets {
            Some(raw) => toml::from_str(raw)?,
            None => SecretsFile::default(),
        };

        let pick = |from_file: Option<String>, var: &str| {
            normalize_optional(from_file).or_else(|| normalize_optional(env_lookup(var)))
        };

        let Some(api_key) = pick(file.api_key, API_KEY_VAR) else {
            return Ok(None);
        };
        let base_url = pick(file.base_url, BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = pick(file.model, MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.into());

        if Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl { raw: base_url });
        }

        Ok(Some(Self {
            api_key,
            base_url,
            model,
        }))
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
