//! Bridge configuration parsed from environment variables.

use super::types::BridgeError;

pub const ENDPOINT_ENV: &str = "SKETCHPAD_ENDPOINT_URL";
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:3000/api/analyze";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub endpoint: String,
}

impl BridgeConfig {
    /// Validate an explicit endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigParse`] unless `endpoint` is an absolute
    /// `http://` or `https://` URL.
    pub fn new(endpoint: &str) -> Result<Self, BridgeError> {
        Ok(Self { endpoint: parse_endpoint(endpoint)? })
    }

    /// Build typed bridge config from environment variables.
    ///
    /// Optional:
    /// - `SKETCHPAD_ENDPOINT_URL`: default `http://127.0.0.1:3000/api/analyze`
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigParse`] if the variable is set to
    /// something other than an http(s) URL.
    pub fn from_env() -> Result<Self, BridgeError> {
        let raw = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());
        Self::new(&raw)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT_URL.to_string() }
    }
}

fn parse_endpoint(raw: &str) -> Result<String, BridgeError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| BridgeError::ConfigParse(format!("invalid endpoint '{trimmed}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(BridgeError::ConfigParse(format!(
            "unsupported endpoint scheme '{other}' (expected 'http' or 'https')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
