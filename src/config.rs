//! Construction-time configuration for the sidecar client.
//!
//! All types derive Serde traits so a config can also come from a
//! deserialized file, but the usual path is programmatic construction.

use serde::{Deserialize, Serialize};

use crate::error::{SidecarError, SidecarResult};

/// Configuration for a [`crate::SidecarClient`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SidecarConfig {
    /// Base URL of the sidecar API (e.g., "http://127.0.0.1:8080").
    pub base_url: String,

    /// Per-request timeout in milliseconds, applied uniformly to every
    /// request made by the client.
    pub timeout_ms: u64,

    /// Optional device identifier, sent as the `x-device-id` header on
    /// every request when present.
    pub device_id: Option<String>,
}

impl Default for SidecarConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            timeout_ms: 10_000,
            device_id: None,
        }
    }
}

impl SidecarConfig {
    /// Create a config with the given base URL and default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// Checks that the base URL parses as an absolute HTTP(S) URL and the
    /// timeout is non-zero.
    pub fn validate(&self) -> SidecarResult<()> {
        let parsed: url::Url = self
            .base_url
            .parse()
            .map_err(|e| SidecarError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SidecarError::Config(format!(
                    "unsupported URL scheme '{other}'"
                )))
            }
        }
        if self.timeout_ms == 0 {
            return Err(SidecarError::Config("timeout_ms must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SidecarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_ms, 10_000);
        assert!(config.device_id.is_none());
    }

    #[test]
    fn test_rejects_bad_url() {
        let config = SidecarConfig::new("not a url");
        assert!(config.validate().is_err());

        let config = SidecarConfig::new("ftp://example.com");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = SidecarConfig {
            timeout_ms: 0,
            ..SidecarConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
