//! Provider configuration
//!
//! Host and API key are resolved in this order:
//! 1. Explicit configuration values
//! 2. `MAILCOW_HOST` / `MAILCOW_APIKEY` environment variables
//! 3. `provider.json` in the Mailcow config directory (only via [`ProviderConfig::load`])

use log::warn;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::plan::Value;

/// Environment variable consulted when `host` is null
pub const HOST_ENV: &str = "MAILCOW_HOST";
/// Environment variable consulted when `api_key` is null
pub const API_KEY_ENV: &str = "MAILCOW_APIKEY";

/// Provider settings filename in the config directory
const PROVIDER_FILE: &str = "provider.json";

/// Provider configuration as supplied by the orchestration host
#[derive(Clone, Default)]
pub struct ProviderConfig {
    pub host: Value<String>,
    pub api_key: Value<String>,
}

/// Host and API key after fallback resolution, both non-empty
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub api_key: String,
}

/// `provider.json` format
#[derive(Debug, Default, Deserialize)]
struct ProviderFile {
    host: Option<String>,
    #[serde(alias = "apikey")]
    api_key: Option<String>,
}

impl ProviderConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: Value::Known(host.into()),
            api_key: Value::Known(api_key.into()),
        }
    }

    /// Resolve against the process environment
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with a custom environment lookup
    pub fn resolve_with<F>(&self, env: F) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.resolve_inner(&env, &ProviderFile::default())
    }

    /// Resolve against the process environment, then `provider.json` in the
    /// config directory if it exists
    pub fn load(&self) -> Result<ResolvedConfig> {
        let file = if config::config_exists(PROVIDER_FILE) {
            config::load_json(PROVIDER_FILE).map_err(|e| Error::Configuration(format!("{e:#}")))?
        } else {
            ProviderFile::default()
        };
        self.resolve_inner(&|name: &str| std::env::var(name).ok(), &file)
    }

    /// Resolve with a custom environment lookup and an explicit settings file
    pub fn load_with<F>(&self, env: F, path: &Path) -> Result<ResolvedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ProviderFile =
            config::load_json_file(path).map_err(|e| Error::Configuration(format!("{e:#}")))?;
        self.resolve_inner(&env, &file)
    }

    fn resolve_inner(
        &self,
        env: &dyn Fn(&str) -> Option<String>,
        file: &ProviderFile,
    ) -> Result<ResolvedConfig> {
        let host = resolve_field("host", &self.host, HOST_ENV, env, file.host.as_deref())?;
        let api_key =
            resolve_field("apikey", &self.api_key, API_KEY_ENV, env, file.api_key.as_deref())?;
        Ok(ResolvedConfig { host, api_key })
    }
}

fn resolve_field(
    attribute: &str,
    value: &Value<String>,
    env_var: &str,
    env: &dyn Fn(&str) -> Option<String>,
    file_value: Option<&str>,
) -> Result<String> {
    let resolved = match value {
        Value::Known(v) => v.clone(),
        Value::Unknown => {
            warn!("Cannot use unknown value as {attribute}");
            return Err(Error::Configuration(format!(
                "cannot use unknown value as {attribute}"
            )));
        }
        Value::Null => env(env_var)
            .filter(|v| !v.is_empty())
            .or_else(|| file_value.map(str::to_string))
            .unwrap_or_default(),
    };

    if resolved.is_empty() {
        return Err(Error::Configuration(format!(
            "{attribute} cannot be an empty string (set it explicitly or via {env_var})"
        )));
    }
    Ok(resolved)
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_known().map(|_| "<redacted>"))
            .finish()
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_explicit_values_win() {
        let config = ProviderConfig::new("https://explicit", "explicit-key");
        let resolved = config
            .resolve_with(env_of(&[(HOST_ENV, "https://env"), (API_KEY_ENV, "env-key")]))
            .unwrap();
        assert_eq!(resolved.host, "https://explicit");
        assert_eq!(resolved.api_key, "explicit-key");
    }

    #[test]
    fn test_null_falls_back_to_env() {
        let config = ProviderConfig::default();
        let resolved = config
            .resolve_with(env_of(&[(HOST_ENV, "https://env"), (API_KEY_ENV, "env-key")]))
            .unwrap();
        assert_eq!(resolved.host, "https://env");
        assert_eq!(resolved.api_key, "env-key");
    }

    #[test]
    fn test_explicit_empty_does_not_fall_back() {
        let config = ProviderConfig::new("", "key");
        let err = config
            .resolve_with(env_of(&[(HOST_ENV, "https://env")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_missing_api_key() {
        let config = ProviderConfig {
            host: Value::Known("https://mail.example.com".into()),
            api_key: Value::Null,
        };
        let err = config.resolve_with(env_of(&[])).unwrap_err();
        assert!(err.to_string().contains("apikey"));
    }

    #[test]
    fn test_unknown_host_is_rejected() {
        let config = ProviderConfig {
            host: Value::Unknown,
            api_key: Value::Known("key".into()),
        };
        let err = config
            .resolve_with(env_of(&[(HOST_ENV, "https://env")]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::Configuration("cannot use unknown value as host".into())
        );
    }

    #[test]
    fn test_settings_file_is_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provider.json");
        std::fs::write(&path, r#"{ "host": "https://file", "apikey": "file-key" }"#).unwrap();

        let config = ProviderConfig::default();
        let resolved = config
            .load_with(env_of(&[(HOST_ENV, "https://env")]), &path)
            .unwrap();
        assert_eq!(resolved.host, "https://env");
        assert_eq!(resolved.api_key, "file-key");
    }

    #[test]
    fn test_unreadable_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = ProviderConfig::default()
            .load_with(env_of(&[]), &path)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProviderConfig::new("https://h", "very-secret");
        assert!(!format!("{config:?}").contains("very-secret"));
        let resolved = config.resolve_with(env_of(&[])).unwrap();
        assert!(!format!("{resolved:?}").contains("very-secret"));
    }
}
