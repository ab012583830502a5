//! Client configuration.
//!
//! Configuration can be loaded from:
//! - TOML files (default: ~/.config/firestock/client.toml)
//! - Environment variables (FIRESTOCK_* prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use firestock_client::config::ClientConfig;
//!
//! // Load from default path or fall back to env vars
//! let config = ClientConfig::load().expect("Failed to load config");
//!
//! // Or explicitly from a file
//! let config = ClientConfig::from_file(std::path::Path::new("client.toml")).expect("Failed to load");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use firestock_core::defaults;

/// `${VAR_NAME}` references inside config files.
static ENV_VAR_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").ok());

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// User-facing message strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Success toast when an operation supplies no message.
    pub success: String,
    /// Error toast title when an operation supplies none.
    pub error_title: String,
    /// Fallback when a failed response carries no message.
    pub generic_error: String,
    /// Inline message when a list cannot be loaded.
    pub list_error: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            success: defaults::MSG_SUCCESS.to_string(),
            error_title: defaults::MSG_ERROR_TITLE.to_string(),
            generic_error: defaults::MSG_GENERIC_ERROR.to_string(),
            list_error: defaults::MSG_LIST_ERROR.to_string(),
        }
    }
}

/// Backend connection and UI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the REST backend.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Header name carrying the selected tenant.
    pub tenant_header: String,
    /// Initial page size of list views.
    pub page_size: u32,
    /// Identity-provider login URL.
    pub login_url: String,
    /// Bearer token (optional; usually set at runtime after login).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub messages: Messages,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_URL.to_string(),
            timeout_seconds: defaults::TIMEOUT_SECS,
            tenant_header: defaults::TENANT_HEADER.to_string(),
            page_size: defaults::PAGE_SIZE,
            login_url: defaults::LOGIN_URL.to_string(),
            token: None,
            messages: Messages::default(),
        }
    }
}

impl ClientConfig {
    /// Get the default config file path.
    ///
    /// Returns: ~/.config/firestock/client.toml
    pub fn default_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        path.push("firestock");
        path.push("client.toml");
        path
    }

    /// Load configuration from the default path, falling back to environment variables.
    pub fn load() -> ConfigResult<Self> {
        let path = Self::default_config_path();

        if path.exists() {
            info!("Loading client config from: {}", path.display());
            Self::from_file(&path)
        } else {
            debug!(
                "Config file not found at {}, using environment variables",
                path.display()
            );
            let config = Self::from_env();
            config.validate()?;
            Ok(config)
        }
    }

    /// Load configuration from a TOML file with a `[client]` table.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text. `${VAR}` references are replaced
    /// with environment values first.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let content = Self::substitute_env_vars(content);

        #[derive(Deserialize)]
        struct TomlRoot {
            #[serde(default)]
            client: ClientConfig,
        }

        let root: TomlRoot = toml::from_str(&content)?;
        root.client.validate()?;
        Ok(root.client)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let base = Self::default();

        Self {
            base_url: env::var("FIRESTOCK_BASE_URL").unwrap_or(base.base_url),
            timeout_seconds: env::var("FIRESTOCK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.timeout_seconds),
            tenant_header: env::var("FIRESTOCK_TENANT_HEADER").unwrap_or(base.tenant_header),
            page_size: env::var("FIRESTOCK_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(base.page_size),
            login_url: env::var("FIRESTOCK_LOGIN_URL").unwrap_or(base.login_url),
            token: env::var("FIRESTOCK_TOKEN").ok().filter(|t| !t.is_empty()),
            messages: base.messages,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, url) in [("base_url", &self.base_url), ("login_url", &self.login_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{} must start with http:// or https://, got: {}",
                    name, url
                )));
            }
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "timeout_seconds must be positive".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(ConfigError::Validation(
                "page_size must be positive".to_string(),
            ));
        }

        if self.tenant_header.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tenant_header cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Substitute environment variables in the format ${VAR_NAME}. Unset
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        let Some(re) = (*ENV_VAR_PATTERN).as_ref() else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_path_ends_with_client_toml() {
        let path = ClientConfig::default_config_path();
        assert!(path.ends_with("firestock/client.toml"));
    }

    #[test]
    fn test_from_toml_str_partial_table() {
        let config = ClientConfig::from_toml_str(
            r#"
            [client]
            base_url = "https://inventory.example.org/api"
            page_size = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "https://inventory.example.org/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.tenant_header, defaults::TENANT_HEADER);
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_from_toml_str_messages_override() {
        let config = ClientConfig::from_toml_str(
            r#"
            [client.messages]
            list_error = "Daten konnten nicht geladen werden"
            "#,
        )
        .unwrap();

        assert_eq!(config.messages.list_error, "Daten konnten nicht geladen werden");
        assert_eq!(config.messages.success, defaults::MSG_SUCCESS);
    }

    #[test]
    fn test_from_toml_str_rejects_bad_url() {
        let result = ClientConfig::from_toml_str(
            r#"
            [client]
            base_url = "inventory.local"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_toml_str_rejects_zero_page_size() {
        let result = ClientConfig::from_toml_str("[client]\npage_size = 0\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_from_toml_str_parse_error() {
        let result = ClientConfig::from_toml_str("[client\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_substitute_env_vars() {
        env::set_var("FIRESTOCK_TEST_HOST", "inventory.example.org");
        let out = ClientConfig::substitute_env_vars("url = \"https://${FIRESTOCK_TEST_HOST}/api\"");
        assert_eq!(out, "url = \"https://inventory.example.org/api\"");
    }

    #[test]
    fn test_substitute_env_vars_keeps_unset_reference() {
        env::remove_var("FIRESTOCK_TEST_UNSET_VAR");
        let out = ClientConfig::substitute_env_vars("token = \"${FIRESTOCK_TEST_UNSET_VAR}\"");
        assert_eq!(out, "token = \"${FIRESTOCK_TEST_UNSET_VAR}\"");
    }

    #[test]
    fn test_substitute_env_vars_ignores_lowercase_names() {
        let out = ClientConfig::substitute_env_vars("path = \"${home}\"");
        assert_eq!(out, "path = \"${home}\"");
    }

    #[test]
    fn test_substitute_env_vars_unterminated() {
        let out = ClientConfig::substitute_env_vars("value = \"${OPEN\"");
        assert_eq!(out, "value = \"${OPEN\"");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\ntimeout_seconds = 5").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_from_file_missing() {
        let result = ClientConfig::from_file(Path::new("/nonexistent/client.toml"));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
