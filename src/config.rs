//! Centralized configuration management for uniadmin

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the university records REST API
    pub api_url: String,
    /// Bearer token attached to every request when present
    pub token: Option<String>,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 12,
            user_agent: "uniadmin/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("UNIADMIN_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());

        let token = match std::env::var("UNIADMIN_TOKEN") {
            Ok(token) if !token.trim().is_empty() => Some(token.trim().to_string()),
            _ => read_token_file()?,
        };

        let http = HttpConfig {
            timeout_seconds: parse_env_var("UNIADMIN_HTTP_TIMEOUT_SECONDS")?.unwrap_or(12),
            user_agent: std::env::var("UNIADMIN_USER_AGENT")
                .unwrap_or_else(|_| "uniadmin/0.1.0".to_string()),
        };

        Ok(Config {
            api_url,
            token,
            http,
        })
    }

    /// Get the API base URL without a trailing slash
    pub fn api_url_trimmed(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://: {}",
                self.api_url
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Read the bearer token from the file named by UNIADMIN_TOKEN_FILE, if set
fn read_token_file() -> Result<Option<String>> {
    let path: PathBuf = match std::env::var("UNIADMIN_TOKEN_FILE") {
        Ok(path) => path.into(),
        Err(_) => return Ok(None),
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read token file: {}", path.display()))?;

    let token = raw.trim();
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(token.to_string()))
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.http.timeout_seconds, 12);
        assert_eq!(config.http.user_agent, "uniadmin/0.1.0");
    }

    #[test]
    fn test_config_validation() {
        let config = Config::from_env().unwrap();
        config.validate().unwrap();

        let bad = Config {
            api_url: "localhost:8080/api".to_string(),
            token: None,
            http: HttpConfig::default(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_api_url_trimmed() {
        let config = Config {
            api_url: "http://localhost:8080/api/".to_string(),
            token: None,
            http: HttpConfig::default(),
        };
        assert_eq!(config.api_url_trimmed(), "http://localhost:8080/api");
    }

    #[test]
    fn test_token_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  secret-token  ").unwrap();

        std::env::set_var("UNIADMIN_TOKEN_FILE", file.path());
        let token = read_token_file().unwrap();
        std::env::remove_var("UNIADMIN_TOKEN_FILE");

        assert_eq!(token.as_deref(), Some("secret-token"));
    }
}
