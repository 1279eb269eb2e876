//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding `api.endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_API_ENDPOINT";
/// Environment variable overriding `api.access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    /// IANA timezone name; empty keeps each timestamp's own offset
    pub timezone: String,

    // Directory
    pub public_dir: String,
    pub language_dir: String,

    // Routes
    pub post_route: String,

    // Date format (date-fns tokens)
    pub date_format: String,

    // Content repository
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Spacetraveling".to_string(),
            language: "pt-BR".to_string(),
            timezone: String::new(),

            public_dir: "public".to_string(),
            language_dir: "languages".to_string(),

            post_route: "/post".to_string(),

            date_format: "dd MMM yy".to_string(),

            api: ApiConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Apply `PRISMIC_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, access_token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!("Using API endpoint from {}", ENDPOINT_ENV);
            self.api.endpoint = endpoint;
        }
        if let Some(token) = access_token.filter(|t| !t.trim().is_empty()) {
            tracing::debug!("Using access token from {}", ACCESS_TOKEN_ENV);
            self.api.access_token = Some(token);
        }
    }
}

/// Content repository API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Repository API entry point, e.g. `https://my-repo.cdn.prismic.io/api/v2`
    pub endpoint: String,
    pub access_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://spacetraveling.cdn.prismic.io/api/v2".to_string(),
            access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Spacetraveling");
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.date_format, "dd MMM yy");
        assert_eq!(config.post_route, "/post");
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
language: en
timezone: America/Sao_Paulo
api:
  endpoint: https://blog.cdn.prismic.io/api/v2
  access_token: secret
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.language, "en");
        assert_eq!(config.timezone, "America/Sao_Paulo");
        assert_eq!(config.api.endpoint, "https://blog.cdn.prismic.io/api/v2");
        assert_eq!(config.api.access_token.as_deref(), Some("secret"));
        // untouched keys keep their defaults
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = SiteConfig::default();
        config.apply_overrides(
            Some("http://localhost:9000/api/v2".to_string()),
            Some("token".to_string()),
        );
        assert_eq!(config.api.endpoint, "http://localhost:9000/api/v2");
        assert_eq!(config.api.access_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_blank_env_overrides_are_ignored() {
        let mut config = SiteConfig::default();
        config.apply_overrides(Some("  ".to_string()), Some(String::new()));
        assert_eq!(config.api.endpoint, ApiConfig::default().endpoint);
        assert!(config.api.access_token.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Loaded\npublic_dir: out\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Loaded");
        assert_eq!(config.public_dir, "out");
    }
}
