//! spacetraveling: a static blog index generator backed by a headless CMS
//!
//! At build time the home page posts are fetched from a Prismic-style
//! repository, their dates formatted for the site's locale, and the page
//! rendered with embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod prismic;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Debug, Clone)]
pub struct Spacetraveling {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Language override directory
    pub language_dir: std::path::PathBuf,
}

impl Spacetraveling {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already-built configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let public_dir = base_dir.join(&config.public_dir);
        let language_dir = base_dir.join(&config.language_dir);

        Self {
            config,
            base_dir,
            public_dir,
            language_dir,
        }
    }

    /// Translations for the configured language, with site overrides applied
    pub fn i18n(&self) -> Result<i18n::I18n> {
        let mut i18n = i18n::I18n::new(&self.config.language);
        i18n.load_languages(&self.language_dir)?;
        Ok(i18n)
    }

    /// Date formatter for post summaries
    pub fn date_formatter(&self) -> Result<helpers::DateFormatter> {
        helpers::DateFormatter::new(&self.config.date_format, self.i18n()?)
            .with_timezone(&self.config.timezone)
    }

    /// Content API client built from the configuration
    pub fn client(&self) -> prismic::PrismicClient {
        prismic::PrismicClient::new(self.config.api.clone())
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
