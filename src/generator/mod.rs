//! Generator module - writes the home page and its data snapshot

use anyhow::Result;
use std::fs;

use crate::content::PostPagination;
use crate::templates::{SiteData, TemplateRenderer};
use crate::Spacetraveling;

/// Static page generator using Tera templates
pub struct Generator {
    site: Spacetraveling,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Spacetraveling) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the home page from loaded posts
    pub fn generate(&self, posts: &PostPagination) -> Result<()> {
        // Ensure public directory exists
        fs::create_dir_all(&self.site.public_dir)?;

        let site_data = self.build_site_data()?;

        self.generate_index_page(posts, &site_data)?;
        self.generate_posts_json(posts)?;

        Ok(())
    }

    /// Build site data for templates
    fn build_site_data(&self) -> Result<SiteData> {
        let i18n = self.site.i18n()?;
        Ok(SiteData {
            title: self.site.config.title.clone(),
            language: self.site.config.language.clone(),
            post_route: self.site.config.post_route.clone(),
            load_more_label: i18n.get("load_more"),
            months_short: i18n.get_list("months.short"),
        })
    }

    /// Generate index.html
    fn generate_index_page(&self, posts: &PostPagination, site_data: &SiteData) -> Result<()> {
        let html = self.renderer.render_home(posts, site_data)?;

        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Generate posts.json, the envelope the page was rendered from
    fn generate_posts_json(&self, posts: &PostPagination) -> Result<()> {
        let output_path = self.site.public_dir.join("posts.json");
        let json = serde_json::to_string_pretty(posts)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated posts.json");

        Ok(())
    }
}
