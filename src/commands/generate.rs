//! Generate static files

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::prismic::ContentSource;
use crate::Spacetraveling;

/// Fetch posts from the configured repository and generate the site
pub async fn run(site: &Spacetraveling) -> Result<()> {
    let client = site.client();
    tracing::info!("Querying {}", client.endpoint());
    run_with_source(site, &client).await
}

/// Generate the site from any content source
pub async fn run_with_source<S: ContentSource + ?Sized>(
    site: &Spacetraveling,
    source: &S,
) -> Result<()> {
    let start = std::time::Instant::now();

    let formatter = site.date_formatter()?;
    let posts = ContentLoader::new(source, &formatter)
        .load_home_posts()
        .await?;

    tracing::info!(
        "Loaded {} posts (more pages: {})",
        posts.results.len(),
        posts.has_next_page()
    );

    let generator = Generator::new(site)?;
    generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}
