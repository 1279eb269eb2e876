//! List posts from the content repository

use anyhow::Result;

use crate::content::ContentLoader;
use crate::Spacetraveling;

/// Print the home page posts; with `all`, keep following `next_page`
pub async fn run(site: &Spacetraveling, all: bool) -> Result<()> {
    let client = site.client();
    let formatter = site.date_formatter()?;
    let loader = ContentLoader::new(&client, &formatter);

    let mut posts = loader.load_home_posts().await?;
    if all {
        while loader.load_next_page(&mut posts).await? {
            tracing::debug!("Loaded {} posts so far", posts.results.len());
        }
    }

    println!("Posts ({}):", posts.results.len());
    for post in &posts.results {
        println!(
            "  {} - {} by {} [{}]",
            post.first_publication_date,
            post.data.title,
            post.data.author,
            post.uid.as_deref().unwrap_or("-")
        );
    }
    if posts.has_next_page() {
        println!("More posts available (use --all)");
    }

    Ok(())
}
