use crate::app::{AppContext, Result};
use crate::domain::ScrapeRequest;
use crate::scraper::{self, EngineKind};
use crate::server;

pub async fn scrape(ctx: &AppContext, request: &ScrapeRequest, engine: Option<EngineKind>) -> Result<()> {
    let extractor = ctx.extractor(engine)?;

    let document = scraper::run(extractor.as_ref(), ctx.store.as_ref(), request).await?;

    if let Some(ref title) = document.title {
        println!("Title: {}", title);
    }
    println!(
        "Captured {} links and {} paragraphs from {}",
        document.links.len(),
        document.paragraphs.len(),
        document.url
    );
    for link in &document.links {
        println!("  {} ({})", link.display_text(), link.href);
    }
    println!("Saved to {}", ctx.store.path().display());

    Ok(())
}

pub async fn serve(ctx: &AppContext) -> Result<()> {
    server::serve(&ctx.config.server, ctx.store.clone()).await
}
