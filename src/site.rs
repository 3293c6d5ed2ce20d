//! The full build: open the feed, build the catalog, render, write.
//!
//! Any failure before the write step leaves the output directory untouched.

use crate::builder::{self, FeedError};
use crate::config::{ConfigError, SiteConfig};
use crate::render::{self, RenderError, RenderedPage};
use crate::source::{self, SourceError};
use crate::types::Catalog;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// What a finished build produced.
#[derive(Debug)]
pub struct BuildReport {
    pub catalog: Catalog,
    pub pages: Vec<RenderedPage>,
}

/// Build the site for the feed at `feed` into `output_dir`.
pub fn build_site(
    feed: &str,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<BuildReport, BuildError> {
    let reader = source::open_feed(feed, &config.http)?;
    let catalog = builder::build_catalog(reader)?;
    tracing::info!(
        works = catalog.works().len(),
        makes = catalog.makes().len(),
        models = catalog.model_count(),
        no_make = catalog.no_make().len(),
        "catalog built"
    );

    let pages = render::render_site(&catalog, config);
    render::write_site(&pages, output_dir)?;
    tracing::info!(pages = pages.len(), dir = %output_dir.display(), "site written");

    Ok(BuildReport { catalog, pages })
}
