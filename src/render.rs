//! HTML site rendering.
//!
//! Turns a finished [`Catalog`] into a flat directory of pages:
//!
//! ```text
//! site/
//! ├── index.html           # make dropdown + first thumbnails of all works
//! ├── Canon.html           # one per make: model dropdown + its thumbnails
//! ├── Canon-EOS-20D.html   # one per model: back-links + its thumbnails
//! └── nomake.html          # only when some works have no make
//! ```
//!
//! Pages are file names derived from slugs, so every link is relative and
//! the directory can be served from anywhere.
//!
//! Rendering is split from writing: [`render_site`] builds every page in
//! memory and [`write_site`] puts them on disk. A site is only written once
//! all of it has rendered.
//!
//! HTML is produced with [maud](https://maud.lambda.xyz/), which escapes
//! every interpolated value, so make names, model names and URLs from the
//! feed cannot inject markup.

use crate::config::{self, SiteConfig};
use crate::types::{Catalog, MakeId, ModelId, Work};
use maud::{DOCTYPE, Markup, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_PAGE: &str = "index.html";
pub const NO_MAKE_PAGE: &str = "nomake.html";

/// Navigates to the selected option's page.
const SELECT_ONCHANGE: &str = "if (this.value) window.location.href=this.value";

const CSS_STATIC: &str = r#"body {
    margin: 0;
    font-family: system-ui, sans-serif;
    background: var(--color-bg);
    color: var(--color-text);
}
header.site-header { padding: 1rem 2rem 0; }
nav { margin: 10px; color: var(--color-muted); }
a { color: var(--color-link); }
main.thumbnails {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
    padding: 1rem 2rem 2rem;
}
main.thumbnails img { display: block; }"#;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A fully rendered page waiting to be written.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// File name relative to the output directory.
    pub filename: String,
    pub title: String,
    /// Number of thumbnails on the page.
    pub thumbnails: usize,
    pub html: String,
}

/// Page file name for a make or model slug.
pub fn page_filename(slug: &str) -> String {
    format!("{slug}.html")
}

/// Render every page of the site.
///
/// Order: index, then each make followed by its models, then the no-make
/// page when there is one.
pub fn render_site(catalog: &Catalog, config: &SiteConfig) -> Vec<RenderedPage> {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    let mut pages = vec![render_index(catalog, config, &css)];
    for (make_id, _) in catalog.make_ids() {
        pages.push(render_make_page(catalog, make_id, config, &css));
        for (model_id, _) in catalog.model_ids(make_id) {
            pages.push(render_model_page(catalog, model_id, config, &css));
        }
    }
    if !catalog.no_make().is_empty() {
        pages.push(render_no_make_page(catalog, config, &css));
    }
    pages
}

/// Write rendered pages into `output_dir`, creating it if needed.
///
/// Two pages with the same file name (slug collision) are both written; the
/// later one wins and a warning is logged.
pub fn write_site(pages: &[RenderedPage], output_dir: &Path) -> Result<(), RenderError> {
    fs::create_dir_all(output_dir).map_err(|source| RenderError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = HashSet::new();
    for page in pages {
        if !written.insert(page.filename.as_str()) {
            tracing::warn!(page = %page.filename, "page name collision, overwriting earlier page");
        }
        let path = output_dir.join(&page.filename);
        fs::write(&path, &page.html).map_err(|source| RenderError::Io { path, source })?;
        tracing::debug!(page = %page.filename, "page written");
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(heading: Markup, nav: Markup) -> Markup {
    html! {
        header.site-header {
            h1 { (heading) }
            nav { (nav) }
        }
    }
}

/// Dropdown that jumps to the selected page.
fn page_select<'a>(
    placeholder: &str,
    options: impl Iterator<Item = (String, &'a str)>,
    extra: Option<(&str, &str)>,
) -> Markup {
    html! {
        select onchange=(SELECT_ONCHANGE) {
            option value="" { (placeholder) }
            @for (href, label) in options {
                option value=(href) { (label) }
            }
            @if let Some((href, label)) = extra {
                option value=(href) { (label) }
            }
        }
    }
}

/// First `limit` works that have a thumbnail URL.
fn pick_thumbnails<'a>(works: impl Iterator<Item = &'a Work>, limit: usize) -> Vec<&'a Work> {
    works
        .filter(|w| !w.thumbnail_url.is_empty())
        .take(limit)
        .collect()
}

fn thumbnail_grid(works: &[&Work]) -> Markup {
    html! {
        main.thumbnails {
            @for work in works {
                img src=(work.thumbnail_url) alt=(alt_text(work)) loading="lazy";
            }
        }
    }
}

fn alt_text(work: &Work) -> String {
    if work.filename.is_empty() {
        format!("Work {}", work.id)
    } else {
        work.filename.clone()
    }
}

fn page(filename: String, title: String, thumbnails: &[&Work], markup: Markup) -> RenderedPage {
    RenderedPage {
        filename,
        title,
        thumbnails: thumbnails.len(),
        html: markup.into_string(),
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(catalog: &Catalog, config: &SiteConfig, css: &str) -> RenderedPage {
    let makes = catalog
        .makes()
        .iter()
        .map(|m| (page_filename(&m.slug), m.name.as_str()));
    let no_make = (!catalog.no_make().is_empty()).then_some((NO_MAKE_PAGE, "(no make/generic)"));
    let nav = page_select("-- select a camera make", makes, no_make);

    let thumbs = pick_thumbnails(catalog.works().iter(), config.thumbnails_per_page);
    let content = html! {
        (site_header(html! { (config.site_title) }, nav))
        (thumbnail_grid(&thumbs))
    };

    let markup = base_document(&config.site_title, css, content);
    page(INDEX_PAGE.to_string(), config.site_title.clone(), &thumbs, markup)
}

fn render_make_page(catalog: &Catalog, id: MakeId, config: &SiteConfig, css: &str) -> RenderedPage {
    let make = catalog.make(id);
    let models = make
        .models
        .iter()
        .map(|m| (page_filename(&m.slug), m.name.as_str()));
    let nav = html! {
        a href=(INDEX_PAGE) { "back to homepage" }
        " | "
        (page_select("-- select a camera model", models, None))
    };

    let thumbs = pick_thumbnails(catalog.resolve(&make.works), config.thumbnails_per_page);
    let heading = html! { "All photos taken with a " i { (make.name) } " camera" };
    let content = html! {
        (site_header(heading, nav))
        (thumbnail_grid(&thumbs))
    };

    let title = format!("All photos taken with a {}", make.name);
    let markup = base_document(&title, css, content);
    page(page_filename(&make.slug), title, &thumbs, markup)
}

fn render_model_page(
    catalog: &Catalog,
    id: ModelId,
    config: &SiteConfig,
    css: &str,
) -> RenderedPage {
    let model = catalog.model(id);
    let make = catalog.make(model.make);
    let nav = html! {
        a href=(INDEX_PAGE) { "back to homepage" }
        " | "
        a href=(page_filename(&make.slug)) { "back to " (make.name) }
    };

    let thumbs = pick_thumbnails(catalog.resolve(&model.works), config.thumbnails_per_page);
    let heading = html! { "All photos taken with a " i { (make.name) " " (model.name) } " camera" };
    let content = html! {
        (site_header(heading, nav))
        (thumbnail_grid(&thumbs))
    };

    let title = format!("All photos taken with a {}", model.name);
    let markup = base_document(&title, css, content);
    page(page_filename(&model.slug), title, &thumbs, markup)
}

fn render_no_make_page(catalog: &Catalog, config: &SiteConfig, css: &str) -> RenderedPage {
    let nav = html! {
        a href=(INDEX_PAGE) { "back to homepage" }
    };

    let thumbs = pick_thumbnails(catalog.resolve(catalog.no_make()), config.thumbnails_per_page);
    let content = html! {
        (site_header(html! { "Generic Photos" }, nav))
        (thumbnail_grid(&thumbs))
    };

    let title = "Generic Photographic Works".to_string();
    let markup = base_document(&title, css, content);
    page(NO_MAKE_PAGE.to_string(), title, &thumbs, markup)
}

// ============================================================================
// Tests
// ============================================================================
